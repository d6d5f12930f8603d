use thiserror::Error;

pub type RulesResult<T> = Result<T, RulesError>;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("rule `{rule}` is not ready for validation: missing {missing}")]
    Configuration { rule: String, missing: String },

    #[error("unknown operator `{name}`")]
    UnknownOperator { name: String },

    #[error("rule `{rule}` uses semantic operator `{operator}` but operand `b` is not set")]
    MissingOperand { rule: String, operator: String },

    #[error("`{owner}` has no child named `{name}`")]
    NotFound { owner: String, name: String },

    #[error("operator `{operator}` cannot compare {detail}")]
    TypeMismatch { operator: String, detail: String },

    #[error("`{target}` does not expose attribute `{name}`")]
    UnknownAttribute { target: String, name: String },

    #[error("invalid logical combinator `{value}`: expected one of all, any, none")]
    InvalidLogical { value: String },

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl RulesError {
    /// Returns `true` for errors raised by misconfigured rules, as opposed to
    /// errors about the data being validated.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::UnknownOperator { .. }
                | Self::MissingOperand { .. }
                | Self::NotFound { .. }
                | Self::UnknownAttribute { .. }
                | Self::InvalidLogical { .. }
                | Self::InvalidPattern { .. }
        )
    }
}
