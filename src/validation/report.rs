use serde::{Deserialize, Serialize};

use crate::error::RulesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Operand values did not satisfy the operator or combinator.
    Unsatisfied,
    /// Operand types are incompatible with the operator.
    TypeMismatch,
    /// A parameter violated its type, allowed-values, bound or pattern metadata.
    ParameterCheck,
}

/// One failed rule, rule set or parameter check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub rule_name: String,
    /// Resolved operands as rendered in the message.
    pub operands: Vec<String>,
    /// Operator, combinator or check name.
    pub operator: String,
    pub message: String,
    pub kind: FailureKind,
}

/// Outcome of a validation call.
///
/// A report is valid exactly when it carries no failures. Deserialization
/// rejects payloads whose `valid` flag disagrees with `failures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ValidationReportFields")]
pub struct ValidationReport {
    valid: bool,
    failures: Vec<Failure>,
}

#[derive(Deserialize)]
struct ValidationReportFields {
    valid: bool,
    #[serde(default)]
    failures: Vec<Failure>,
}

impl TryFrom<ValidationReportFields> for ValidationReport {
    type Error = RulesError;

    fn try_from(fields: ValidationReportFields) -> Result<Self, Self::Error> {
        if fields.valid != fields.failures.is_empty() {
            return Err(RulesError::InvalidData(format!(
                "report marked valid={} carries {} failures",
                fields.valid,
                fields.failures.len()
            )));
        }
        Ok(Self::from_failures(fields.failures))
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::passed()
    }
}

impl ValidationReport {
    #[must_use]
    pub fn passed() -> Self {
        Self {
            valid: true,
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_failures(failures: Vec<Failure>) -> Self {
        Self {
            valid: failures.is_empty(),
            failures,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| failure.message.as_str())
    }

    #[must_use]
    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    /// Merges `other` into this report.
    #[must_use]
    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.failures.extend(other.failures);
        self.valid = self.failures.is_empty();
        self
    }

    /// One line per failure, or `valid` when there are none.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            return "valid".to_owned();
        }
        self.failures
            .iter()
            .map(|failure| format!("{} [{}]: {}", failure.rule_name, failure.operator, failure.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
