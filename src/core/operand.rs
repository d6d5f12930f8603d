use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::target::Target;
use super::value::ParamValue;

/// Operand supplied to a rule.
///
/// A `Reference` is resolved against the target on every evaluation and
/// falls back to the name itself when the target exposes no such parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Literal(ParamValue),
    Reference(String),
}

impl Operand {
    #[must_use]
    pub fn literal(value: impl Into<ParamValue>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Reference(name) => write!(f, "@{name}"),
        }
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Reference(value.to_owned())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Self::Reference(value)
    }
}

impl From<ParamValue> for Operand {
    fn from(value: ParamValue) -> Self {
        Self::Literal(value)
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Self::Literal(value.into())
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Literal(value.into())
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Literal(value.into())
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Literal(value.into())
    }
}

/// Resolves an operand to a concrete value against `target`.
#[must_use]
pub fn resolve_operand(target: &dyn Target, operand: &Operand) -> ParamValue {
    match operand {
        Operand::Literal(value) => value.clone(),
        Operand::Reference(name) => match target.get_parameter(name) {
            Some(value) => {
                trace!(attribute = %name, value = %value, "resolved operand reference");
                value.clone()
            }
            None => ParamValue::Str(name.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{Operand, resolve_operand};
    use crate::canvas::{CanvasComponent, ParameterDefinition};
    use crate::core::{ParamValue, ValueKind};

    fn target() -> CanvasComponent {
        let mut component = CanvasComponent::new("Limits");
        component.define("max", ParameterDefinition::new(ValueKind::Int, 10));
        component
    }

    #[test]
    fn reference_resolves_to_current_parameter_value() {
        let value = resolve_operand(&target(), &Operand::from("max"));
        assert_eq!(value, ParamValue::Int(10));
    }

    #[test]
    fn unknown_reference_falls_back_to_literal_name() {
        let value = resolve_operand(&target(), &Operand::from("min"));
        assert_eq!(value, ParamValue::Str("min".to_owned()));
    }

    #[test]
    fn literal_is_never_looked_up() {
        let value = resolve_operand(&target(), &Operand::literal("max"));
        assert_eq!(value, ParamValue::Str("max".to_owned()));
    }
}
