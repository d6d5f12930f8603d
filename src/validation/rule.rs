use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::core::{Operand, ParamValue, Target, resolve_operand};
use crate::error::{RulesError, RulesResult};

use super::node::Outcome;
use super::{
    Failure, FailureKind, NodeIdentity, Operator, OperatorRegistry, PatternMode, RuleContext,
    ValidationReport,
};

/// Lifecycle position of a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleState {
    /// Fields still required before the rule can be validated.
    Unconfigured { missing: Vec<&'static str> },
    Ready,
    Evaluated { valid: bool },
}

/// Leaf validator: one operator applied to operand `a` and, for semantic
/// operators, operand `b`.
#[derive(Debug, Clone)]
pub struct Rule {
    identity: NodeIdentity,
    a: Option<Operand>,
    b: Option<Operand>,
    operator: Option<Operator>,
    pattern_mode: PatternMode,
    custom_message: Option<String>,
    evaluated: bool,
    is_valid: bool,
    error_message: Option<String>,
}

impl Rule {
    /// Creates an unconfigured rule bound to `attribute` of `target`.
    ///
    /// Fails with `UnknownAttribute` when the target does not expose it.
    pub fn new(context: &RuleContext, target: &dyn Target, attribute: &str) -> RulesResult<Self> {
        let sequence = context.next_rule_sequence();
        Ok(Self {
            identity: NodeIdentity::new(context, target, attribute, "rule", sequence)?,
            a: None,
            b: None,
            operator: None,
            pattern_mode: context.pattern_mode(),
            custom_message: None,
            evaluated: false,
            is_valid: true,
            error_message: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.identity.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.identity.name = name.into();
        self
    }

    #[must_use]
    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.identity.attribute
    }

    #[must_use]
    pub fn target_type(&self) -> &str {
        &self.identity.target_type
    }

    #[must_use]
    pub fn created(&self) -> DateTime<Utc> {
        self.identity.created
    }

    #[must_use]
    pub fn a(&self) -> Option<&Operand> {
        self.a.as_ref()
    }

    #[must_use]
    pub fn b(&self) -> Option<&Operand> {
        self.b.as_ref()
    }

    #[must_use]
    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn set_a(&mut self, operand: impl Into<Operand>) -> &mut Self {
        self.a = Some(operand.into());
        self.clear_verdict();
        self
    }

    pub fn set_b(&mut self, operand: impl Into<Operand>) -> &mut Self {
        self.b = Some(operand.into());
        self.clear_verdict();
        self
    }

    pub fn clear_b(&mut self) -> &mut Self {
        self.b = None;
        self.clear_verdict();
        self
    }

    pub fn set_operator(&mut self, operator: Operator) -> &mut Self {
        self.operator = Some(operator);
        self.clear_verdict();
        self
    }

    /// Assigns an operator by registry name; unknown names fail immediately.
    pub fn set_operator_name(&mut self, name: &str) -> RulesResult<&mut Self> {
        let operator = OperatorRegistry::lookup(name)?;
        Ok(self.set_operator(operator))
    }

    /// Replaces the generated failure text with `message`.
    pub fn set_error_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.custom_message = Some(message.into());
        self.clear_verdict();
        self
    }

    #[must_use]
    pub fn custom_error_message(&self) -> Option<&str> {
        self.custom_message.as_deref()
    }

    #[must_use]
    pub fn with_a(mut self, operand: impl Into<Operand>) -> Self {
        self.set_a(operand);
        self
    }

    #[must_use]
    pub fn with_b(mut self, operand: impl Into<Operand>) -> Self {
        self.set_b(operand);
        self
    }

    #[must_use]
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.set_operator(operator);
        self
    }

    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.set_error_message(message);
        self
    }

    /// Verdict of the last recorded validation; `true` until then.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn state(&self) -> RuleState {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return RuleState::Unconfigured { missing };
        }
        if self.evaluated {
            RuleState::Evaluated {
                valid: self.is_valid,
            }
        } else {
            RuleState::Ready
        }
    }

    /// Clears operands, operator and the recorded verdict. Identity is kept.
    pub fn reset(&mut self) {
        self.a = None;
        self.b = None;
        self.operator = None;
        self.custom_message = None;
        self.clear_verdict();
    }

    /// Evaluates the rule against the current state of `target` without
    /// recording the verdict.
    pub fn check(&self, target: &dyn Target) -> RulesResult<ValidationReport> {
        Ok(self.evaluate(target)?.report)
    }

    /// Evaluates the rule and records `is_valid` / `error_message`.
    pub fn validate(&mut self, target: &dyn Target) -> RulesResult<ValidationReport> {
        Ok(self.record(target)?.report)
    }

    pub(crate) fn record(&mut self, target: &dyn Target) -> RulesResult<Outcome> {
        self.clear_verdict();
        let outcome = self.evaluate(target)?;
        self.evaluated = true;
        self.is_valid = outcome.report.is_valid();
        self.error_message = outcome.message.clone();
        Ok(outcome)
    }

    pub(crate) fn evaluate(&self, target: &dyn Target) -> RulesResult<Outcome> {
        let (operator, a, b) = self.ready_parts()?;
        let a_value = resolve_operand(target, a);
        let b_value = b.map_or(ParamValue::None, |b| resolve_operand(target, b));

        let mut operands = vec![a_value.to_string()];
        if operator.is_semantic() {
            operands.push(b_value.to_string());
        }
        let b_suffix = operands
            .get(1)
            .map(|b| format!(" {b}"))
            .unwrap_or_default();
        let specifying = format!("{} {}{b_suffix}", operands[0], operator.name());

        let failure = match operator.apply(&a_value, &b_value, self.pattern_mode) {
            Ok(true) => None,
            Ok(false) => Some((
                FailureKind::Unsatisfied,
                format!(
                    "validation rule `{}` specifying `{specifying}` failed: {} {}{b_suffix}",
                    self.name(),
                    operands[0],
                    operator.expectation(),
                ),
            )),
            Err(err @ RulesError::TypeMismatch { .. }) => {
                warn!(rule = %self.name(), error = %err, "operand type mismatch");
                Some((
                    FailureKind::TypeMismatch,
                    format!(
                        "validation rule `{}` specifying `{specifying}` failed: {err}",
                        self.name()
                    ),
                ))
            }
            Err(err) => return Err(err),
        };

        debug!(
            rule = %self.name(),
            operator = operator.name(),
            valid = failure.is_none(),
            "validated rule"
        );

        Ok(match failure {
            None => Outcome::passed(self.name()),
            Some((kind, generated)) => {
                let message = self.custom_message.clone().unwrap_or(generated);
                Outcome::failed(
                    self.name(),
                    message.clone(),
                    vec![Failure {
                        rule_name: self.name().to_owned(),
                        operands,
                        operator: operator.name().to_owned(),
                        message,
                        kind,
                    }],
                )
            }
        })
    }

    fn ready_parts(&self) -> RulesResult<(Operator, &Operand, Option<&Operand>)> {
        let missing = self.missing_fields();
        match (self.operator, self.a.as_ref()) {
            (Some(operator), Some(a)) if missing.is_empty() => Ok((operator, a, self.b.as_ref())),
            (Some(operator), Some(_)) => Err(RulesError::MissingOperand {
                rule: self.name().to_owned(),
                operator: operator.name().to_owned(),
            }),
            _ => Err(RulesError::Configuration {
                rule: self.name().to_owned(),
                missing: missing.join(", "),
            }),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.operator.is_none() {
            missing.push("operator");
        }
        if self.a.is_none() {
            missing.push("a");
        }
        if self.operator.is_some_and(Operator::is_semantic) && self.b.is_none() {
            missing.push("b");
        }
        missing
    }

    fn clear_verdict(&mut self) {
        self.evaluated = false;
        self.is_valid = true;
        self.error_message = None;
    }
}
