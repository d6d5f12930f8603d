use crate::core::Target;
use crate::error::RulesResult;

use super::{Failure, Rule, RuleSet, ValidationReport};

/// Child of a [`RuleSet`]: either a leaf rule or a nested rule set.
#[derive(Debug, Clone)]
pub enum RuleNode {
    Rule(Rule),
    Set(RuleSet),
}

impl RuleNode {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Rule(rule) => rule.name(),
            Self::Set(set) => set.name(),
        }
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    #[must_use]
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Self::Rule(rule) => Some(rule),
            Self::Set(_) => None,
        }
    }

    #[must_use]
    pub fn as_rule_set(&self) -> Option<&RuleSet> {
        match self {
            Self::Rule(_) => None,
            Self::Set(set) => Some(set),
        }
    }

    pub fn as_rule_mut(&mut self) -> Option<&mut Rule> {
        match self {
            Self::Rule(rule) => Some(rule),
            Self::Set(_) => None,
        }
    }

    pub fn as_rule_set_mut(&mut self) -> Option<&mut RuleSet> {
        match self {
            Self::Rule(_) => None,
            Self::Set(set) => Some(set),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Rule(rule) => rule.is_valid(),
            Self::Set(set) => set.is_valid(),
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Rule(rule) => rule.error_message(),
            Self::Set(set) => set.error_message(),
        }
    }

    pub fn check(&self, target: &dyn Target) -> RulesResult<ValidationReport> {
        Ok(self.evaluate(target)?.report)
    }

    pub fn validate(&mut self, target: &dyn Target) -> RulesResult<ValidationReport> {
        match self {
            Self::Rule(rule) => rule.validate(target),
            Self::Set(set) => set.validate(target),
        }
    }

    pub(crate) fn evaluate(&self, target: &dyn Target) -> RulesResult<Outcome> {
        match self {
            Self::Rule(rule) => rule.evaluate(target),
            Self::Set(set) => set.evaluate(target),
        }
    }

    pub(crate) fn record(&mut self, target: &dyn Target) -> RulesResult<Outcome> {
        match self {
            Self::Rule(rule) => rule.record(target),
            Self::Set(set) => set.record(target),
        }
    }
}

impl From<Rule> for RuleNode {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

impl From<RuleSet> for RuleNode {
    fn from(set: RuleSet) -> Self {
        Self::Set(set)
    }
}

/// Evaluation result of one node before it is handed out as a report.
#[derive(Debug, Clone)]
pub(crate) struct Outcome {
    pub(crate) name: String,
    pub(crate) report: ValidationReport,
    /// Message recorded as the node's `error_message`.
    pub(crate) message: Option<String>,
}

impl Outcome {
    pub(crate) fn passed(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            report: ValidationReport::passed(),
            message: None,
        }
    }

    pub(crate) fn failed(name: &str, message: String, failures: Vec<Failure>) -> Self {
        Self {
            name: name.to_owned(),
            report: ValidationReport::from_failures(failures),
            message: Some(message),
        }
    }
}
