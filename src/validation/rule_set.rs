use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::core::Target;
use crate::error::{RulesError, RulesResult};

use super::node::Outcome;
use super::{Failure, FailureKind, NodeIdentity, RuleContext, RuleNode, ValidationReport};

/// How a rule set folds the verdicts of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Logical {
    /// Every child must pass; vacuously true without children.
    #[default]
    All,
    /// At least one child must pass; false without children.
    Any,
    /// No child may pass.
    None,
}

impl Logical {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
            Self::None => "none",
        }
    }

    #[must_use]
    pub fn fold(self, verdicts: impl IntoIterator<Item = bool>) -> bool {
        let mut verdicts = verdicts.into_iter();
        match self {
            Self::All => verdicts.all(|valid| valid),
            Self::Any => verdicts.any(|valid| valid),
            Self::None => !verdicts.any(|valid| valid),
        }
    }
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Logical {
    type Err = RulesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "any" => Ok(Self::Any),
            "none" => Ok(Self::None),
            _ => Err(RulesError::InvalidLogical {
                value: value.to_owned(),
            }),
        }
    }
}

/// Composite validator over an ordered list of rules and nested rule sets.
#[derive(Debug, Clone)]
pub struct RuleSet {
    identity: NodeIdentity,
    logical: Logical,
    children: Vec<RuleNode>,
    is_valid: bool,
    error_message: Option<String>,
}

impl RuleSet {
    /// Creates an empty `ALL` rule set bound to `attribute` of `target`.
    pub fn new(context: &RuleContext, target: &dyn Target, attribute: &str) -> RulesResult<Self> {
        let sequence = context.next_rule_set_sequence();
        Ok(Self {
            identity: NodeIdentity::new(context, target, attribute, "rule_set", sequence)?,
            logical: Logical::All,
            children: Vec::new(),
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
    pub fn logical(&self) -> Logical {
        self.logical
    }

    pub fn set_logical(&mut self, logical: Logical) -> &mut Self {
        self.logical = logical;
        self.clear_verdict();
        self
    }

    /// Sets the combinator from `all`, `any` or `none`.
    pub fn set_logical_name(&mut self, logical: &str) -> RulesResult<&mut Self> {
        let logical = logical.parse()?;
        Ok(self.set_logical(logical))
    }

    #[must_use]
    pub fn with_logical(mut self, logical: Logical) -> Self {
        self.set_logical(logical);
        self
    }

    /// Appends a child, preserving insertion order.
    pub fn add(&mut self, child: impl Into<RuleNode>) -> &mut Self {
        let child = child.into();
        trace!(rule_set = %self.name(), child = %child.name(), "add child");
        self.children.push(child);
        self.clear_verdict();
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<RuleNode>) -> Self {
        self.add(child);
        self
    }

    /// Removes and returns the direct child named `name`.
    pub fn remove(&mut self, name: &str) -> RulesResult<RuleNode> {
        let position = self.position(name)?;
        self.clear_verdict();
        Ok(self.children.remove(position))
    }

    pub fn get(&self, name: &str) -> RulesResult<&RuleNode> {
        let position = self.position(name)?;
        Ok(&self.children[position])
    }

    pub fn get_mut(&mut self, name: &str) -> RulesResult<&mut RuleNode> {
        let position = self.position(name)?;
        self.clear_verdict();
        Ok(&mut self.children[position])
    }

    #[must_use]
    pub fn children(&self) -> &[RuleNode] {
        &self.children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
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

    /// Drops all children and restores the `ALL` combinator. Identity is kept.
    pub fn reset(&mut self) {
        self.children.clear();
        self.logical = Logical::All;
        self.clear_verdict();
    }

    /// Evaluates every child against `target` and folds the verdicts without
    /// recording anything on the nodes.
    ///
    /// A child's configuration error aborts the whole call.
    pub fn check(&self, target: &dyn Target) -> RulesResult<ValidationReport> {
        Ok(self.evaluate(target)?.report)
    }

    /// Like [`RuleSet::check`], but records verdicts on this set and on every
    /// descendant.
    ///
    /// Verdicts are only recorded once the whole tree evaluates without a
    /// configuration error; on error every node keeps its previous verdict.
    pub fn validate(&mut self, target: &dyn Target) -> RulesResult<ValidationReport> {
        self.evaluate(target)?;
        Ok(self.record(target)?.report)
    }

    pub(crate) fn evaluate(&self, target: &dyn Target) -> RulesResult<Outcome> {
        let children = self
            .children
            .iter()
            .map(|child| child.evaluate(target))
            .collect::<RulesResult<Vec<_>>>()?;
        Ok(self.fold(children))
    }

    pub(crate) fn record(&mut self, target: &dyn Target) -> RulesResult<Outcome> {
        self.clear_verdict();
        let children = self
            .children
            .iter_mut()
            .map(|child| child.record(target))
            .collect::<RulesResult<Vec<_>>>()?;
        let outcome = self.fold(children);
        self.is_valid = outcome.report.is_valid();
        self.error_message = outcome.message.clone();
        Ok(outcome)
    }

    fn fold(&self, children: Vec<Outcome>) -> Outcome {
        let valid = self
            .logical
            .fold(children.iter().map(|child| child.report.is_valid()));
        debug!(
            rule_set = %self.name(),
            logical = self.logical.name(),
            children = children.len(),
            valid,
            "validated rule set"
        );
        if valid {
            return Outcome::passed(self.name());
        }

        let no_children = children.is_empty();
        let mut failures = Vec::new();
        let mut messages = Vec::new();
        let mut offenders = Vec::new();
        for child in children {
            let child_valid = child.report.is_valid();
            match self.logical {
                Logical::All | Logical::Any if !child_valid => {
                    messages.extend(child.message);
                    failures.extend(child.report.into_failures());
                    offenders.push(child.name);
                }
                Logical::None if child_valid => {
                    let message = format!(
                        "`{}` passed but rule set `{}` requires that none pass",
                        child.name,
                        self.name()
                    );
                    failures.push(Failure {
                        rule_name: child.name.clone(),
                        operands: Vec::new(),
                        operator: Logical::None.name().to_owned(),
                        message: message.clone(),
                        kind: FailureKind::Unsatisfied,
                    });
                    messages.push(message);
                    offenders.push(child.name);
                }
                _ => {}
            }
        }

        let message = if no_children {
            format!(
                "validation rule set `{}` ({}) failed: no children",
                self.name(),
                self.logical
            )
        } else {
            format!(
                "validation rule set `{}` ({}) failed: {}",
                self.name(),
                self.logical,
                messages.join("; ")
            )
        };
        failures.push(Failure {
            rule_name: self.name().to_owned(),
            operands: offenders,
            operator: self.logical.name().to_owned(),
            message: message.clone(),
            kind: FailureKind::Unsatisfied,
        });
        Outcome::failed(self.name(), message, failures)
    }

    fn position(&self, name: &str) -> RulesResult<usize> {
        self.children
            .iter()
            .position(|child| child.name() == name)
            .ok_or_else(|| RulesError::NotFound {
                owner: self.name().to_owned(),
                name: name.to_owned(),
            })
    }

    fn clear_verdict(&mut self) {
        self.is_valid = true;
        self.error_message = None;
    }
}
