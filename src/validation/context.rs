use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::Target;
use crate::error::{RulesError, RulesResult};

use super::PatternMode;

/// Settings shared by every rule node built from one [`RuleContext`].
///
/// This type is serializable so host applications can keep rule settings
/// next to the rest of their chart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleContextConfig {
    /// Recorded on each node as its creator.
    pub creator: Option<String>,
    pub pattern_mode: PatternMode,
    /// First sequence number handed out to rules.
    pub rule_sequence_start: u64,
    /// First sequence number handed out to rule sets.
    pub rule_set_sequence_start: u64,
}

impl RuleContextConfig {
    #[must_use]
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    #[must_use]
    pub fn with_pattern_mode(mut self, mode: PatternMode) -> Self {
        self.pattern_mode = mode;
        self
    }

    /// Sets the first sequence numbers used in generated rule and rule set names.
    #[must_use]
    pub fn with_sequence_start(mut self, rule: u64, rule_set: u64) -> Self {
        self.rule_sequence_start = rule;
        self.rule_set_sequence_start = rule_set;
        self
    }
}

/// Construction context for rules and rule sets.
///
/// Holds the name sequence counters explicitly instead of keeping them in
/// process-wide state. The counters are atomic, so one context can be shared
/// by reference across threads.
#[derive(Debug)]
pub struct RuleContext {
    config: RuleContextConfig,
    next_rule: AtomicU64,
    next_rule_set: AtomicU64,
}

impl RuleContext {
    #[must_use]
    pub fn new(config: RuleContextConfig) -> Self {
        Self {
            next_rule: AtomicU64::new(config.rule_sequence_start),
            next_rule_set: AtomicU64::new(config.rule_set_sequence_start),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RuleContextConfig {
        &self.config
    }

    #[must_use]
    pub fn pattern_mode(&self) -> PatternMode {
        self.config.pattern_mode
    }

    pub(crate) fn next_rule_sequence(&self) -> u64 {
        self.next_rule.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn next_rule_set_sequence(&self) -> u64 {
        self.next_rule_set.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for RuleContext {
    fn default() -> Self {
        Self::new(RuleContextConfig::default())
    }
}

/// Identity and binding shared by rules and rule sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdentity {
    pub id: Uuid,
    pub name: String,
    pub created: DateTime<Utc>,
    pub creator: Option<String>,
    pub target_type: String,
    pub attribute: String,
}

impl NodeIdentity {
    pub(crate) fn new(
        context: &RuleContext,
        target: &dyn Target,
        attribute: &str,
        label: &str,
        sequence: u64,
    ) -> RulesResult<Self> {
        if !target.has_parameter(attribute) {
            return Err(RulesError::UnknownAttribute {
                target: target.type_name().to_owned(),
                name: attribute.to_owned(),
            });
        }
        let target_type = target.type_name().to_owned();
        Ok(Self {
            id: Uuid::new_v4(),
            name: format!("{target_type}_{attribute}_{label}_#_{sequence}"),
            created: Utc::now(),
            creator: context.config.creator.clone(),
            target_type,
            attribute: attribute.to_owned(),
        })
    }
}
