//! Rule validation engine.
//!
//! [`Rule`] is the leaf validator and [`RuleSet`] the composite; both are
//! constructed through an explicit [`RuleContext`] and evaluated against a
//! [`crate::core::Target`] passed at call time. `check` evaluates without
//! touching the nodes, `validate` additionally records each node's verdict.

mod context;
pub mod json_contract;
mod node;
pub mod operator;
pub mod parameter;
mod report;
mod rule;
mod rule_set;

pub use context::{NodeIdentity, RuleContext, RuleContextConfig};
pub use json_contract::{VALIDATION_REPORT_JSON_SCHEMA_V1, ValidationReportJsonContractV1};
pub use node::RuleNode;
pub use operator::{Operator, OperatorKind, OperatorRegistry, PatternMode};
pub use parameter::ParameterValidator;
pub use report::{Failure, FailureKind, ValidationReport};
pub use rule::{Rule, RuleState};
pub use rule_set::{Logical, RuleSet};
