//! canvas-rules: typed chart layout parameters and a rule validation engine.
//!
//! `canvas` holds the parameter store, `core` the value model and the read
//! contract rules evaluate against, and `validation` the rule engine itself.

pub mod canvas;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod validation;

pub use error::{RulesError, RulesResult};
pub use validation::{
    Logical, Operator, ParameterValidator, Rule, RuleContext, RuleNode, RuleSet, ValidationReport,
};
