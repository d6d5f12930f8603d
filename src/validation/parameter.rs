use indexmap::IndexMap;
use tracing::debug;

use crate::core::{ParamValue, Target};
use crate::error::{RulesError, RulesResult};

use super::operator::pattern_matches;
use super::{Failure, FailureKind, PatternMode, RuleSet, ValidationReport};

/// Checks parameters against their store metadata and attached rule sets.
///
/// Per parameter, in order: type, allowed values, minimum, maximum, patterns,
/// then the attached rule set (if any). Unset values only go through the
/// type check and the rule set.
#[derive(Debug, Clone, Default)]
pub struct ParameterValidator {
    rules: IndexMap<String, RuleSet>,
    pattern_mode: PatternMode,
}

impl ParameterValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pattern_mode(mut self, mode: PatternMode) -> Self {
        self.pattern_mode = mode;
        self
    }

    /// Attaches a rule set to a parameter, replacing any previous one.
    pub fn attach(&mut self, parameter: impl Into<String>, rule_set: RuleSet) -> &mut Self {
        self.rules.insert(parameter.into(), rule_set);
        self
    }

    pub fn detach(&mut self, parameter: &str) -> RulesResult<RuleSet> {
        self.rules
            .shift_remove(parameter)
            .ok_or_else(|| RulesError::NotFound {
                owner: "ParameterValidator".to_owned(),
                name: parameter.to_owned(),
            })
    }

    #[must_use]
    pub fn rules(&self, parameter: &str) -> Option<&RuleSet> {
        self.rules.get(parameter)
    }

    pub fn validate_parameter(
        &self,
        target: &dyn Target,
        name: &str,
    ) -> RulesResult<ValidationReport> {
        let Some(value) = target.get_parameter(name) else {
            return Err(RulesError::UnknownAttribute {
                target: target.type_name().to_owned(),
                name: name.to_owned(),
            });
        };
        let check = ParameterCheck {
            rule_name: format!("{}.{name}", target.type_name()),
            name,
            value,
        };

        let mut failures = Vec::new();
        if let Some(expected) = target.get_type(name) {
            if !expected.accepts(value) {
                failures.push(check.failure(
                    "type",
                    format!(
                        "expected `{name}` to be of type {expected}, but observed a value of type {}",
                        value.kind()
                    ),
                ));
            }
        }

        if !value.is_none() {
            let allowed = target.get_allowed_values(name);
            if !allowed.is_empty() && !allowed.contains(value) {
                let allowed = allowed
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                failures.push(check.failure(
                    "allowed",
                    format!("{value} is invalid for `{name}`; allowed values include [{allowed}]"),
                ));
            }

            if let Some(number) = value.as_f64() {
                if let Some(min) = target.get_min_value(name) {
                    if number < min {
                        failures.push(check.failure(
                            "min",
                            format!("{value} must be greater than or equal to {min}"),
                        ));
                    }
                }
                if let Some(max) = target.get_max_value(name) {
                    if number > max {
                        failures.push(check.failure(
                            "max",
                            format!("{value} must be less than or equal to {max}"),
                        ));
                    }
                }
            }

            let patterns = target.get_patterns(name);
            if !patterns.is_empty() && !self.matches_any(value, patterns)? {
                failures.push(check.failure(
                    "pattern",
                    format!("{value} doesn't match any of the designated patterns"),
                ));
            }
        }

        let mut report = ValidationReport::from_failures(failures);
        if let Some(rule_set) = self.rules.get(name) {
            report = report.merge(rule_set.check(target)?);
        }
        debug!(
            component = target.type_name(),
            parameter = name,
            valid = report.is_valid(),
            "validated parameter"
        );
        Ok(report)
    }

    /// Validates every parameter the target exposes.
    pub fn validate_all(&self, target: &dyn Target) -> RulesResult<ValidationReport> {
        let mut report = ValidationReport::passed();
        for name in target.parameter_names() {
            report = report.merge(self.validate_parameter(target, name)?);
        }
        Ok(report)
    }

    fn matches_any(&self, value: &ParamValue, patterns: &[String]) -> RulesResult<bool> {
        let Some(text) = value.as_str() else {
            return Ok(false);
        };
        for pattern in patterns {
            if pattern_matches(pattern, text, self.pattern_mode)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

struct ParameterCheck<'a> {
    rule_name: String,
    name: &'a str,
    value: &'a ParamValue,
}

impl ParameterCheck<'_> {
    fn failure(&self, check: &str, message: String) -> Failure {
        Failure {
            rule_name: self.rule_name.clone(),
            operands: vec![self.name.to_owned(), self.value.to_string()],
            operator: check.to_owned(),
            message,
            kind: FailureKind::ParameterCheck,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ParameterValidator;
    use crate::canvas::title_component;
    use crate::error::RulesError;
    use crate::validation::{FailureKind, Operator, Rule, RuleContext, RuleSet};

    #[test]
    fn defaults_of_title_component_are_valid() {
        let report = ParameterValidator::new()
            .validate_all(&title_component())
            .expect("valid patterns");
        assert!(report.is_valid(), "{}", report.summary());
    }

    #[test]
    fn each_check_reports_its_own_failure() {
        let mut title = title_component();
        title.set_parameter("title_x", 1.5).expect("known parameter");
        title.set_parameter("title_xref", "margin").expect("known parameter");
        title.set_parameter("title_pad_top", -3).expect("known parameter");
        title.set_parameter("title_font_size", "large").expect("known parameter");
        title.set_parameter("title_font_color", "blue").expect("known parameter");

        let report = ParameterValidator::new()
            .validate_all(&title)
            .expect("valid patterns");
        let checks: Vec<&str> = report
            .failures()
            .iter()
            .map(|failure| failure.operator.as_str())
            .collect();
        assert_eq!(checks, vec!["type", "pattern", "max", "allowed", "min"]);
        assert!(
            report
                .failures()
                .iter()
                .all(|failure| failure.kind == FailureKind::ParameterCheck)
        );
    }

    #[test]
    fn hex_and_functional_colors_match_patterns() {
        let mut title = title_component();
        let validator = ParameterValidator::new();
        for color in ["#a0b1c2", "rgba(10,20,30,0.5)", "var(--accent)"] {
            title.set_parameter("title_font_color", color).expect("known parameter");
            let report = validator
                .validate_parameter(&title, "title_font_color")
                .expect("valid patterns");
            assert!(report.is_valid(), "{color}: {}", report.summary());
        }
    }

    #[test]
    fn attached_rule_set_is_evaluated() {
        let context = RuleContext::default();
        let title = title_component();
        let rule = Rule::new(&context, &title, "title_x")
            .expect("known attribute")
            .with_a("title_x")
            .with_b("title_y")
            .with_operator(Operator::IsGreater);
        let rule_set = RuleSet::new(&context, &title, "title_x")
            .expect("known attribute")
            .with_child(rule);

        let mut validator = ParameterValidator::new();
        validator.attach("title_x", rule_set);
        let report = validator
            .validate_parameter(&title, "title_x")
            .expect("configured rules");
        assert!(!report.is_valid());
        assert_eq!(report.failures().len(), 2);
    }

    #[test]
    fn unknown_parameter_is_an_error() {
        let err = ParameterValidator::new()
            .validate_parameter(&title_component(), "title_z")
            .expect_err("unknown parameter");
        assert!(matches!(err, RulesError::UnknownAttribute { .. }));
    }
}
