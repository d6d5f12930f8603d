use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::ParamValue;
use crate::error::{RulesError, RulesResult};

/// Arity class of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    /// Unary predicate over operand `a`.
    Syntactic,
    /// Binary predicate comparing operand `a` with operand `b`.
    Semantic,
}

/// How `matches-pattern` applies a regex to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternMode {
    /// A match anywhere in the value satisfies the pattern.
    #[default]
    Search,
    /// The match must start at the beginning of the value.
    Anchored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    IsNone,
    IsNotNone,
    IsEmpty,
    IsNotEmpty,
    IsBoolean,
    IsInteger,
    IsNumber,
    IsString,
    IsLess,
    IsLessOrEqual,
    IsGreater,
    IsGreaterOrEqual,
    MatchesPattern,
}

impl Operator {
    pub const SYNTACTIC: [Operator; 8] = [
        Self::IsNone,
        Self::IsNotNone,
        Self::IsEmpty,
        Self::IsNotEmpty,
        Self::IsBoolean,
        Self::IsInteger,
        Self::IsNumber,
        Self::IsString,
    ];

    pub const SEMANTIC: [Operator; 5] = [
        Self::IsLess,
        Self::IsLessOrEqual,
        Self::IsGreater,
        Self::IsGreaterOrEqual,
        Self::MatchesPattern,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::IsNone => "is-none",
            Self::IsNotNone => "is-not-none",
            Self::IsEmpty => "is-empty",
            Self::IsNotEmpty => "is-not-empty",
            Self::IsBoolean => "is-boolean",
            Self::IsInteger => "is-integer",
            Self::IsNumber => "is-number",
            Self::IsString => "is-string",
            Self::IsLess => "is-less",
            Self::IsLessOrEqual => "is-less-or-equal",
            Self::IsGreater => "is-greater",
            Self::IsGreaterOrEqual => "is-greater-or-equal",
            Self::MatchesPattern => "matches-pattern",
        }
    }

    /// Legacy snake_case spelling accepted by registry lookups.
    #[must_use]
    pub fn alias(self) -> &'static str {
        match self {
            Self::IsNone => "is_none",
            Self::IsNotNone => "is_not_none",
            Self::IsEmpty => "is_empty",
            Self::IsNotEmpty => "is_not_empty",
            Self::IsBoolean => "is_bool",
            Self::IsInteger => "is_integer",
            Self::IsNumber => "is_number",
            Self::IsString => "is_string",
            Self::IsLess => "is_less",
            Self::IsLessOrEqual => "is_less_equal",
            Self::IsGreater => "is_greater",
            Self::IsGreaterOrEqual => "is_greater_equal",
            Self::MatchesPattern => "is_match",
        }
    }

    #[must_use]
    pub fn kind(self) -> OperatorKind {
        match self {
            Self::IsLess
            | Self::IsLessOrEqual
            | Self::IsGreater
            | Self::IsGreaterOrEqual
            | Self::MatchesPattern => OperatorKind::Semantic,
            _ => OperatorKind::Syntactic,
        }
    }

    #[must_use]
    pub fn is_semantic(self) -> bool {
        self.kind() == OperatorKind::Semantic
    }

    /// Expectation wording used in failure messages, e.g. `must be greater than`.
    #[must_use]
    pub fn expectation(self) -> &'static str {
        match self {
            Self::IsNone => "must be none",
            Self::IsNotNone => "must not be none",
            Self::IsEmpty => "must be empty",
            Self::IsNotEmpty => "must not be empty",
            Self::IsBoolean => "must be a boolean",
            Self::IsInteger => "must be an integer",
            Self::IsNumber => "must be a number",
            Self::IsString => "must be a string",
            Self::IsLess => "must be less than",
            Self::IsLessOrEqual => "must be less than or equal to",
            Self::IsGreater => "must be greater than",
            Self::IsGreaterOrEqual => "must be greater than or equal to",
            Self::MatchesPattern => "must match pattern",
        }
    }

    /// Applies the predicate. Syntactic operators ignore `b`.
    ///
    /// Returns `TypeMismatch` when the operands cannot be compared by this
    /// operator and `InvalidPattern` when `b` is not a valid regex.
    pub fn apply(self, a: &ParamValue, b: &ParamValue, mode: PatternMode) -> RulesResult<bool> {
        let verdict = match self {
            Self::IsNone => a.is_none(),
            Self::IsNotNone => !a.is_none(),
            Self::IsEmpty => is_empty(a),
            Self::IsNotEmpty => !is_empty(a),
            Self::IsBoolean => matches!(a, ParamValue::Bool(_)),
            Self::IsInteger => matches!(a, ParamValue::Int(_)),
            Self::IsNumber => a.as_f64().is_some(),
            Self::IsString => matches!(a, ParamValue::Str(_)),
            Self::IsLess => self.compare(a, b)? == Some(Ordering::Less),
            Self::IsLessOrEqual => matches!(
                self.compare(a, b)?,
                Some(Ordering::Less | Ordering::Equal)
            ),
            Self::IsGreater => self.compare(a, b)? == Some(Ordering::Greater),
            Self::IsGreaterOrEqual => matches!(
                self.compare(a, b)?,
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::MatchesPattern => match (a, b) {
                (ParamValue::Str(value), ParamValue::Str(pattern)) => {
                    pattern_matches(pattern, value, mode)?
                }
                _ => return Err(self.mismatch(a, b)),
            },
        };
        Ok(verdict)
    }

    fn compare(self, a: &ParamValue, b: &ParamValue) -> RulesResult<Option<Ordering>> {
        // NaN yields no ordering and therefore never satisfies a comparison.
        match (a, b) {
            (ParamValue::Int(left), ParamValue::Int(right)) => Ok(Some(left.cmp(right))),
            (ParamValue::Int(left), ParamValue::Float(right)) => Ok(cmp_int_float(*left, *right)),
            (ParamValue::Float(left), ParamValue::Int(right)) => {
                Ok(cmp_int_float(*right, *left).map(Ordering::reverse))
            }
            (ParamValue::Float(left), ParamValue::Float(right)) => Ok(left.partial_cmp(right)),
            (ParamValue::Str(left), ParamValue::Str(right)) => Ok(Some(left.cmp(right))),
            _ => Err(self.mismatch(a, b)),
        }
    }

    fn mismatch(self, a: &ParamValue, b: &ParamValue) -> RulesError {
        RulesError::TypeMismatch {
            operator: self.name().to_owned(),
            detail: format!("{} ({}) with {} ({})", a, a.kind(), b, b.kind()),
        }
    }
}

/// Orders an integer against a float without widening the integer, so values
/// beyond 2^53 keep their exact ordering.
fn cmp_int_float(int: i64, float: f64) -> Option<Ordering> {
    // 2^63, the first float above i64::MAX.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return None;
    }
    if float >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if float < -I64_BOUND {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    // In range and integral, so the cast is exact.
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        ordering => Some(ordering),
    }
}

fn is_empty(value: &ParamValue) -> bool {
    match value {
        ParamValue::None => true,
        ParamValue::Str(text) => text.is_empty(),
        ParamValue::List(values) => values.is_empty(),
        ParamValue::Bool(_) | ParamValue::Int(_) | ParamValue::Float(_) => false,
    }
}

/// Tests `value` against a regex `pattern` using the given mode.
pub fn pattern_matches(pattern: &str, value: &str, mode: PatternMode) -> RulesResult<bool> {
    let regex = Regex::new(pattern).map_err(|source| RulesError::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    })?;
    Ok(match mode {
        PatternMode::Search => regex.is_match(value),
        PatternMode::Anchored => regex.find(value).is_some_and(|found| found.start() == 0),
    })
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = RulesError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        OperatorRegistry::lookup(name)
    }
}

/// Fixed catalog of the operators a rule may use.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperatorRegistry;

impl OperatorRegistry {
    /// Resolves a canonical (`is-greater`) or legacy (`is_greater`) operator name.
    pub fn lookup(name: &str) -> RulesResult<Operator> {
        let name = name.trim();
        Self::all()
            .find(|operator| operator.name() == name || operator.alias() == name)
            .ok_or_else(|| RulesError::UnknownOperator {
                name: name.to_owned(),
            })
    }

    #[must_use]
    pub fn contains(name: &str) -> bool {
        Self::lookup(name).is_ok()
    }

    pub fn all() -> impl Iterator<Item = Operator> {
        Operator::SYNTACTIC
            .into_iter()
            .chain(Operator::SEMANTIC)
    }

    #[must_use]
    pub fn syntactic() -> &'static [Operator] {
        &Operator::SYNTACTIC
    }

    #[must_use]
    pub fn semantic() -> &'static [Operator] {
        &Operator::SEMANTIC
    }
}

#[cfg(test)]
mod tests {
    use super::{Operator, OperatorKind, OperatorRegistry, PatternMode};
    use crate::core::ParamValue;
    use crate::error::RulesError;

    #[test]
    fn registry_partitions_catalog() {
        assert_eq!(OperatorRegistry::all().count(), 13);
        assert!(
            OperatorRegistry::syntactic()
                .iter()
                .all(|operator| operator.kind() == OperatorKind::Syntactic)
        );
        assert!(
            OperatorRegistry::semantic()
                .iter()
                .all(|operator| operator.kind() == OperatorKind::Semantic)
        );
    }

    #[test]
    fn lookup_accepts_canonical_and_legacy_names() {
        assert_eq!(
            OperatorRegistry::lookup("is-greater-or-equal").expect("canonical"),
            Operator::IsGreaterOrEqual
        );
        assert_eq!(
            OperatorRegistry::lookup("is_bool").expect("legacy"),
            Operator::IsBoolean
        );
        assert_eq!("is_match".parse::<Operator>().expect("legacy"), Operator::MatchesPattern);
    }

    #[test]
    fn lookup_rejects_unknown_names() {
        let err = OperatorRegistry::lookup("is-in").expect_err("unknown operator must fail");
        assert!(matches!(err, RulesError::UnknownOperator { ref name } if name == "is-in"));
    }

    #[test]
    fn ordering_compares_mixed_numbers() {
        let verdict = Operator::IsGreater
            .apply(&ParamValue::Float(2.5), &ParamValue::Int(2), PatternMode::Search)
            .expect("numbers compare");
        assert!(verdict);
    }

    #[test]
    fn ordering_between_int_and_float_is_exact_beyond_f64_precision() {
        let big = ParamValue::Int(9_007_199_254_740_993);
        let float = ParamValue::Float(9_007_199_254_740_992.0);
        let mode = PatternMode::Search;
        assert!(Operator::IsGreater.apply(&big, &float, mode).expect("numbers compare"));
        assert!(Operator::IsLess.apply(&float, &big, mode).expect("numbers compare"));
        assert!(
            !Operator::IsLessOrEqual
                .apply(&big, &float, mode)
                .expect("numbers compare")
        );
        assert!(
            Operator::IsGreaterOrEqual
                .apply(&ParamValue::Int(3), &ParamValue::Float(3.0), mode)
                .expect("numbers compare")
        );
        assert!(
            Operator::IsLess
                .apply(&ParamValue::Int(-3), &ParamValue::Float(-2.5), mode)
                .expect("numbers compare")
        );
        assert!(
            Operator::IsLess
                .apply(&ParamValue::Int(i64::MAX), &ParamValue::Float(f64::INFINITY), mode)
                .expect("numbers compare")
        );
        assert!(
            Operator::IsGreater
                .apply(&ParamValue::Int(i64::MIN), &ParamValue::Float(f64::NEG_INFINITY), mode)
                .expect("numbers compare")
        );
    }

    #[test]
    fn every_operator_has_true_and_false_cases() {
        use ParamValue::{Bool, Float, Int, List, None as Nil, Str};

        let text = |value: &str| Str(value.to_owned());
        let cases: Vec<(Operator, ParamValue, ParamValue, bool)> = vec![
            (Operator::IsNone, Nil, Nil, true),
            (Operator::IsNone, Int(0), Nil, false),
            (Operator::IsNotNone, text(""), Nil, true),
            (Operator::IsNotNone, Nil, Nil, false),
            (Operator::IsEmpty, Nil, Nil, true),
            (Operator::IsEmpty, List(vec![Int(1)]), Nil, false),
            (Operator::IsNotEmpty, text("x"), Nil, true),
            (Operator::IsNotEmpty, text(""), Nil, false),
            (Operator::IsBoolean, Bool(false), Nil, true),
            (Operator::IsBoolean, Int(1), Nil, false),
            (Operator::IsInteger, Int(7), Nil, true),
            (Operator::IsInteger, Float(1.0), Nil, false),
            (Operator::IsInteger, Bool(true), Nil, false),
            (Operator::IsNumber, Float(0.5), Nil, true),
            (Operator::IsNumber, Int(3), Nil, true),
            (Operator::IsNumber, Bool(true), Nil, false),
            (Operator::IsString, text("auto"), Nil, true),
            (Operator::IsString, Nil, Nil, false),
            (Operator::IsLess, Int(1), Int(2), true),
            (Operator::IsLess, Int(2), Int(2), false),
            (Operator::IsLessOrEqual, Int(2), Int(2), true),
            (Operator::IsLessOrEqual, Float(1.5), Int(1), false),
            (Operator::IsGreater, Float(2.5), Float(2.0), true),
            (Operator::IsGreater, Int(2), Int(2), false),
            (Operator::IsGreaterOrEqual, Int(2), Int(2), true),
            (Operator::IsGreaterOrEqual, Int(1), Float(1.5), false),
            (Operator::IsLess, text("apple"), text("banana"), true),
            (Operator::IsGreater, text("apple"), text("banana"), false),
            (Operator::IsLessOrEqual, text("b"), text("b"), true),
            (Operator::MatchesPattern, text("paper"), text("^pa"), true),
            (Operator::MatchesPattern, text("container"), text("^pa"), false),
        ];

        for (operator, a, b, expected) in &cases {
            let verdict = operator
                .apply(a, b, PatternMode::Search)
                .unwrap_or_else(|err| panic!("{operator} on {a} and {b}: {err}"));
            assert_eq!(verdict, *expected, "{operator} on {a} and {b}");
        }
        for operator in OperatorRegistry::all() {
            for outcome in [true, false] {
                assert!(
                    cases
                        .iter()
                        .any(|(covered, _, _, expected)| *covered == operator && *expected == outcome),
                    "{operator} lacks a {outcome} case"
                );
            }
        }
    }

    #[test]
    fn ordering_rejects_non_numeric_operands() {
        let err = Operator::IsLess
            .apply(&ParamValue::from("hello"), &ParamValue::Int(5), PatternMode::Search)
            .expect_err("string vs number must mismatch");
        assert!(matches!(err, RulesError::TypeMismatch { .. }));
    }

    #[test]
    fn nan_never_satisfies_an_ordering() {
        for operator in [Operator::IsLess, Operator::IsGreaterOrEqual] {
            let verdict = operator
                .apply(&ParamValue::Float(f64::NAN), &ParamValue::Int(1), PatternMode::Search)
                .expect("nan is numeric");
            assert!(!verdict);
        }
    }

    #[test]
    fn empty_covers_none_strings_and_lists() {
        let none = ParamValue::None;
        assert!(Operator::IsEmpty.apply(&ParamValue::from(""), &none, PatternMode::Search).expect("unary"));
        assert!(Operator::IsEmpty.apply(&ParamValue::List(Vec::new()), &none, PatternMode::Search).expect("unary"));
        assert!(Operator::IsNotEmpty.apply(&ParamValue::Int(0), &none, PatternMode::Search).expect("unary"));
    }

    #[test]
    fn pattern_mode_controls_anchoring() {
        let value = ParamValue::from("color: #fff");
        let pattern = ParamValue::from("#[a-f0-9]{3}");
        assert!(
            Operator::MatchesPattern
                .apply(&value, &pattern, PatternMode::Search)
                .expect("valid pattern")
        );
        assert!(
            !Operator::MatchesPattern
                .apply(&value, &pattern, PatternMode::Anchored)
                .expect("valid pattern")
        );
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = Operator::MatchesPattern
            .apply(&ParamValue::from("x"), &ParamValue::from("("), PatternMode::Search)
            .expect_err("invalid regex must fail");
        assert!(matches!(err, RulesError::InvalidPattern { .. }));
    }
}
