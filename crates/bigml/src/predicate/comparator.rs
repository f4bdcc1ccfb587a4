//! Predicate → comparator translation.
//!
//! A [`Comparator`] is the executable form of a predicate: it holds the field
//! slot and the operand by value and answers `evaluate(record) -> bool`.
//! Comparators only implement the non-missing branch; a record that lacks the
//! field never matches. Combining the missing-value flag with a presence check
//! is the tree walker's job.
//!
//! Operand typing follows the bound field's declared type, for every operator:
//! text fields compare as strings, numeric fields compare as numbers.

use super::binding::{Bindings, FieldType, Record};
use super::model::{FieldTest, Predicate};
use super::operator::Operator;
use super::value::PredicateValue;
use crate::config::{CoercionPolicy, EvaluatorConfig};
use crate::error::PredicateError;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Right-hand side of a comparison, typed by the bound field.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Text(String),
}

/// Field slot plus operand shared by every non-constant comparator.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldComparison {
    pub field: String,
    pub operand: Operand,
    /// Carried from the predicate's missing-value marker
    pub accepts_missing: bool,
}

enum Outcome {
    /// Field missing, or the record value cannot be read as the operand type
    Unavailable,
    Ordered(Ordering),
    /// NaN on either side
    Unordered,
}

impl FieldComparison {
    fn compare<R: Record + ?Sized>(&self, record: &R) -> Outcome {
        let Some(value) = record.value(&self.field) else {
            return Outcome::Unavailable;
        };
        match &self.operand {
            Operand::Number(operand) => match value.as_number() {
                Some(v) => v
                    .partial_cmp(operand)
                    .map_or(Outcome::Unordered, Outcome::Ordered),
                None => Outcome::Unavailable,
            },
            Operand::Text(operand) => {
                Outcome::Ordered(<str as Ord>::cmp(&value.as_text(), operand))
            }
        }
    }
}

/// Executable boolean test built from a predicate and a binding map.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparator {
    Constant(bool),
    GreaterThan(FieldComparison),
    GreaterOrEqual(FieldComparison),
    LessThan(FieldComparison),
    LessOrEqual(FieldComparison),
    Equal(FieldComparison),
    NotEqual(FieldComparison),
}

impl Comparator {
    /// Compile with the default evaluator (zero-substitution coercion).
    pub fn compile(predicate: &Predicate, bindings: &Bindings) -> Result<Self, PredicateError> {
        PredicateEvaluator::default().evaluate(predicate, bindings)
    }

    fn comparison(&self) -> Option<&FieldComparison> {
        match self {
            Comparator::Constant(_) => None,
            Comparator::GreaterThan(c)
            | Comparator::GreaterOrEqual(c)
            | Comparator::LessThan(c)
            | Comparator::LessOrEqual(c)
            | Comparator::Equal(c)
            | Comparator::NotEqual(c) => Some(c),
        }
    }

    /// Field the comparator reads, `None` for constants.
    pub fn field(&self) -> Option<&str> {
        self.comparison().map(|c| c.field.as_str())
    }

    pub fn operand(&self) -> Option<&Operand> {
        self.comparison().map(|c| &c.operand)
    }

    /// Whether the originating predicate also accepts a missing field.
    pub fn accepts_missing(&self) -> bool {
        self.comparison().is_some_and(|c| c.accepts_missing)
    }

    /// Evaluate against a record.
    pub fn evaluate<R: Record + ?Sized>(&self, record: &R) -> bool {
        let (comparison, accept): (&FieldComparison, fn(Ordering) -> bool) = match self {
            Comparator::Constant(constant) => return *constant,
            Comparator::GreaterThan(c) => (c, |o| o == Ordering::Greater),
            Comparator::GreaterOrEqual(c) => (c, |o| o != Ordering::Less),
            Comparator::LessThan(c) => (c, |o| o == Ordering::Less),
            Comparator::LessOrEqual(c) => (c, |o| o != Ordering::Greater),
            Comparator::Equal(c) => (c, |o| o == Ordering::Equal),
            Comparator::NotEqual(c) => (c, |o| o != Ordering::Equal),
        };

        match comparison.compare(record) {
            Outcome::Unavailable => false,
            Outcome::Unordered => matches!(self, Comparator::NotEqual(_)),
            Outcome::Ordered(ordering) => accept(ordering),
        }
    }
}

/// Turns predicates into comparators under a coercion policy.
#[derive(Debug, Clone, Default)]
pub struct PredicateEvaluator {
    coercion: CoercionPolicy,
}

impl PredicateEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EvaluatorConfig) -> Self {
        Self {
            coercion: config.coercion,
        }
    }

    pub fn with_coercion(coercion: CoercionPolicy) -> Self {
        Self { coercion }
    }

    pub fn coercion(&self) -> CoercionPolicy {
        self.coercion
    }

    /// Build the comparator for `predicate`.
    ///
    /// Leaves never consult `bindings`. For field tests the binding is resolved
    /// first, then the operator, then the operand.
    pub fn evaluate(
        &self,
        predicate: &Predicate,
        bindings: &Bindings,
    ) -> Result<Comparator, PredicateError> {
        let test = match predicate {
            Predicate::Constant(constant) => return Ok(Comparator::Constant(*constant)),
            Predicate::Test(test) => test,
        };

        let binding = bindings.resolve(&test.field)?;
        let operator: Operator = test.operator.parse()?;
        let operand = self.operand(test, binding.field_type)?;

        debug!(
            field = %test.field,
            operator = %operator,
            missing = test.missing,
            "Compiled predicate"
        );

        let comparison = FieldComparison {
            field: test.field.clone(),
            operand,
            accepts_missing: test.missing,
        };
        Ok(match operator {
            Operator::GreaterThan => Comparator::GreaterThan(comparison),
            Operator::GreaterOrEqual => Comparator::GreaterOrEqual(comparison),
            Operator::LessThan => Comparator::LessThan(comparison),
            Operator::LessOrEqual => Comparator::LessOrEqual(comparison),
            Operator::Equal => Comparator::Equal(comparison),
            Operator::NotEqual => Comparator::NotEqual(comparison),
        })
    }

    fn operand(&self, test: &FieldTest, field_type: FieldType) -> Result<Operand, PredicateError> {
        let value = test.value.as_ref().ok_or_else(|| {
            PredicateError::MalformedPredicate(format!(
                "predicate on '{}' has no value",
                test.field
            ))
        })?;

        match field_type {
            FieldType::Text => Ok(Operand::Text(value.as_text().into_owned())),
            FieldType::Numeric => match value.as_number() {
                Some(n) => Ok(Operand::Number(n)),
                None => self.coerce(test, value),
            },
        }
    }

    fn coerce(&self, test: &FieldTest, value: &PredicateValue) -> Result<Operand, PredicateError> {
        match self.coercion {
            CoercionPolicy::Zero => {
                warn!(
                    field = %test.field,
                    value = %value,
                    "Non-numeric value for numeric field, comparing against 0"
                );
                Ok(Operand::Number(0.0))
            }
            CoercionPolicy::Reject => Err(PredicateError::ValueCoercion {
                field: test.field.clone(),
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::value::FieldValue;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;
    use tracing_test::traced_test;

    fn numeric_bindings() -> Bindings {
        Bindings::new().with("age", FieldType::Numeric)
    }

    fn record(field: &str, value: impl Into<FieldValue>) -> HashMap<String, FieldValue> {
        HashMap::from([(field.to_string(), value.into())])
    }

    fn parse(doc: serde_json::Value) -> Predicate {
        Predicate::from_json(&doc).unwrap()
    }

    #[test]
    fn test_leaf_is_constant() {
        let empty = Bindings::new();
        let no_fields: HashMap<String, FieldValue> = HashMap::new();

        let comparator = Comparator::compile(&parse(json!(true)), &empty).unwrap();
        assert_eq!(comparator, Comparator::Constant(true));
        assert!(comparator.evaluate(&no_fields));
        assert!(comparator.evaluate(&record("age", 1.0)));

        let comparator = Comparator::compile(&parse(json!(false)), &numeric_bindings()).unwrap();
        assert!(!comparator.evaluate(&record("age", 1.0)));
        assert_eq!(comparator.field(), None);
        assert!(!comparator.accepts_missing());
    }

    #[test]
    fn test_unknown_field() {
        let predicate = parse(json!({"field": "height", "operator": ">", "value": 1}));
        assert_eq!(
            Comparator::compile(&predicate, &numeric_bindings()).unwrap_err(),
            PredicateError::UnknownField("height".to_string())
        );
    }

    #[test]
    fn test_unknown_field_reported_before_operator() {
        let predicate = parse(json!({"field": "height", "operator": "~", "value": 1}));
        assert!(matches!(
            Comparator::compile(&predicate, &numeric_bindings()),
            Err(PredicateError::UnknownField(_))
        ));
    }

    #[test]
    fn test_unknown_operator() {
        let predicate = parse(json!({"field": "age", "operator": "=>*", "value": 1}));
        assert_eq!(
            Comparator::compile(&predicate, &numeric_bindings()).unwrap_err(),
            PredicateError::UnknownOperator("=>*".to_string())
        );
    }

    #[test]
    fn test_missing_value_is_malformed() {
        let predicate = parse(json!({"field": "age", "operator": ">"}));
        assert!(matches!(
            Comparator::compile(&predicate, &numeric_bindings()),
            Err(PredicateError::MalformedPredicate(_))
        ));
    }

    #[test]
    fn test_greater_or_equal_scenario() {
        let predicate = parse(json!({"field": "age", "operator": ">=", "value": 30}));
        let comparator = Comparator::compile(&predicate, &numeric_bindings()).unwrap();

        assert!(comparator.evaluate(&record("age", 35.0)));
        assert!(comparator.evaluate(&record("age", 30.0)));
        assert!(!comparator.evaluate(&record("age", 29.9)));
    }

    #[test]
    fn test_each_numeric_operator() {
        let bindings = numeric_bindings();
        let cases = [
            (">", [false, false, true]),
            (">=", [false, true, true]),
            ("<", [true, false, false]),
            ("<=", [true, true, false]),
            ("=", [false, true, false]),
            ("!=", [true, false, true]),
            ("<>", [true, false, true]),
        ];

        for (op, expected) in cases {
            let predicate = parse(json!({"field": "age", "operator": op, "value": 10}));
            let comparator = Comparator::compile(&predicate, &bindings).unwrap();
            for (value, want) in [9.0, 10.0, 11.0].into_iter().zip(expected) {
                assert_eq!(
                    comparator.evaluate(&record("age", value)),
                    want,
                    "age {op} 10 with age = {value}"
                );
            }
        }
    }

    #[test]
    fn test_missing_marker_carried_but_not_applied() {
        let predicate = parse(json!({"field": "age", "operator": "<*", "value": 18}));
        let comparator = Comparator::compile(&predicate, &numeric_bindings()).unwrap();

        assert!(comparator.accepts_missing());
        assert!(comparator.evaluate(&record("age", 10.0)));
        assert!(!comparator.evaluate(&HashMap::<String, FieldValue>::new()));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let predicate = parse(json!({"field": "age", "operator": "!=", "value": 18}));
        let comparator = Comparator::compile(&predicate, &numeric_bindings()).unwrap();
        assert!(!comparator.evaluate(&record("other", 1.0)));
    }

    #[test]
    fn test_numeric_string_literal_parsed() {
        let predicate = parse(json!({"field": "age", "operator": ">", "value": "21.5"}));
        let comparator = Comparator::compile(&predicate, &numeric_bindings()).unwrap();

        assert_eq!(comparator.operand(), Some(&Operand::Number(21.5)));
        assert!(comparator.evaluate(&record("age", 22.0)));
        assert!(!comparator.evaluate(&record("age", 21.0)));
    }

    #[test]
    fn test_text_record_value_on_numeric_field() {
        let predicate = parse(json!({"field": "age", "operator": ">", "value": 20}));
        let comparator = Comparator::compile(&predicate, &numeric_bindings()).unwrap();

        assert!(comparator.evaluate(&record("age", "25")));
        assert!(!comparator.evaluate(&record("age", "unknown")));
    }

    #[test]
    fn test_text_field_equality_uses_literal() {
        let bindings = Bindings::new().with("zip", FieldType::Text);

        // "01234" would become 1234 if coerced to a number
        let predicate = parse(json!({"field": "zip", "operator": "=", "value": "01234"}));
        let comparator = Comparator::compile(&predicate, &bindings).unwrap();
        assert_eq!(
            comparator.operand(),
            Some(&Operand::Text("01234".to_string()))
        );
        assert!(comparator.evaluate(&record("zip", "01234")));
        assert!(!comparator.evaluate(&record("zip", "1234")));

        let predicate = parse(json!({"field": "zip", "operator": "!=", "value": "01234"}));
        let comparator = Comparator::compile(&predicate, &bindings).unwrap();
        assert!(!comparator.evaluate(&record("zip", "01234")));
        assert!(comparator.evaluate(&record("zip", "1234")));
    }

    #[test]
    fn test_each_text_operator_is_lexicographic() {
        let bindings = Bindings::new().with("grade", FieldType::Text);
        // "9" sorts after "10" as text but before it as a number
        let cases = [
            (">", [false, false, true]),
            (">=", [false, true, true]),
            ("<", [true, false, false]),
            ("<=", [true, true, false]),
            ("=", [false, true, false]),
            ("!=", [true, false, true]),
        ];

        for (op, expected) in cases {
            let predicate = parse(json!({"field": "grade", "operator": op, "value": "10"}));
            let comparator = Comparator::compile(&predicate, &bindings).unwrap();
            for (value, want) in ["1", "10", "9"].into_iter().zip(expected) {
                assert_eq!(
                    comparator.evaluate(&record("grade", value)),
                    want,
                    "grade {op} \"10\" with grade = {value:?}"
                );
            }
        }
    }

    #[test]
    fn test_numeric_literal_orders_text_field_as_text() {
        let bindings = Bindings::new().with("grade", FieldType::Text);
        let predicate = parse(json!({"field": "grade", "operator": ">=", "value": 10}));
        let comparator = Comparator::compile(&predicate, &bindings).unwrap();

        assert!(comparator.evaluate(&record("grade", "9")));
        assert!(comparator.evaluate(&record("grade", 9.0)));
        assert!(!comparator.evaluate(&record("grade", "1")));
    }

    #[test]
    fn test_numeric_literal_on_text_field() {
        let bindings = Bindings::new().with("code", FieldType::Text);
        let predicate = parse(json!({"field": "code", "operator": "=", "value": 7}));
        let comparator = Comparator::compile(&predicate, &bindings).unwrap();

        assert_eq!(comparator.operand(), Some(&Operand::Text("7".to_string())));
        assert!(comparator.evaluate(&record("code", "7")));
        assert!(comparator.evaluate(&record("code", 7.0)));
    }

    #[traced_test]
    #[test]
    fn test_coercion_zero_fallback() {
        let predicate = parse(json!({"field": "age", "operator": ">", "value": "old"}));
        let comparator = PredicateEvaluator::with_coercion(CoercionPolicy::Zero)
            .evaluate(&predicate, &numeric_bindings())
            .unwrap();

        assert_eq!(comparator.operand(), Some(&Operand::Number(0.0)));
        assert!(comparator.evaluate(&record("age", 1.0)));
        assert!(!comparator.evaluate(&record("age", -1.0)));
        assert!(logs_contain("Non-numeric value for numeric field"));
    }

    #[test]
    fn test_coercion_reject() {
        let predicate = parse(json!({"field": "age", "operator": "=", "value": "old"}));
        let err = PredicateEvaluator::with_coercion(CoercionPolicy::Reject)
            .evaluate(&predicate, &numeric_bindings())
            .unwrap_err();

        assert_eq!(
            err,
            PredicateError::ValueCoercion {
                field: "age".to_string(),
                value: "old".to_string(),
            }
        );
    }

    #[test]
    fn test_evaluator_from_config() {
        let config = EvaluatorConfig {
            coercion: CoercionPolicy::Reject,
            ..Default::default()
        };
        assert_eq!(
            PredicateEvaluator::with_config(&config).coercion(),
            CoercionPolicy::Reject
        );
        assert_eq!(PredicateEvaluator::new().coercion(), CoercionPolicy::Zero);
    }

    #[test]
    fn test_nan_record_value() {
        let bindings = numeric_bindings();
        let eq = Comparator::compile(
            &parse(json!({"field": "age", "operator": "=", "value": 1})),
            &bindings,
        )
        .unwrap();
        let ne = Comparator::compile(
            &parse(json!({"field": "age", "operator": "!=", "value": 1})),
            &bindings,
        )
        .unwrap();

        assert!(!eq.evaluate(&record("age", f64::NAN)));
        assert!(ne.evaluate(&record("age", f64::NAN)));
    }

    fn comparator_for(op: &str, c: f64) -> Comparator {
        Comparator::compile(&Predicate::test("age", op, c), &numeric_bindings()).unwrap()
    }

    proptest! {
        #[test]
        fn numeric_comparators_follow_f64_ordering(
            v in -1.0e6f64..1.0e6,
            c in -1.0e6f64..1.0e6,
        ) {
            let rec = record("age", v);
            prop_assert_eq!(comparator_for(">", c).evaluate(&rec), v > c);
            prop_assert_eq!(comparator_for(">=", c).evaluate(&rec), v >= c);
            prop_assert_eq!(comparator_for("<", c).evaluate(&rec), v < c);
            prop_assert_eq!(comparator_for("<=", c).evaluate(&rec), v <= c);
            prop_assert_eq!(comparator_for("=", c).evaluate(&rec), v == c);
            prop_assert_eq!(comparator_for("!=", c).evaluate(&rec), v != c);
        }

        #[test]
        fn leaves_ignore_bindings(constant in any::<bool>(), with_field in any::<bool>()) {
            let bindings = if with_field { numeric_bindings() } else { Bindings::new() };
            let comparator = Comparator::compile(&Predicate::Constant(constant), &bindings).unwrap();
            prop_assert_eq!(comparator.evaluate(&record("age", 1.0)), constant);
        }
    }
}
