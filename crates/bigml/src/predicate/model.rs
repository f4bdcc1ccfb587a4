//! Decision-node predicates as returned by the service.
//!
//! A predicate document is either a bare boolean (a constant outcome, used on
//! the tree root) or a field test:
//!
//! ```json
//! { "field": "000002", "operator": ">=*", "value": 30 }
//! ```

use super::operator::{is_missing_operator, normalize_operator};
use super::value::PredicateValue;
use crate::error::PredicateError;
use serde::{Deserialize, Serialize};

/// Wire form of a predicate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum PredicateDocument {
    Leaf(bool),
    Test(TestDocument),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct TestDocument {
    field: String,
    operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<PredicateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    term: Option<String>,
    #[serde(
        default,
        rename = "op_type",
        alias = "opType",
        skip_serializing_if = "Option::is_none"
    )]
    op_type: Option<String>,
}

/// A field test parsed from a predicate document.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTest {
    /// Field id the test reads
    pub field: String,
    /// Operator exactly as received, marker included
    pub operator: String,
    /// Operator with the missing-value marker removed
    pub comparison_operator: String,
    /// Whether the raw operator carried the missing-value marker
    pub missing: bool,
    pub value: Option<PredicateValue>,
    pub term: Option<String>,
    pub op_type: Option<String>,
}

/// Predicate of one decision-tree node.
///
/// Unknown operators are accepted here and rejected only when the predicate is
/// turned into a comparator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "PredicateDocument", into = "PredicateDocument")]
pub enum Predicate {
    /// Bare boolean: a constant decision outcome
    Constant(bool),
    Test(FieldTest),
}

impl From<PredicateDocument> for Predicate {
    fn from(doc: PredicateDocument) -> Self {
        match doc {
            PredicateDocument::Leaf(constant) => Predicate::Constant(constant),
            PredicateDocument::Test(test) => Predicate::Test(FieldTest {
                comparison_operator: normalize_operator(&test.operator),
                missing: is_missing_operator(&test.operator),
                field: test.field,
                operator: test.operator,
                value: test.value,
                term: test.term,
                op_type: test.op_type,
            }),
        }
    }
}

impl From<Predicate> for PredicateDocument {
    fn from(predicate: Predicate) -> Self {
        match predicate {
            Predicate::Constant(constant) => PredicateDocument::Leaf(constant),
            Predicate::Test(test) => PredicateDocument::Test(TestDocument {
                field: test.field,
                operator: test.operator,
                value: test.value,
                term: test.term,
                op_type: test.op_type,
            }),
        }
    }
}

impl Predicate {
    /// Build a field test from its parts.
    pub fn test(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<PredicateValue>,
    ) -> Self {
        let operator = operator.into();
        Predicate::Test(FieldTest {
            field: field.into(),
            comparison_operator: normalize_operator(&operator),
            missing: is_missing_operator(&operator),
            operator,
            value: Some(value.into()),
            term: None,
            op_type: None,
        })
    }

    /// Parse a predicate document.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, PredicateError> {
        Predicate::deserialize(value).map_err(|_| {
            PredicateError::MalformedPredicate(format!(
                "expected a boolean or an object with 'field' and 'operator', got {value}"
            ))
        })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Predicate::Constant(_))
    }

    pub fn constant(&self) -> Option<bool> {
        match self {
            Predicate::Constant(constant) => Some(*constant),
            Predicate::Test(_) => None,
        }
    }

    pub fn as_test(&self) -> Option<&FieldTest> {
        match self {
            Predicate::Constant(_) => None,
            Predicate::Test(test) => Some(test),
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.as_test().map(|t| t.field.as_str())
    }

    pub fn operator(&self) -> Option<&str> {
        self.as_test().map(|t| t.operator.as_str())
    }

    pub fn comparison_operator(&self) -> Option<&str> {
        self.as_test().map(|t| t.comparison_operator.as_str())
    }

    /// Whether the node also accepts records where the field is missing.
    pub fn missing_operator(&self) -> bool {
        self.as_test().is_some_and(|t| t.missing)
    }

    pub fn value(&self) -> Option<&PredicateValue> {
        self.as_test().and_then(|t| t.value.as_ref())
    }

    pub fn term(&self) -> Option<&str> {
        self.as_test().and_then(|t| t.term.as_deref())
    }

    pub fn op_type(&self) -> Option<&str> {
        self.as_test().and_then(|t| t.op_type.as_deref())
    }
}
