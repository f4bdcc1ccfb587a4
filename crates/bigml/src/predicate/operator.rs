//! Comparison operators and the missing-value marker.

use crate::error::PredicateError;
use std::fmt;
use std::str::FromStr;

/// Operator suffix meaning "also match when the field is missing".
pub const MISSING_MARKER: char = '*';

/// Strip every missing-value marker from a raw operator.
pub fn normalize_operator(raw: &str) -> String {
    raw.replace(MISSING_MARKER, "")
}

/// Whether a raw operator carries the missing-value marker.
pub fn is_missing_operator(raw: &str) -> bool {
    raw.contains(MISSING_MARKER)
}

/// Supported comparison operators, after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    Equal,
    /// Both `!=` and `<>`
    NotEqual,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessOrEqual => "<=",
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
        }
    }
}

impl FromStr for Operator {
    type Err = PredicateError;

    /// Parse a raw operator; the missing-value marker is ignored.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_operator(raw).as_str() {
            ">" => Ok(Operator::GreaterThan),
            ">=" => Ok(Operator::GreaterOrEqual),
            "<" => Ok(Operator::LessThan),
            "<=" => Ok(Operator::LessOrEqual),
            "=" => Ok(Operator::Equal),
            "!=" | "<>" => Ok(Operator::NotEqual),
            _ => Err(PredicateError::UnknownOperator(raw.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
