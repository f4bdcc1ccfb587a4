//! Error types for predicate evaluation and tree scoring.

/// Errors raised while turning a predicate into a comparator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredicateError {
    #[error("Unknown field '{0}': no binding registered for it")]
    UnknownField(String),
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),
    #[error("Value '{value}' for numeric field '{field}' is not a number")]
    ValueCoercion { field: String, value: String },
    #[error("Malformed predicate: {0}")]
    MalformedPredicate(String),
}

/// Errors raised while loading, compiling or walking a decision tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("Invalid predicate at {path}: {source}")]
    Predicate {
        path: String,
        #[source]
        source: PredicateError,
    },
    #[error("Malformed model document: {0}")]
    MalformedModel(String),
    #[error("Field '{field}' is missing from the record at {path}")]
    MissingField { field: String, path: String },
}

impl TreeError {
    pub(crate) fn at(path: &str, source: PredicateError) -> Self {
        TreeError::Predicate {
            path: path.to_string(),
            source,
        }
    }
}
