//! BigML client building blocks.
//!
//! - [`arguments`] - typed resource-creation arguments serialized to request documents
//! - [`predicate`] - decision-node predicates compiled into executable comparators
//! - [`tree`] - local scoring of a model's decision tree
//!
//! # Example
//!
//! ```
//! use bigml::predicate::{Bindings, Comparator, FieldType, FieldValue, Predicate};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let predicate = Predicate::from_json(&json!({"field": "age", "operator": ">=", "value": 30}))?;
//! let bindings = Bindings::new().with("age", FieldType::Numeric);
//! let comparator = Comparator::compile(&predicate, &bindings)?;
//!
//! let record = HashMap::from([("age".to_string(), FieldValue::Number(35.0))]);
//! assert!(comparator.evaluate(&record));
//! # Ok::<(), bigml::PredicateError>(())
//! ```

pub mod arguments;
pub mod config;
pub mod predicate;
pub mod tree;

mod error;

pub use config::{CoercionPolicy, EvaluatorConfig, MissingStrategy};
pub use error::{PredicateError, TreeError};
