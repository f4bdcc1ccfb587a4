//! Local evaluation of decision-tree predicates.
//!
//! Each tree node returned by the service carries a predicate: a boolean leaf,
//! or a field test such as `{"field": "000002", "operator": ">=*", "value": 30}`.
//! This module parses those documents and compiles them into comparators that
//! can be evaluated against input records without a server round-trip.
//!
//! # Module Structure
//!
//! - `value` - Predicate literals and record field values
//! - `operator` - Comparison operators and the `*` missing-value marker
//! - `model` - Predicate documents (leaf or field test)
//! - `binding` - Typed field slots and the `Record` trait
//! - `comparator` - Predicate to comparator translation

mod binding;
mod comparator;
mod model;
mod operator;
mod value;

pub use binding::{Binding, Bindings, FieldType, Record};
pub use comparator::{Comparator, FieldComparison, Operand, PredicateEvaluator};
pub use model::{FieldTest, Predicate};
pub use operator::{is_missing_operator, normalize_operator, Operator, MISSING_MARKER};
pub use value::{FieldValue, PredicateValue};
