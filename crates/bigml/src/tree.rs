//! Local scoring of a model's decision tree.
//!
//! A model document carries the field descriptors and the tree root:
//!
//! ```json
//! {
//!   "fields": { "000000": { "name": "age", "optype": "numeric" } },
//!   "root": {
//!     "predicate": true,
//!     "output": "no",
//!     "children": [
//!       { "predicate": { "field": "000000", "operator": ">", "value": 30 }, "output": "yes" },
//!       { "predicate": { "field": "000000", "operator": "<=*", "value": 30 }, "output": "no" }
//!     ]
//!   }
//! }
//! ```
//!
//! Every predicate is compiled once by [`CompiledTree::compile`]; predictions
//! then only evaluate comparators.

use crate::config::{EvaluatorConfig, MissingStrategy};
use crate::error::TreeError;
use crate::predicate::{Bindings, Comparator, Predicate, PredicateEvaluator, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

/// One node of a decision tree, as returned by the service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TreeNode {
    pub predicate: Predicate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

/// Field descriptors plus the tree root.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub fields: Value,
    pub root: TreeNode,
}

impl ModelDocument {
    /// Parse a model document. Accepts the bare `{fields, root}` object or a
    /// full resource with those keys nested under `"model"`.
    pub fn from_json(value: &Value) -> Result<Self, TreeError> {
        let model = value.get("model").filter(|m| m.is_object()).unwrap_or(value);
        ModelDocument::deserialize(model).map_err(|e| TreeError::MalformedModel(e.to_string()))
    }
}

/// Result of walking a tree for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub output: Option<Value>,
    pub confidence: Option<f64>,
    pub count: Option<u64>,
    /// Predicates followed below the root, in order
    pub path: Vec<Predicate>,
}

#[derive(Debug, Clone)]
struct CompiledNode {
    predicate: Predicate,
    comparator: Comparator,
    output: Option<Value>,
    confidence: Option<f64>,
    count: Option<u64>,
    children: Vec<CompiledNode>,
}

impl CompiledNode {
    fn compile(
        node: &TreeNode,
        location: &str,
        bindings: &Bindings,
        evaluator: &PredicateEvaluator,
    ) -> Result<Self, TreeError> {
        let comparator = evaluator
            .evaluate(&node.predicate, bindings)
            .map_err(|e| TreeError::at(location, e))?;

        let children = node
            .children
            .iter()
            .enumerate()
            .map(|(idx, child)| {
                Self::compile(
                    child,
                    &format!("{location}.children[{idx}]"),
                    bindings,
                    evaluator,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            predicate: node.predicate.clone(),
            comparator,
            output: node.output.clone(),
            confidence: node.confidence,
            count: node.count,
            children,
        })
    }
}

/// A tree whose predicates have all been compiled against one binding map.
#[derive(Debug, Clone)]
pub struct CompiledTree {
    root: CompiledNode,
    missing_strategy: MissingStrategy,
}

impl CompiledTree {
    pub fn compile(
        root: &TreeNode,
        bindings: &Bindings,
        config: &EvaluatorConfig,
    ) -> Result<Self, TreeError> {
        let evaluator = PredicateEvaluator::with_config(config);
        let root = CompiledNode::compile(root, "root", bindings, &evaluator)?;
        debug!(
            fields = bindings.len(),
            missing_strategy = ?config.missing_strategy,
            "Compiled decision tree"
        );
        Ok(Self {
            root,
            missing_strategy: config.missing_strategy,
        })
    }

    /// Compile a model document, binding the fields it declares.
    pub fn from_model(model: &ModelDocument, config: &EvaluatorConfig) -> Result<Self, TreeError> {
        let bindings = Bindings::from_model_fields(&model.fields)?;
        Self::compile(&model.root, &bindings, config)
    }

    /// Walk the tree for `record`.
    ///
    /// At each node the first matching child is followed. A child whose
    /// predicate carries the missing-value marker also matches when the record
    /// lacks its field. When no child matches the walk stops at the current
    /// node; if that happened because a needed field was missing and the
    /// strategy is `Strict`, the walk fails instead.
    pub fn predict<R: Record + ?Sized>(&self, record: &R) -> Result<Prediction, TreeError> {
        let mut node = &self.root;
        let mut path = Vec::new();
        let mut location = String::from("root");

        loop {
            let mut next = None;
            let mut missing_field = None;

            for (idx, child) in node.children.iter().enumerate() {
                let matched = match child.comparator.field() {
                    Some(field) if record.value(field).is_none() => {
                        if !child.comparator.accepts_missing() {
                            missing_field.get_or_insert(field);
                        }
                        child.comparator.accepts_missing()
                    }
                    _ => child.comparator.evaluate(record),
                };
                if matched {
                    next = Some((idx, child));
                    break;
                }
            }

            let Some((idx, child)) = next else {
                if let (Some(field), MissingStrategy::Strict) = (missing_field, self.missing_strategy)
                {
                    return Err(TreeError::MissingField {
                        field: field.to_string(),
                        path: location,
                    });
                }
                break;
            };

            location = format!("{location}.children[{idx}]");
            trace!(node = %location, "Following child");
            path.push(child.predicate.clone());
            node = child;
        }

        Ok(Prediction {
            output: node.output.clone(),
            confidence: node.confidence,
            count: node.count,
            path,
        })
    }
}
