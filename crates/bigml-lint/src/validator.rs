//! Validation of model documents before local scoring.

use crate::types::{LintIssue, LintOptions, LintResult};
use bigml::predicate::{Bindings, Operator, Predicate, PredicateEvaluator};
use bigml::tree::ModelDocument;
use bigml::{CoercionPolicy, PredicateError};
use serde_json::Value;
use std::path::Path;

const OPERATOR_HINT: &str = "Use one of >, >=, <, <=, =, !=, <> (optionally suffixed with *)";

/// Validate a model document: its field descriptors and every tree node.
///
/// Accepts the bare `{fields, root}` object or a full resource with those
/// keys under `"model"`.
pub fn validate_model(file: &Path, doc: &Value, result: &mut LintResult, options: &LintOptions) {
    let model = doc.get("model").filter(|m| m.is_object()).unwrap_or(doc);
    let errors_before = result.errors;
    let bindings = check_fields(file, model, result);

    match model.get("root") {
        Some(root) => validate_node(file, root, "root", bindings.as_ref(), result, options),
        None => result.add_issue(
            LintIssue::error("E003", "Model has no 'root' node", file)
                .suggest("Export the full model resource, including 'model.root'"),
        ),
    }

    // Anything the scorer would still refuse to load
    if result.errors == errors_before {
        if let Err(e) = ModelDocument::from_json(doc) {
            result.add_issue(LintIssue::error("E003", e.to_string(), file).at("root"));
        }
    }
}

/// Build bindings from the model's `fields`, reporting why they are unusable.
fn check_fields(file: &Path, model: &Value, result: &mut LintResult) -> Option<Bindings> {
    let Some(fields) = model.get("fields") else {
        result.add_issue(
            LintIssue::error("E007", "Model has no 'fields' descriptors", file)
                .suggest("Predicate fields cannot be bound without 'model.fields'"),
        );
        return None;
    };

    match Bindings::from_model_fields(fields) {
        Ok(bindings) => Some(bindings),
        Err(e) => {
            result.add_issue(LintIssue::error("E007", e.to_string(), file).at("fields"));
            None
        }
    }
}

/// Validate a tree node and, recursively, its children.
pub fn validate_node(
    file: &Path,
    node: &Value,
    location: &str,
    bindings: Option<&Bindings>,
    result: &mut LintResult,
    options: &LintOptions,
) {
    let Some(obj) = node.as_object() else {
        result.add_issue(LintIssue::error("E003", "Tree node must be an object", file).at(location));
        return;
    };

    match obj.get("confidence") {
        None | Some(Value::Null) | Some(Value::Number(_)) => {}
        Some(other) => result.add_issue(
            LintIssue::error("E003", format!("'confidence' must be a number, got {other}"), file)
                .at(location),
        ),
    }
    match obj.get("count") {
        None | Some(Value::Null) => {}
        Some(count) if count.is_u64() => {}
        Some(other) => result.add_issue(
            LintIssue::error(
                "E003",
                format!("'count' must be a non-negative integer, got {other}"),
                file,
            )
            .at(location),
        ),
    }

    if !obj.contains_key("output") {
        result.add_issue(
            LintIssue::warning("W002", "Node has no 'output'", file)
                .at(location)
                .suggest("Predictions stopping at this node will have no output"),
        );
    }

    match obj.get("predicate") {
        Some(predicate) => validate_predicate(
            file,
            predicate,
            &format!("{location}.predicate"),
            bindings,
            result,
            options,
        ),
        None => {
            result.add_issue(LintIssue::error("E004", "Node has no 'predicate'", file).at(location))
        }
    }

    match obj.get("children") {
        None => {}
        Some(Value::Array(children)) => {
            for (idx, child) in children.iter().enumerate() {
                validate_node(
                    file,
                    child,
                    &format!("{location}.children[{idx}]"),
                    bindings,
                    result,
                    options,
                );
            }
        }
        Some(_) => result.add_issue(
            LintIssue::error("E003", "'children' must be an array", file).at(location),
        ),
    }
}

/// Validate one predicate document.
///
/// Without bindings only the document shape and the operator are checked.
pub fn validate_predicate(
    file: &Path,
    doc: &Value,
    location: &str,
    bindings: Option<&Bindings>,
    result: &mut LintResult,
    options: &LintOptions,
) {
    let predicate = match Predicate::from_json(doc) {
        Ok(p) => p,
        Err(e) => {
            result.add_issue(LintIssue::error("E004", e.to_string(), file).at(location));
            return;
        }
    };
    let Some(test) = predicate.as_test() else {
        return;
    };

    if let Err(e) = test.operator.parse::<Operator>() {
        result.add_issue(
            LintIssue::error("E005", e.to_string(), file)
                .at(location)
                .suggest(OPERATOR_HINT),
        );
        return;
    }

    let Some(bindings) = bindings else {
        return;
    };

    // Reject so coercion problems surface as errors we can classify
    let evaluator = PredicateEvaluator::with_coercion(CoercionPolicy::Reject);
    match evaluator.evaluate(&predicate, bindings) {
        Ok(_) => {}
        Err(PredicateError::UnknownField(field)) => {
            let issue = match bindings.skipped_optype(&field) {
                Some(optype) => LintIssue::error(
                    "E006",
                    format!("Field '{field}' has optype '{optype}', which cannot be compared"),
                    file,
                )
                .suggest("Split only on numeric, categorical, text, items or datetime fields"),
                None => LintIssue::error(
                    "E006",
                    format!("Field '{field}' is not declared in 'fields'"),
                    file,
                ),
            };
            result.add_issue(issue.at(location));
        }
        Err(PredicateError::ValueCoercion { field, value }) => {
            let message = format!("Numeric field '{field}' is compared against '{value}'");
            let issue = match options.coercion {
                CoercionPolicy::Zero => LintIssue::warning("W001", message, file)
                    .suggest("The scorer will compare against 0"),
                CoercionPolicy::Reject => LintIssue::error("E008", message, file),
            };
            result.add_issue(issue.at(location));
        }
        Err(e) => result.add_issue(LintIssue::error("E004", e.to_string(), file).at(location)),
    }
}
