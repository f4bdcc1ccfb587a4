//! Model document linting for BigML local scoring.
//!
//! Checks exported model documents for problems that would stop a decision
//! tree from compiling, or would make it score differently than the service.
//! Usable as a library or through the `bigml-lint` CLI binary.
//!
//! # Example
//!
//! ```no_run
//! use bigml_lint::{lint_directory, lint_file, LintOptions};
//! use std::path::Path;
//!
//! let result = lint_file(Path::new("model.json"), &LintOptions::default());
//! let all = lint_directory(Path::new("./models"), &LintOptions::default());
//!
//! if result.has_errors() || all.has_errors() {
//!     eprintln!("Found {} errors", result.errors + all.errors);
//! }
//! ```

mod types;
mod validator;

use serde_json::Value;
use std::path::Path;
use tracing::debug;

pub use types::{LintIssue, LintOptions, LintResult, Severity};
pub use validator::{validate_model, validate_node, validate_predicate};

/// Lint a single model document file.
pub fn lint_file(path: &Path, options: &LintOptions) -> LintResult {
    debug!(file = %path.display(), "Linting model document");

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            let mut result = LintResult::new();
            result.files_checked = 1;
            result.add_issue(LintIssue::error(
                "E001",
                format!("Failed to read file: {e}"),
                path,
            ));
            return result;
        }
    };

    lint_json_at(&content, path, options)
}

/// Lint all `.json` files in a directory (non-recursive), in name order.
pub fn lint_directory(path: &Path, options: &LintOptions) -> LintResult {
    let mut result = LintResult::new();

    let entries = match std::fs::read_dir(path) {
        Ok(e) => e,
        Err(e) => {
            result.add_issue(LintIssue::error(
                "E001",
                format!("Failed to read directory: {e}"),
                path,
            ));
            return result;
        }
    };

    let mut files: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    for file in files {
        result.merge(lint_file(&file, options));
    }

    result
}

/// Lint a JSON string directly.
pub fn lint_json(json: &str, source_name: &str, options: &LintOptions) -> LintResult {
    lint_json_at(json, Path::new(source_name), options)
}

/// Lint an already parsed model document.
pub fn lint_value(value: &Value, source_name: &str, options: &LintOptions) -> LintResult {
    let mut result = LintResult::new();
    result.files_checked = 1;
    validate_model(Path::new(source_name), value, &mut result, options);
    result
}

fn lint_json_at(json: &str, path: &Path, options: &LintOptions) -> LintResult {
    let mut result = LintResult::new();
    result.files_checked = 1;

    let value: Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => {
            result.add_issue(
                LintIssue::error("E002", format!("Invalid JSON: {e}"), path)
                    .suggest("Check for JSON syntax errors"),
            );
            return result;
        }
    };

    validate_model(path, &value, &mut result, options);
    result
}
