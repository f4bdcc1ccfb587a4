//! Evaluator configuration.
//!
//! All fields are defaulted, so an empty YAML document is a valid config:
//!
//! ```yaml
//! coercion: reject            # or "zero" (default)
//! missing_strategy: strict    # or "last_prediction" (default)
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// What to do when a numeric field is compared against a non-numeric literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Substitute `0.0` for the literal and log a warning.
    #[default]
    Zero,
    /// Fail the evaluation with `PredicateError::ValueCoercion`.
    Reject,
}

/// What the tree walker does when a record lacks a field a split needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStrategy {
    /// Stop at the current node and return its output.
    #[default]
    LastPrediction,
    /// Fail with `TreeError::MissingField`.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluatorConfig {
    #[serde(default)]
    pub coercion: CoercionPolicy,
    #[serde(default)]
    pub missing_strategy: MissingStrategy,
}

impl EvaluatorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, anyhow::Error> {
        // serde_yaml rejects an empty document; treat it as all defaults
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).context("Failed to parse evaluator config")
    }
}
