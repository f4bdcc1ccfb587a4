//! Field bindings: typed slots a predicate's field reference resolves against.

use super::value::FieldValue;
use crate::error::{PredicateError, TreeError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::debug;

/// Declared type of a bound field. Decides numeric vs string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Numeric,
    Text,
}

impl FieldType {
    /// Map a service optype (`numeric`, `categorical`, ...) to a field type.
    pub fn from_optype(optype: &str) -> Option<Self> {
        match optype {
            "numeric" => Some(FieldType::Numeric),
            "categorical" | "text" | "items" | "datetime" => Some(FieldType::Text),
            _ => None,
        }
    }
}

/// A named, typed input slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Field id used by predicates (e.g. "000001")
    pub field: String,
    /// Human-readable name; defaults to the id
    pub name: String,
    pub field_type: FieldType,
}

impl Binding {
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        let field = field.into();
        Self {
            name: field.clone(),
            field,
            field_type,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Binding map for one scoring session, keyed by field id.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    slots: HashMap<String, Binding>,
    /// Declared fields left unbound, with their optype
    skipped: HashMap<String, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, replacing any previous one for the same field.
    pub fn insert(&mut self, binding: Binding) -> &mut Self {
        self.slots.insert(binding.field.clone(), binding);
        self
    }

    /// Builder-style variant of [`Bindings::insert`].
    pub fn with(mut self, field: impl Into<String>, field_type: FieldType) -> Self {
        self.insert(Binding::new(field, field_type));
        self
    }

    pub fn get(&self, field: &str) -> Option<&Binding> {
        self.slots.get(field)
    }

    /// Look up a binding, failing with `UnknownField` when absent.
    pub fn resolve(&self, field: &str) -> Result<&Binding, PredicateError> {
        self.get(field)
            .ok_or_else(|| PredicateError::UnknownField(field.to_string()))
    }

    /// Optype of a declared field that was skipped because it cannot be compared.
    pub fn skipped_optype(&self, field: &str) -> Option<&str> {
        self.skipped.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.slots.values()
    }

    /// Build bindings from a model's `fields` object:
    ///
    /// ```json
    /// { "000000": { "name": "sepal length", "optype": "numeric" } }
    /// ```
    ///
    /// Fields with an optype that cannot be compared are skipped.
    pub fn from_model_fields(fields: &serde_json::Value) -> Result<Self, TreeError> {
        let fields = fields
            .as_object()
            .ok_or_else(|| TreeError::MalformedModel("'fields' must be an object".to_string()))?;

        let mut bindings = Bindings::new();
        for (id, descriptor) in fields {
            let optype = descriptor
                .get("optype")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    TreeError::MalformedModel(format!("field '{id}' has no 'optype'"))
                })?;

            let Some(field_type) = FieldType::from_optype(optype) else {
                debug!(field = %id, optype, "Skipping field with unsupported optype");
                bindings.skipped.insert(id.clone(), optype.to_string());
                continue;
            };

            let mut binding = Binding::new(id.as_str(), field_type);
            if let Some(name) = descriptor.get("name").and_then(|v| v.as_str()) {
                binding = binding.with_name(name);
            }
            bindings.insert(binding);
        }
        Ok(bindings)
    }
}

/// A record being scored: read access to field values by id.
pub trait Record {
    /// Value of `field`, or `None` when the record lacks it.
    fn value(&self, field: &str) -> Option<Cow<'_, FieldValue>>;
}

impl Record for HashMap<String, FieldValue> {
    fn value(&self, field: &str) -> Option<Cow<'_, FieldValue>> {
        self.get(field).map(Cow::Borrowed)
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn value(&self, field: &str) -> Option<Cow<'_, FieldValue>> {
        self.get(field)
            .and_then(FieldValue::from_json)
            .map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_binding() {
        let bindings = Bindings::new()
            .with("age", FieldType::Numeric)
            .with("color", FieldType::Text);

        assert_eq!(bindings.len(), 2);
        assert_eq!(
            bindings.resolve("age").unwrap().field_type,
            FieldType::Numeric
        );
        assert_eq!(
            bindings.resolve("height").unwrap_err(),
            PredicateError::UnknownField("height".to_string())
        );
    }

    #[test]
    fn test_insert_replaces() {
        let mut bindings = Bindings::new();
        bindings.insert(Binding::new("x", FieldType::Numeric));
        bindings.insert(Binding::new("x", FieldType::Text).with_name("ex"));

        assert_eq!(bindings.len(), 1);
        let binding = bindings.get("x").unwrap();
        assert_eq!(binding.field_type, FieldType::Text);
        assert_eq!(binding.name, "ex");
    }

    #[test]
    fn test_from_optype() {
        assert_eq!(FieldType::from_optype("numeric"), Some(FieldType::Numeric));
        assert_eq!(FieldType::from_optype("categorical"), Some(FieldType::Text));
        assert_eq!(FieldType::from_optype("text"), Some(FieldType::Text));
        assert_eq!(FieldType::from_optype("image"), None);
    }

    #[test]
    fn test_from_model_fields() {
        let fields = json!({
            "000000": {"name": "sepal length", "optype": "numeric"},
            "000004": {"name": "species", "optype": "categorical"},
            "000005": {"name": "photo", "optype": "image"}
        });

        let bindings = Bindings::from_model_fields(&fields).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("000000").unwrap().name, "sepal length");
        assert_eq!(
            bindings.get("000004").unwrap().field_type,
            FieldType::Text
        );
        assert!(bindings.get("000005").is_none());
        assert_eq!(bindings.skipped_optype("000005"), Some("image"));
        assert_eq!(bindings.skipped_optype("000000"), None);
    }

    #[test]
    fn test_from_model_fields_malformed() {
        assert!(matches!(
            Bindings::from_model_fields(&json!([])),
            Err(TreeError::MalformedModel(_))
        ));
        assert!(matches!(
            Bindings::from_model_fields(&json!({"000000": {"name": "a"}})),
            Err(TreeError::MalformedModel(_))
        ));
    }

    #[test]
    fn test_json_record() {
        let record = json!({"age": 35, "color": "red", "note": null});
        let record = record.as_object().unwrap();

        assert_eq!(
            record.value("age").as_deref(),
            Some(&FieldValue::Number(35.0))
        );
        assert_eq!(
            record.value("color").as_deref(),
            Some(&FieldValue::Text("red".to_string()))
        );
        assert!(record.value("note").is_none());
        assert!(record.value("height").is_none());
    }
}
