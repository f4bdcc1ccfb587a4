//! Resource-creation arguments.
//!
//! Each resource kind has a typed argument struct that serializes to the
//! JSON document the service expects. Serialization omits every field left at
//! its default: no `null`s, no empty strings or lists, no default category.
//!
//! ```
//! use bigml::arguments::{AnomalyArguments, ResourceArguments};
//!
//! let mut args = AnomalyArguments::for_dataset("dataset/abc");
//! args.excluded_fields = vec!["f1".to_string(), "f2".to_string()];
//! args.add("seed", "bigml");
//!
//! let json = args.to_json();
//! assert_eq!(json["dataset"], "dataset/abc");
//! assert_eq!(json["excluded_fields"][1], "f2");
//! ```

mod anomaly;
mod category;
mod extra;
mod model;
mod sample;

pub use anomaly::AnomalyArguments;
pub use category::Category;
pub use extra::{ArgValue, ExtraArgs};
pub use model::ModelArguments;
pub use sample::SampleArguments;

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Arguments shared by every resource kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonArguments {
    pub category: Category,
    /// Up to 8192 characters
    pub description: String,
    pub name: String,
    pub private: bool,
    pub tags: BTreeSet<String>,
    pub extra: ExtraArgs,
}

impl CommonArguments {
    fn write_into(&self, json: &mut Map<String, Value>) {
        if self.category != Category::Miscellaneous {
            json.insert("category".to_string(), self.category.code().into());
        }
        put_text(json, "description", &self.description);
        put_text(json, "name", &self.name);
        if self.private {
            json.insert("private".to_string(), Value::Bool(true));
        }
        put_list(json, "tags", self.tags.iter());
    }
}

/// Typed arguments for creating one kind of resource.
pub trait ResourceArguments {
    /// API path segment of the resource kind (e.g. "anomaly")
    const RESOURCE: &'static str;

    fn common(&self) -> &CommonArguments;

    fn common_mut(&mut self) -> &mut CommonArguments;

    /// Write the resource-specific keys.
    fn write_fields(&self, json: &mut Map<String, Value>);

    /// Full request document: common keys, resource keys, then extra
    /// arguments (which override keys of the same name).
    fn to_json(&self) -> Value {
        let mut json = Map::new();
        self.common().write_into(&mut json);
        self.write_fields(&mut json);
        self.common().extra.write_into(&mut json);
        Value::Object(json)
    }

    fn add(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> &mut Self
    where
        Self: Sized,
    {
        self.common_mut().extra.add(name, value);
        self
    }

    fn remove(&mut self, name: &str) -> &mut Self
    where
        Self: Sized,
    {
        self.common_mut().extra.remove(name);
        self
    }

    fn update(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> &mut Self
    where
        Self: Sized,
    {
        self.common_mut().extra.update(name, value);
        self
    }
}

/// Insert `value` unless it is blank.
fn put_text(json: &mut Map<String, Value>, key: &str, value: &str) {
    if !value.trim().is_empty() {
        json.insert(key.to_string(), Value::String(value.to_string()));
    }
}

/// Insert the items as a string array unless there are none.
fn put_list<'a>(json: &mut Map<String, Value>, key: &str, items: impl Iterator<Item = &'a String>) {
    let items: Vec<Value> = items.map(|s| Value::String(s.clone())).collect();
    if !items.is_empty() {
        json.insert(key.to_string(), Value::Array(items));
    }
}

macro_rules! display_as_json {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use $crate::arguments::ResourceArguments;
                write!(f, "{}", self.to_json())
            }
        }
    };
}
pub(crate) use display_as_json;
