//! Ad-hoc request arguments that have no typed field.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Value of an extra argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ArgValue>),
    Object(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    /// JSON form of the value. Non-finite floats have no JSON form and yield
    /// `None`; inside lists and objects such entries are dropped.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            ArgValue::Bool(b) => Some(Value::Bool(*b)),
            ArgValue::Int(i) => Some(Value::Number((*i).into())),
            ArgValue::Float(f) => Number::from_f64(*f).map(Value::Number),
            ArgValue::Text(s) => Some(Value::String(s.clone())),
            ArgValue::List(items) => Some(Value::Array(
                items.iter().filter_map(ArgValue::to_json).collect(),
            )),
            ArgValue::Object(entries) => Some(Value::Object(
                entries
                    .iter()
                    .filter_map(|(k, v)| v.to_json().map(|v| (k.clone(), v)))
                    .collect(),
            )),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Int(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        ArgValue::Int(value.into())
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        ArgValue::Int(value.into())
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Float(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(values: Vec<T>) -> Self {
        ArgValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, ArgValue>> for ArgValue {
    fn from(entries: BTreeMap<String, ArgValue>) -> Self {
        ArgValue::Object(entries)
    }
}

/// Name → value accumulator for extra arguments. Last write wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraArgs {
    entries: BTreeMap<String, ArgValue>,
}

impl ExtraArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument; an existing one with the same name is replaced.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> &mut Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.entries.remove(name);
        self
    }

    /// Replace an argument's value, adding it when absent.
    pub fn update(&mut self, name: impl Into<String>, value: impl Into<ArgValue>) -> &mut Self {
        let name = name.into();
        self.entries.remove(&name);
        self.entries.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every argument into `json`, overriding keys already present.
    pub(crate) fn write_into(&self, json: &mut Map<String, Value>) {
        for (name, value) in &self.entries {
            match value.to_json() {
                Some(v) => {
                    json.insert(name.clone(), v);
                }
                None => warn!(argument = %name, "Dropping argument without a JSON form"),
            }
        }
    }
}
