//! Decision-tree model creation arguments.

use super::{display_as_json, put_list, put_text, CommonArguments, ResourceArguments};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelArguments {
    pub common: CommonArguments,
    /// A valid dataset/id
    pub dataset: String,
    /// Field id or name to predict; the service defaults to the last field
    pub objective_field: String,
    pub input_fields: Vec<String>,
    pub excluded_fields: Vec<String>,
}

impl ModelArguments {
    pub fn for_dataset(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Default::default()
        }
    }
}

impl ResourceArguments for ModelArguments {
    const RESOURCE: &'static str = "model";

    fn common(&self) -> &CommonArguments {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonArguments {
        &mut self.common
    }

    fn write_fields(&self, json: &mut Map<String, Value>) {
        put_text(json, "dataset", &self.dataset);
        put_text(json, "objective_field", &self.objective_field);
        put_list(json, "input_fields", self.input_fields.iter());
        put_list(json, "excluded_fields", self.excluded_fields.iter());
    }
}

display_as_json!(ModelArguments);
