//! Sample creation arguments.

use super::{display_as_json, put_text, CommonArguments, ResourceArguments};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleArguments {
    pub common: CommonArguments,
    /// A valid dataset/id
    pub dataset: String,
}

impl SampleArguments {
    pub fn for_dataset(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Default::default()
        }
    }
}

impl ResourceArguments for SampleArguments {
    const RESOURCE: &'static str = "sample";

    fn common(&self) -> &CommonArguments {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonArguments {
        &mut self.common
    }

    fn write_fields(&self, json: &mut Map<String, Value>) {
        put_text(json, "dataset", &self.dataset);
    }
}

display_as_json!(SampleArguments);
