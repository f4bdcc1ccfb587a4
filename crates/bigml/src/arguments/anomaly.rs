//! Anomaly detector creation arguments.

use super::{display_as_json, put_list, put_text, CommonArguments, ResourceArguments};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnomalyArguments {
    pub common: CommonArguments,
    /// A valid dataset/id
    pub dataset: String,
    /// Fields that won't be included in the anomaly detector
    pub excluded_fields: Vec<String>,
    /// Number of trees in the isolation forest
    pub forest_size: Option<u32>,
    /// Number of top anomalies to report
    pub top_n: Option<u32>,
    /// Seed for deterministic forests
    pub anomaly_seed: Option<String>,
}

impl AnomalyArguments {
    pub fn for_dataset(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Default::default()
        }
    }
}

impl ResourceArguments for AnomalyArguments {
    const RESOURCE: &'static str = "anomaly";

    fn common(&self) -> &CommonArguments {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonArguments {
        &mut self.common
    }

    fn write_fields(&self, json: &mut Map<String, Value>) {
        put_text(json, "dataset", &self.dataset);
        put_list(json, "excluded_fields", self.excluded_fields.iter());
        if let Some(forest_size) = self.forest_size {
            json.insert("forest_size".to_string(), forest_size.into());
        }
        if let Some(top_n) = self.top_n {
            json.insert("top_n".to_string(), top_n.into());
        }
        if let Some(seed) = &self.anomaly_seed {
            put_text(json, "anomaly_seed", seed);
        }
    }
}

display_as_json!(AnomalyArguments);
