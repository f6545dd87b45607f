use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data_models::FlowerRecord;

#[derive(Debug, Deserialize)]
pub struct FlowerQuery {
    pub flowername: Option<String>,
}

/// Projection of a catalog record: exactly these five fields are exposed,
/// whatever else the stored document carries.
#[derive(Debug, Serialize)]
pub struct FlowerResponse {
    pub flowername: String,
    pub habitat: String,
    #[serde(rename = "binomialName")]
    pub binomial_name: String,
    pub classification: String,
    pub flowername_kr: Option<String>,
}

impl From<FlowerRecord> for FlowerResponse {
    fn from(flower: FlowerRecord) -> Self {
        Self {
            flowername: flower.flowername,
            habitat: flower.habitat,
            binomial_name: flower.binomial_name,
            classification: flower.classification,
            flowername_kr: flower.flowername_kr,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShopSearchResponse {
    pub items: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
