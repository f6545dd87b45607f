use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One catalog entry in the `flowers` collection. Maintained externally by
/// catalog editors; this service only ever reads it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FlowerRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub flowername: String,
    pub habitat: String,
    #[serde(rename = "binomialName")]
    pub binomial_name: String,
    pub classification: String,
    /// Korean alias. Acts as an alternate lookup key alongside `flowername`.
    #[serde(default)]
    pub flowername_kr: Option<String>,
}

impl FlowerRecord {
    pub fn new(
        flowername: String,
        habitat: String,
        binomial_name: String,
        classification: String,
        flowername_kr: Option<String>,
    ) -> FlowerRecord {
        FlowerRecord {
            id: ObjectId::new(),
            flowername,
            habitat,
            binomial_name,
            classification,
            flowername_kr,
        }
    }
}
