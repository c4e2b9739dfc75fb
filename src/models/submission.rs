// Telemetry submissions as received on the wire and after validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Tier, TierData};

/// Request body of POST /api/telemetry. Every field is optional so that
/// validation can report all missing fields at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub timestamp_ms: Option<serde_json::Value>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Request body of POST /api/telemetry/batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBatch {
    #[serde(default)]
    pub payloads: Option<serde_json::Value>,
}

/// A validated submission, ready to be persisted.
#[derive(Debug, Clone)]
pub struct Submission {
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    /// Timestamp exactly as the client sent it, echoed in the acknowledgment.
    pub timestamp_raw: String,
    pub timestamp_ms: i64,
    pub data: TierData,
}

impl Submission {
    pub fn tier(&self) -> Tier {
        self.data.tier()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    pub received: bool,
    pub id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAcknowledgment {
    pub received: usize,
    pub failed: usize,
    pub ids: Vec<String>,
}
