use crate::Envelope;
use serde::{Deserialize, Serialize};

/// Distribution of a store's replication ring across health states.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingBalance {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub normal_percentage: f64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub degraded_percentage: f64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub critical_percentage: f64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub normal_count: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub degraded_count: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub critical_count: i64,
}

/// A storage policy of one object store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiosStoragePolicy {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub internal_name: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub protection: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub rebalance_current_completion_projected_at: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub rebalance_percentage: f64,
    /// Sent as text by the API (e.g. `"55.2"`); callers parse it.
    #[serde(deserialize_with = "crate::null_as_default")]
    pub percentage_drives_added: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub rebalancing_paused: bool,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub default: bool,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub health_status: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub health_percentage: f64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub ring_balance: RingBalance,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub used_capacity: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub free_capacity: i64,
}

/// Body of `GET /api/clouds/{cloud_name}/zioses/{id}/storage_policies.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiosStoragePoliciesResponse {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub status: String,
    pub message: Option<String>,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub zios_storage_policies: Vec<ZiosStoragePolicy>,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub count: i64,
}

impl Envelope for ZiosStoragePoliciesResponse {
    fn status(&self) -> &str {
        &self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

pub(crate) fn policies_path(cloud_name: &str, store_id: i64) -> [String; 6] {
    [
        "api".to_string(),
        "clouds".to_string(),
        cloud_name.to_string(),
        "zioses".to_string(),
        store_id.to_string(),
        "storage_policies.json".to_string(),
    ]
}
