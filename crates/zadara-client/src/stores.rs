use crate::Envelope;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Addresses of one virtual controller inside a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfiguration {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub fe_ip: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub be_ip: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub hb_ip: String,
}

/// A VPSA Object Storage object store ("zios").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zios {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub internal_name: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub user: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub tenant_name: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub engine_type: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub vcpus: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub ram: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub https_termination: bool,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub drives: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub cache: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub virtual_controllers: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub ip_address: String,
    /// Either an address string or `null`, depending on the deployment.
    pub public_ip: serde_json::Value,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub management_url: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub storage_policies_count: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub metadata_policies_count: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub accounts_count: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub users_count: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub containers_count: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub objects_count: i64,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub network_configuration: HashMap<String, NetworkConfiguration>,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub updated_at: String,
}

/// Body of `GET /api/clouds/{cloud_name}/zioses.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZiosResponse {
    #[serde(deserialize_with = "crate::null_as_default")]
    pub status: String,
    pub message: Option<String>,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub zioses: Vec<Zios>,
    #[serde(deserialize_with = "crate::null_as_default")]
    pub count: i64,
}

impl Envelope for ZiosResponse {
    fn status(&self) -> &str {
        &self.status
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Path segments below the base URL, e.g. `api/clouds/{cloud}/zioses.json`.
pub(crate) fn stores_path(cloud_name: &str) -> [String; 4] {
    [
        "api".to_string(),
        "clouds".to_string(),
        cloud_name.to_string(),
        "zioses.json".to_string(),
    ]
}
