//! Client for the Zadara Command Center VPSA Object Storage API.
//!
//! Only the two read operations the exporter needs are implemented: listing
//! the object stores of a cloud and listing the storage policies of one store.
//! [`ObjectStorageApi`] is the seam the metrics pipeline is written against;
//! [`CommandCenterClient`] is the HTTP implementation.

pub mod client;
pub mod error;
pub mod policies;
pub mod stores;

pub use client::CommandCenterClient;
pub use error::{ClientError, ErrorKind};
pub use policies::{RingBalance, ZiosStoragePoliciesResponse, ZiosStoragePolicy};
pub use stores::{NetworkConfiguration, Zios, ZiosResponse};

use serde::{Deserialize, Serialize};

/// One configured Command Center account to poll.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Identity of the target; exported as the `name` label.
    pub name: String,
    /// Base URL of the Command Center, e.g. `https://cc.example.com:8888`.
    pub url: String,
    pub cloud_name: String,
    pub token: String,
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("cloud_name", &self.cloud_name)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Read access to the VPSA Object Storage part of the Command Center API.
#[async_trait::async_trait]
pub trait ObjectStorageApi: Send + Sync {
    /// Lists all object stores of `cloud_name`, in API order.
    async fn list_stores(&self, cloud_name: &str) -> error::Result<Vec<Zios>>;

    /// Lists the storage policies of one store, in API order.
    async fn list_storage_policies(
        &self,
        cloud_name: &str,
        store_id: i64,
    ) -> error::Result<Vec<ZiosStoragePolicy>>;
}

/// Reads an explicit JSON `null` as the field's default value.
///
/// The Command Center sends `null` for unset fields of any type; combined with
/// `#[serde(default)]` on the struct, missing and null fields decode alike.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Common `{status, message}` envelope of every response body.
pub(crate) trait Envelope {
    fn status(&self) -> &str;
    fn message(&self) -> Option<&str>;
}
