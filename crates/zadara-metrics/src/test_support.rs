use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use zadara_client::error::Result;
use zadara_client::{ClientError, ObjectStorageApi, RingBalance, Target, Zios, ZiosStoragePolicy};

/// In-memory API with canned responses, recording every call in order.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    stores: HashMap<String, Vec<Zios>>,
    policies: HashMap<(String, i64), Vec<ZiosStoragePolicy>>,
    failing_stores: HashSet<String>,
    hanging_stores: HashSet<String>,
    failing_policies: HashSet<(String, i64)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn with_store(mut self, cloud: &str, store: Zios) -> Self {
        self.stores.entry(cloud.to_string()).or_default().push(store);
        self
    }

    pub fn with_policies(mut self, cloud: &str, store_id: i64, policies: Vec<ZiosStoragePolicy>) -> Self {
        self.policies.insert((cloud.to_string(), store_id), policies);
        self
    }

    pub fn fail_stores(mut self, cloud: &str) -> Self {
        self.failing_stores.insert(cloud.to_string());
        self
    }

    pub fn hang_stores(mut self, cloud: &str) -> Self {
        self.hanging_stores.insert(cloud.to_string());
        self
    }

    pub fn fail_policies(mut self, cloud: &str, store_id: i64) -> Self {
        self.failing_policies.insert((cloud.to_string(), store_id));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait::async_trait]
impl ObjectStorageApi for ScriptedApi {
    async fn list_stores(&self, cloud_name: &str) -> Result<Vec<Zios>> {
        self.record(format!("stores {cloud_name}"));
        if self.hanging_stores.contains(cloud_name) {
            std::future::pending::<()>().await;
        }
        if self.failing_stores.contains(cloud_name) {
            return Err(ClientError::Api {
                status: 500,
                message: format!("cloud {cloud_name} unavailable"),
            });
        }
        Ok(self.stores.get(cloud_name).cloned().unwrap_or_default())
    }

    async fn list_storage_policies(
        &self,
        cloud_name: &str,
        store_id: i64,
    ) -> Result<Vec<ZiosStoragePolicy>> {
        self.record(format!("policies {cloud_name}/{store_id}"));
        let key = (cloud_name.to_string(), store_id);
        if self.failing_policies.contains(&key) {
            return Err(ClientError::Api {
                status: 200,
                message: format!("store {store_id} is offline"),
            });
        }
        Ok(self.policies.get(&key).cloned().unwrap_or_default())
    }
}

pub(crate) fn target(name: &str, cloud_name: &str) -> Target {
    Target {
        name: name.to_string(),
        url: "https://cc.example.com".to_string(),
        cloud_name: cloud_name.to_string(),
        token: "token".to_string(),
    }
}

pub(crate) fn store(id: i64, name: &str) -> Zios {
    Zios {
        id,
        name: name.to_string(),
        ..Default::default()
    }
}

pub(crate) fn policy(name: &str, drives_added: &str) -> ZiosStoragePolicy {
    ZiosStoragePolicy {
        name: name.to_string(),
        percentage_drives_added: drives_added.to_string(),
        ring_balance: RingBalance::default(),
        ..Default::default()
    }
}
