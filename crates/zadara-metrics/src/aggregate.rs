//! Two-level retrieval of one target: its stores, then each store's policies.

use crate::error::{Result, ScrapeError};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use zadara_client::{ClientError, ObjectStorageApi, Target, Zios, ZiosStoragePolicy};

/// One store together with its storage policies, both in API order.
///
/// Lives only for the duration of a scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub store: Zios,
    pub policies: Vec<ZiosStoragePolicy>,
}

/// Races an API call against the scrape's cancellation token.
async fn until_cancelled<T, F>(cancel: &CancellationToken, call: F) -> std::result::Result<T, ClientError>
where
    F: Future<Output = std::result::Result<T, ClientError>>,
{
    cancel
        .run_until_cancelled(call)
        .await
        .unwrap_or(Err(ClientError::Cancelled))
}

async fn list_stores(
    api: &dyn ObjectStorageApi,
    target: &Target,
    cancel: &CancellationToken,
) -> Result<Vec<Zios>> {
    until_cancelled(cancel, api.list_stores(&target.cloud_name))
        .await
        .map_err(|source| ScrapeError::ListStores {
            target: target.name.clone(),
            cloud_name: target.cloud_name.clone(),
            source,
        })
}

/// Fetches every store of `target` and the policies of each store.
///
/// All or nothing: the first failing call aborts the target and the
/// policies already fetched for earlier stores are dropped.
pub async fn collect(
    api: &dyn ObjectStorageApi,
    target: &Target,
    cancel: &CancellationToken,
) -> Result<Vec<StoreSnapshot>> {
    let stores = list_stores(api, target, cancel).await?;
    tracing::debug!(target_name = %target.name, stores = stores.len(), "Listed stores");

    let mut snapshots = Vec::with_capacity(stores.len());
    for store in stores {
        let policies = until_cancelled(
            cancel,
            api.list_storage_policies(&target.cloud_name, store.id),
        )
        .await
        .map_err(|source| ScrapeError::ListPolicies {
            target: target.name.clone(),
            store_id: store.id,
            store_name: store.name.clone(),
            source,
        })?;

        tracing::debug!(
            target_name = %target.name,
            store = %store.name,
            policies = policies.len(),
            "Listed storage policies"
        );
        snapshots.push(StoreSnapshot { store, policies });
    }

    Ok(snapshots)
}

/// Lists the stores of `target` and returns how many there are.
///
/// Used for reachability checks; shares nothing with a running scrape.
pub async fn probe(
    api: &dyn ObjectStorageApi,
    target: &Target,
    cancel: &CancellationToken,
) -> Result<usize> {
    Ok(list_stores(api, target, cancel).await?.len())
}
