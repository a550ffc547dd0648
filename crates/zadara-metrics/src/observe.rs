//! Scrape-time observation pipeline.
//!
//! [`StorageMetrics::observe`] walks every configured target, store and
//! storage policy in order and reports one observation per instrument to an
//! [`Observer`]. The first failure ends the scrape.

use crate::aggregate::{self, StoreSnapshot};
use crate::error::{Result, ScrapeError};
use crate::registry::{FloatMetric, IntMetric, CLOUD_NAME, POLICY_NAME, STORE_NAME, TARGET_NAME};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use zadara_client::{ObjectStorageApi, Target, ZiosStoragePolicy};

/// Ordered label set of one observation.
///
/// Only constructible through [`AttributeSet::store`] and
/// [`AttributeSet::policy`], so every series of an instrument carries the
/// same keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSet {
    pairs: Vec<(&'static str, String)>,
}

impl AttributeSet {
    pub fn store(target_name: &str, cloud_name: &str, store_name: &str) -> Self {
        Self {
            pairs: vec![
                (TARGET_NAME, target_name.to_string()),
                (CLOUD_NAME, cloud_name.to_string()),
                (STORE_NAME, store_name.to_string()),
            ],
        }
    }

    pub fn policy(target_name: &str, cloud_name: &str, store_name: &str, policy_name: &str) -> Self {
        let mut set = Self::store(target_name, cloud_name, store_name);
        set.pairs.push((POLICY_NAME, policy_name.to_string()));
        set
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.pairs.iter().map(|(key, _)| *key).collect()
    }

    pub fn values(&self) -> Vec<&str> {
        self.pairs.iter().map(|(_, value)| value.as_str()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Same pairs plus `policy_name`, for policies of the store this set describes.
    fn with_policy(&self, policy_name: &str) -> Self {
        let mut set = self.clone();
        set.pairs.push((POLICY_NAME, policy_name.to_string()));
        set
    }
}

/// Write-only sink for measurements.
pub trait Observer {
    fn observe_int(&mut self, metric: IntMetric, value: i64, attributes: &AttributeSet);
    fn observe_float(&mut self, metric: FloatMetric, value: f64, attributes: &AttributeSet);
}

/// One recorded measurement.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    Int {
        metric: IntMetric,
        value: i64,
        attributes: AttributeSet,
    },
    Float {
        metric: FloatMetric,
        value: f64,
        attributes: AttributeSet,
    },
}

impl Observation {
    pub fn name(&self) -> &'static str {
        match self {
            Observation::Int { metric, .. } => metric.name(),
            Observation::Float { metric, .. } => metric.name(),
        }
    }

    pub fn attributes(&self) -> &AttributeSet {
        match self {
            Observation::Int { attributes, .. } | Observation::Float { attributes, .. } => attributes,
        }
    }
}

/// Observer that keeps every observation of a scrape, in emission order.
#[derive(Debug, Default)]
pub struct ScrapeBuffer {
    observations: Vec<Observation>,
}

impl ScrapeBuffer {
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

impl Observer for ScrapeBuffer {
    fn observe_int(&mut self, metric: IntMetric, value: i64, attributes: &AttributeSet) {
        self.observations.push(Observation::Int {
            metric,
            value,
            attributes: attributes.clone(),
        });
    }

    fn observe_float(&mut self, metric: FloatMetric, value: f64, attributes: &AttributeSet) {
        self.observations.push(Observation::Float {
            metric,
            value,
            attributes: attributes.clone(),
        });
    }
}

/// A target paired with the client used to reach it.
#[derive(Clone)]
pub struct ScrapeTarget {
    pub target: Target,
    pub api: Arc<dyn ObjectStorageApi>,
}

/// What a successful scrape walked through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub targets: usize,
    pub stores: usize,
    pub policies: usize,
}

/// The observation pipeline.
///
/// Holds no state between scrapes besides the target list.
pub struct StorageMetrics {
    targets: Vec<ScrapeTarget>,
}

impl StorageMetrics {
    pub fn new(targets: Vec<ScrapeTarget>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[ScrapeTarget] {
        &self.targets
    }

    /// Runs one scrape.
    ///
    /// Targets are visited sequentially in configuration order. The first
    /// listing or parse failure aborts the whole scrape; observations already
    /// reported stay with the observer.
    pub async fn observe<O>(&self, cancel: &CancellationToken, observer: &mut O) -> Result<ScrapeSummary>
    where
        O: Observer + Send,
    {
        let mut summary = ScrapeSummary::default();

        for scrape_target in &self.targets {
            let target = &scrape_target.target;
            let snapshots = aggregate::collect(scrape_target.api.as_ref(), target, cancel).await?;

            for snapshot in &snapshots {
                summary.policies += observe_store(observer, target, snapshot)?;
            }

            summary.stores += snapshots.len();
            summary.targets += 1;
        }

        Ok(summary)
    }
}

/// Reports the store counters and every policy of one snapshot; returns the
/// number of policies observed.
fn observe_store<O>(observer: &mut O, target: &Target, snapshot: &StoreSnapshot) -> Result<usize>
where
    O: Observer + ?Sized,
{
    let store = &snapshot.store;
    let attrs = AttributeSet::store(&target.name, &target.cloud_name, &store.name);

    observer.observe_int(IntMetric::AccountsCount, store.accounts_count, &attrs);
    observer.observe_int(IntMetric::UsersCount, store.users_count, &attrs);
    observer.observe_int(IntMetric::ContainersCount, store.containers_count, &attrs);
    observer.observe_int(IntMetric::ObjectsCount, store.objects_count, &attrs);
    observer.observe_int(IntMetric::DrivesCount, store.drives, &attrs);
    observer.observe_int(IntMetric::Cache, store.cache, &attrs);

    for policy in &snapshot.policies {
        let policy_attrs = attrs.with_policy(&policy.name);
        observe_policy(observer, policy, &policy_attrs).map_err(|source| ScrapeError::Parse {
            target: target.name.clone(),
            store_name: store.name.clone(),
            policy_name: policy.name.clone(),
            value: policy.percentage_drives_added.clone(),
            source,
        })?;
    }

    Ok(snapshot.policies.len())
}

fn observe_policy<O>(
    observer: &mut O,
    policy: &ZiosStoragePolicy,
    attrs: &AttributeSet,
) -> std::result::Result<(), std::num::ParseFloatError>
where
    O: Observer + ?Sized,
{
    // Parsed first so a bad value leaves no observations for this policy.
    let drives_added: f64 = policy.percentage_drives_added.parse()?;
    let ring = &policy.ring_balance;

    observer.observe_float(FloatMetric::PercentageDrivesAdded, drives_added, attrs);
    observer.observe_float(FloatMetric::RingBalanceNormalPercentage, ring.normal_percentage, attrs);
    observer.observe_float(FloatMetric::RingBalanceDegradedPercentage, ring.degraded_percentage, attrs);
    observer.observe_float(FloatMetric::RingBalanceCriticalPercentage, ring.critical_percentage, attrs);
    observer.observe_int(IntMetric::FreeStorage, policy.free_capacity, attrs);
    observer.observe_int(IntMetric::UsedStorage, policy.used_capacity, attrs);
    observer.observe_float(FloatMetric::HealthPercentage, policy.health_percentage, attrs);
    observer.observe_float(FloatMetric::RebalancePercentage, policy.rebalance_percentage, attrs);
    observer.observe_int(IntMetric::RingBalanceNormalCount, ring.normal_count, attrs);
    observer.observe_int(IntMetric::RingBalanceDegradedCount, ring.degraded_count, attrs);
    observer.observe_int(IntMetric::RingBalanceCriticalCount, ring.critical_count, attrs);

    Ok(())
}
