//! The fixed set of gauges exported for every store and storage policy.
//!
//! Instruments are declared once at startup. Scrapes never create or drop
//! instruments; they only replace the series inside them.

use crate::observe::Observation;
use prometheus::{GaugeVec, IntGaugeVec, Opts, Registry};
use std::collections::HashMap;

/// Label key holding the configured target name.
pub const TARGET_NAME: &str = "name";
pub const CLOUD_NAME: &str = "cloud_name";
pub const STORE_NAME: &str = "store_name";
pub const POLICY_NAME: &str = "policy_name";

const STORE_LABELS: &[&str] = &[TARGET_NAME, CLOUD_NAME, STORE_NAME];
const POLICY_LABELS: &[&str] = &[TARGET_NAME, CLOUD_NAME, STORE_NAME, POLICY_NAME];

/// Which entity an instrument describes; decides its label keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricLevel {
    Store,
    Policy,
}

impl MetricLevel {
    pub fn label_keys(self) -> &'static [&'static str] {
        match self {
            MetricLevel::Store => STORE_LABELS,
            MetricLevel::Policy => POLICY_LABELS,
        }
    }
}

/// Whole-number gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntMetric {
    AccountsCount,
    UsersCount,
    ContainersCount,
    ObjectsCount,
    DrivesCount,
    Cache,
    FreeStorage,
    UsedStorage,
    RingBalanceNormalCount,
    RingBalanceDegradedCount,
    RingBalanceCriticalCount,
}

impl IntMetric {
    pub const ALL: [IntMetric; 11] = [
        IntMetric::AccountsCount,
        IntMetric::UsersCount,
        IntMetric::ContainersCount,
        IntMetric::ObjectsCount,
        IntMetric::DrivesCount,
        IntMetric::Cache,
        IntMetric::FreeStorage,
        IntMetric::UsedStorage,
        IntMetric::RingBalanceNormalCount,
        IntMetric::RingBalanceDegradedCount,
        IntMetric::RingBalanceCriticalCount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IntMetric::AccountsCount => "zadara_accounts_count",
            IntMetric::UsersCount => "zadara_users_count",
            IntMetric::ContainersCount => "zadara_containers_count",
            IntMetric::ObjectsCount => "zadara_objects_count",
            IntMetric::DrivesCount => "zadara_drives_count",
            IntMetric::Cache => "zadara_cache",
            IntMetric::FreeStorage => "zadara_free_storage",
            IntMetric::UsedStorage => "zadara_used_storage",
            IntMetric::RingBalanceNormalCount => "zadara_ring_balance_normal_count",
            IntMetric::RingBalanceDegradedCount => "zadara_ring_balance_degraded_count",
            IntMetric::RingBalanceCriticalCount => "zadara_ring_balance_critical_count",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            IntMetric::AccountsCount => "The number of accounts in the object store.",
            IntMetric::UsersCount => "The number of users in the object store.",
            IntMetric::ContainersCount => "The number of containers in the object store.",
            IntMetric::ObjectsCount => "The number of objects in the object store.",
            IntMetric::DrivesCount => "The number of drives assigned to the object store.",
            IntMetric::Cache => "The cache size of the object store.",
            IntMetric::FreeStorage => "The amount of free storage in the Zadara storage.",
            IntMetric::UsedStorage => "The amount of used storage in the Zadara storage.",
            IntMetric::RingBalanceNormalCount => "The number of ring partitions in normal state.",
            IntMetric::RingBalanceDegradedCount => "The number of ring partitions in degraded state.",
            IntMetric::RingBalanceCriticalCount => "The number of ring partitions in critical state.",
        }
    }

    pub fn level(self) -> MetricLevel {
        match self {
            IntMetric::AccountsCount
            | IntMetric::UsersCount
            | IntMetric::ContainersCount
            | IntMetric::ObjectsCount
            | IntMetric::DrivesCount
            | IntMetric::Cache => MetricLevel::Store,
            _ => MetricLevel::Policy,
        }
    }
}

/// Floating-point gauges, exported exactly as the API reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatMetric {
    HealthPercentage,
    RebalancePercentage,
    PercentageDrivesAdded,
    RingBalanceNormalPercentage,
    RingBalanceDegradedPercentage,
    RingBalanceCriticalPercentage,
}

impl FloatMetric {
    pub const ALL: [FloatMetric; 6] = [
        FloatMetric::HealthPercentage,
        FloatMetric::RebalancePercentage,
        FloatMetric::PercentageDrivesAdded,
        FloatMetric::RingBalanceNormalPercentage,
        FloatMetric::RingBalanceDegradedPercentage,
        FloatMetric::RingBalanceCriticalPercentage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FloatMetric::HealthPercentage => "zadara_health_percentage",
            FloatMetric::RebalancePercentage => "zadara_rebalance_percentage",
            FloatMetric::PercentageDrivesAdded => "zadara_percentage_drives_added",
            FloatMetric::RingBalanceNormalPercentage => "zadara_ring_balance_normal_percentage",
            FloatMetric::RingBalanceDegradedPercentage => "zadara_ring_balance_degraded_percentage",
            FloatMetric::RingBalanceCriticalPercentage => "zadara_ring_balance_critical_percentage",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            FloatMetric::HealthPercentage => "The health percentage of the storage policy.",
            FloatMetric::RebalancePercentage => "The rebalance progress of the storage policy.",
            FloatMetric::PercentageDrivesAdded => "The percentage of drives added to the storage policy.",
            FloatMetric::RingBalanceNormalPercentage => "The percentage of the ring in normal state.",
            FloatMetric::RingBalanceDegradedPercentage => "The percentage of the ring in degraded state.",
            FloatMetric::RingBalanceCriticalPercentage => "The percentage of the ring in critical state.",
        }
    }

    pub fn level(self) -> MetricLevel {
        MetricLevel::Policy
    }
}

/// Registered gauge vectors, one per [`IntMetric`] and [`FloatMetric`].
pub struct InstrumentSet {
    ints: HashMap<IntMetric, IntGaugeVec>,
    floats: HashMap<FloatMetric, GaugeVec>,
}

impl InstrumentSet {
    /// Creates every instrument and registers it with `registry`.
    ///
    /// # Errors
    ///
    /// Fails if an instrument cannot be built or a metric with the same name
    /// is already registered. Callers treat this as fatal.
    pub fn register(registry: &Registry) -> prometheus::Result<Self> {
        let mut ints = HashMap::with_capacity(IntMetric::ALL.len());
        for metric in IntMetric::ALL {
            let gauge = IntGaugeVec::new(
                Opts::new(metric.name(), metric.help()),
                metric.level().label_keys(),
            )?;
            registry.register(Box::new(gauge.clone()))?;
            ints.insert(metric, gauge);
        }

        let mut floats = HashMap::with_capacity(FloatMetric::ALL.len());
        for metric in FloatMetric::ALL {
            let gauge = GaugeVec::new(
                Opts::new(metric.name(), metric.help()),
                metric.level().label_keys(),
            )?;
            registry.register(Box::new(gauge.clone()))?;
            floats.insert(metric, gauge);
        }

        Ok(Self { ints, floats })
    }

    /// Drops every series of every instrument.
    pub fn clear(&self) {
        self.ints.values().for_each(IntGaugeVec::reset);
        self.floats.values().for_each(GaugeVec::reset);
    }

    /// Replaces all series with the observations of one scrape.
    pub fn publish(&self, observations: &[Observation]) {
        self.clear();

        for observation in observations {
            let values = observation.attributes().values();
            let result = match observation {
                Observation::Int { metric, value, .. } => self.ints[metric]
                    .get_metric_with_label_values(&values)
                    .map(|gauge| gauge.set(*value)),
                Observation::Float { metric, value, .. } => self.floats[metric]
                    .get_metric_with_label_values(&values)
                    .map(|gauge| gauge.set(*value)),
            };
            if let Err(e) = result {
                tracing::warn!(
                    metric = observation.name(),
                    error = %e,
                    "Dropping observation with mismatched labels"
                );
            }
        }
    }
}
