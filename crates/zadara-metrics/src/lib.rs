//! Scrape-time collection of Zadara object storage metrics.
//!
//! On every scrape, [`StorageMetrics`] asks each configured target for its
//! object stores and their storage policies (see [`aggregate`]) and flattens
//! the result into labelled observations of the fixed instruments declared in
//! [`registry`]. The exporter publishes those observations into a Prometheus
//! registry only when the whole scrape succeeded.

pub mod aggregate;
pub mod error;
pub mod observe;
pub mod registry;

#[cfg(test)]
mod test_support;

pub use aggregate::StoreSnapshot;
pub use error::{ScrapeError, ScrapeErrorKind};
pub use observe::{
    AttributeSet, Observation, Observer, ScrapeBuffer, ScrapeSummary, ScrapeTarget, StorageMetrics,
};
pub use registry::{FloatMetric, InstrumentSet, IntMetric, MetricLevel};
