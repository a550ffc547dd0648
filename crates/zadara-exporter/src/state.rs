use crate::config::ExporterConfig;
use anyhow::Context;
use prometheus::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use zadara_client::CommandCenterClient;
use zadara_metrics::{InstrumentSet, ScrapeTarget, StorageMetrics};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<StorageMetrics>,
    pub instruments: Arc<InstrumentSet>,
    pub registry: Registry,
    /// Held for the whole of a scrape so at most one runs at a time.
    pub scrape_lock: Arc<Mutex<()>>,
    /// Cancelled on shutdown; aborts in-flight upstream calls.
    pub shutdown: CancellationToken,
    pub config: Arc<ExporterConfig>,
}

impl AppState {
    /// Builds one client per target and registers the instruments.
    pub fn new(config: ExporterConfig, shutdown: CancellationToken) -> anyhow::Result<Self> {
        let timeout = config.request_timeout();
        let mut targets = Vec::with_capacity(config.targets.len());
        for target in &config.targets {
            let client = CommandCenterClient::new(target, timeout)
                .with_context(|| format!("Failed to build client for target {}", target.name))?;
            targets.push(ScrapeTarget {
                target: target.clone(),
                api: Arc::new(client),
            });
        }

        let registry = Registry::new();
        let instruments =
            InstrumentSet::register(&registry).context("Failed to register storage metrics")?;

        Ok(Self {
            pipeline: Arc::new(StorageMetrics::new(targets)),
            instruments: Arc::new(instruments),
            registry,
            scrape_lock: Arc::new(Mutex::new(())),
            shutdown,
            config: Arc::new(config),
        })
    }
}
