use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use zadara_client::Target;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    #[serde(default = "default_listen_path")]
    pub listen_path: String,
    /// Timeout of each request to a Command Center
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            listen_path: default_listen_path(),
            request_timeout_secs: default_request_timeout_secs(),
            targets: Vec::new(),
        }
    }
}

fn default_listen_address() -> String {
    "0.0.0.0:9090".to_string()
}

fn default_listen_path() -> String {
    "/metrics".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl ExporterConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Loads `explicit` if given, otherwise the first existing file of
    /// [`ExporterConfig::search_paths`]. Without any file the defaults are
    /// used, which means no targets.
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            tracing::info!(file = %path.display(), "Using config file");
            return Self::load(path);
        }

        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                tracing::info!(file = %path.display(), "Using config file");
                Self::load(&path)
            }
            None => {
                tracing::warn!("Could not find a config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/zadara-exporter").join(CONFIG_FILE_NAME)];
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(home).join(".zadara-exporter").join(CONFIG_FILE_NAME));
        }
        paths.push(PathBuf::from(CONFIG_FILE_NAME));
        paths
    }

    /// Command line flags and `ZADARA_*` variables win over the file.
    pub fn apply_overrides(&mut self, listen_address: Option<String>, listen_path: Option<String>) {
        if let Some(address) = listen_address {
            self.listen_address = address;
        }
        if let Some(path) = listen_path {
            self.listen_path = path;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.listen_path.starts_with('/') {
            bail!("listen_path must start with '/', got {:?}", self.listen_path);
        }
        if self.listen_path == "/healthz" {
            bail!("listen_path cannot be /healthz");
        }

        let mut names = HashSet::new();
        for (i, target) in self.targets.iter().enumerate() {
            if target.name.trim().is_empty() {
                bail!("targets[{i}]: name must not be empty");
            }
            if target.url.trim().is_empty() {
                bail!("target {}: url must not be empty", target.name);
            }
            if target.cloud_name.trim().is_empty() {
                bail!("target {}: cloud_name must not be empty", target.name);
            }
            if !names.insert(target.name.as_str()) {
                bail!("target {} is configured more than once", target.name);
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
