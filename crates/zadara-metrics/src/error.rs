use std::num::ParseFloatError;
use zadara_client::ClientError;

/// Why a scrape stopped.
///
/// Every variant carries the target and, where known, the store and policy
/// that were being processed, so the message alone is enough to act on.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("target {target}: listing stores of cloud {cloud_name}: {source}")]
    ListStores {
        target: String,
        cloud_name: String,
        #[source]
        source: ClientError,
    },

    #[error("target {target}: listing storage policies of store {store_name} (id {store_id}): {source}")]
    ListPolicies {
        target: String,
        store_id: i64,
        store_name: String,
        #[source]
        source: ClientError,
    },

    #[error(
        "target {target}: store {store_name}: policy {policy_name}: \
         percentage_drives_added {value:?} is not a number: {source}"
    )]
    Parse {
        target: String,
        store_name: String,
        policy_name: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Failure class of a [`ScrapeError`], logged as the `kind` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeErrorKind {
    Transport,
    Decode,
    Api,
    Parse,
}

impl std::fmt::Display for ScrapeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeErrorKind::Transport => write!(f, "transport"),
            ScrapeErrorKind::Decode => write!(f, "decode"),
            ScrapeErrorKind::Api => write!(f, "api"),
            ScrapeErrorKind::Parse => write!(f, "parse"),
        }
    }
}

impl ScrapeError {
    pub fn kind(&self) -> ScrapeErrorKind {
        match self {
            ScrapeError::ListStores { source, .. } | ScrapeError::ListPolicies { source, .. } => {
                match source.kind() {
                    zadara_client::ErrorKind::Transport => ScrapeErrorKind::Transport,
                    zadara_client::ErrorKind::Decode => ScrapeErrorKind::Decode,
                    zadara_client::ErrorKind::Api => ScrapeErrorKind::Api,
                }
            }
            ScrapeError::Parse { .. } => ScrapeErrorKind::Parse,
        }
    }

    /// Name of the target the scrape failed on.
    pub fn target(&self) -> &str {
        match self {
            ScrapeError::ListStores { target, .. }
            | ScrapeError::ListPolicies { target, .. }
            | ScrapeError::Parse { target, .. } => target,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
