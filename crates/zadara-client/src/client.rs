use crate::error::{ClientError, Result};
use crate::policies::{policies_path, ZiosStoragePoliciesResponse};
use crate::stores::{stores_path, ZiosResponse};
use crate::{Envelope, ObjectStorageApi, Target, Zios, ZiosStoragePolicy};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const TOKEN_HEADER: &str = "x-token";

/// HTTP client bound to one target's Command Center.
///
/// Every request carries the target's token in the `X-Token` header. The
/// whole response body is read before it is inspected, so the connection is
/// released on every exit path.
pub struct CommandCenterClient {
    base_url: Url,
    client: Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl CommandCenterClient {
    pub fn new(target: &Target, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(&target.url).map_err(|e| ClientError::InvalidUrl {
            url: target.url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: target.url.clone(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let mut token = HeaderValue::from_str(&target.token)?;
        token.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token);

        let client = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { base_url, client })
    }

    fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        // `new` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned + Envelope,
    {
        tracing::debug!(url = %url, "Command Center request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: T = serde_json::from_slice(&body)?;
        if decoded.status() == "error" {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: decoded.message().unwrap_or_default().to_string(),
            });
        }

        Ok(decoded)
    }
}

#[async_trait::async_trait]
impl ObjectStorageApi for CommandCenterClient {
    async fn list_stores(&self, cloud_name: &str) -> Result<Vec<Zios>> {
        let resp: ZiosResponse = self.get(self.endpoint(stores_path(cloud_name))).await?;
        Ok(resp.zioses)
    }

    async fn list_storage_policies(
        &self,
        cloud_name: &str,
        store_id: i64,
    ) -> Result<Vec<ZiosStoragePolicy>> {
        let resp: ZiosStoragePoliciesResponse = self
            .get(self.endpoint(policies_path(cloud_name, store_id)))
            .await?;
        Ok(resp.zios_storage_policies)
    }
}
