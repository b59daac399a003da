//! Reqwest-based Weaviate REST client.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::WeaviateConfig;
use crate::error::{Error, Result};
use crate::objects::ObjectPage;
use crate::{TRACING_TARGET_CLIENT, TRACING_TARGET_CONNECTION, TRACING_TARGET_OBJECTS};

/// Longest response body excerpt kept in error messages.
const MAX_ERROR_BODY: usize = 256;

/// Server metadata from `/v1/meta`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerMeta {
    /// Server version, e.g. `1.28.2`.
    #[serde(default)]
    pub version: String,
    /// Server hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

/// An open, authenticated session with a Weaviate cluster.
///
/// Obtain one with [`WeaviateClient::connect`] and release it with
/// [`WeaviateClient::close`] once done.
///
/// # Examples
///
/// ```rust,ignore
/// use embedscope_weaviate::{WeaviateClient, WeaviateConfig};
///
/// let config = WeaviateConfig::new("abc123.weaviate.cloud", api_key);
/// let client = WeaviateClient::connect(&config).await?;
/// let page = client.list_objects("FAQ", 100, None).await;
/// client.close();
/// ```
#[must_use = "a connected client should be closed"]
pub struct WeaviateClient {
    http: Client,
    base_url: String,
    meta: ServerMeta,
}

impl std::fmt::Debug for WeaviateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaviateClient")
            .field("base_url", &self.base_url)
            .field("version", &self.meta.version)
            .finish_non_exhaustive()
    }
}

impl WeaviateClient {
    /// Validates the configuration and opens an authenticated session.
    ///
    /// Configuration is checked before any request is sent. The handshake
    /// waits for `/v1/.well-known/ready` and then reads `/v1/meta`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for missing settings, or
    /// [`Error::Connect`] wrapping the cause if the handshake fails.
    pub async fn connect(config: &WeaviateConfig) -> Result<Self> {
        let credentials = config.credentials()?;
        let timeout = config.timeout();

        tracing::debug!(
            target: TRACING_TARGET_CONNECTION,
            url = %credentials.base_url(),
            timeout_ms = timeout.as_millis(),
            "Connecting to Weaviate"
        );

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", credentials.api_key()))
            .map_err(|e| Error::InvalidSetting {
                setting: super::WEAVIATE_API_KEY_ENV,
                reason: e.to_string(),
            })?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("embedscope/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::from(e).into_connect())?;

        let mut client = Self {
            http,
            base_url: credentials.base_url().to_owned(),
            meta: ServerMeta::default(),
        };

        client.handshake().await.map_err(Error::into_connect)?;

        tracing::info!(
            target: TRACING_TARGET_CONNECTION,
            url = %client.base_url,
            version = %client.meta.version,
            "Connected to Weaviate"
        );

        Ok(client)
    }

    async fn handshake(&mut self) -> Result<()> {
        let endpoint = self.endpoint("/v1/.well-known/ready");
        let response = self.http.get(&endpoint).send().await?;
        Self::check_status(&endpoint, response).await?;

        self.meta = self.get_json("/v1/meta", &[]).await?;
        Ok(())
    }

    /// Metadata read during the handshake.
    pub fn meta(&self) -> &ServerMeta {
        &self.meta
    }

    /// Base URL of the cluster.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists one page of objects in `collection`, vectors included.
    ///
    /// Objects are ordered by id; pass the last id of the previous page as
    /// `after` to continue.
    pub async fn list_objects(
        &self,
        collection: &str,
        limit: usize,
        after: Option<&str>,
    ) -> Result<ObjectPage> {
        let limit = limit.to_string();
        let mut query = vec![
            ("class", collection),
            ("limit", limit.as_str()),
            ("include", "vector"),
        ];
        if let Some(after) = after {
            query.push(("after", after));
        }

        let page: ObjectPage = self.get_json("/v1/objects", &query).await?;

        tracing::trace!(
            target: TRACING_TARGET_OBJECTS,
            collection = %collection,
            after = ?after,
            count = page.objects.len(),
            "Listed objects page"
        );

        Ok(page)
    }

    /// Releases the session.
    pub fn close(self) {
        tracing::debug!(
            target: TRACING_TARGET_CONNECTION,
            url = %self.base_url,
            "Closing Weaviate session"
        );
        drop(self);
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let endpoint = self.endpoint(path);

        tracing::trace!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %endpoint,
            "GET"
        );

        let response = self.http.get(&endpoint).query(query).send().await?;
        let response = Self::check_status(&endpoint, response).await?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }

    async fn check_status(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(Error::Unauthorized {
                status: status.as_u16(),
            });
        }

        let body: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY)
            .collect();

        tracing::warn!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %endpoint,
            status = status.as_u16(),
            "Unexpected response status"
        );

        Err(Error::Status {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            body,
        })
    }
}
