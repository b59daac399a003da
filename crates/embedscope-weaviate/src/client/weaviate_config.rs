//! Weaviate connection configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the cluster URL.
pub const WEAVIATE_URL_ENV: &str = "WEAVIATE_URL";

/// Environment variable holding the API key.
pub const WEAVIATE_API_KEY_ENV: &str = "WEAVIATE_API_KEY";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a Weaviate cluster.
///
/// Both the URL and the API key are optional at parse time so that a missing
/// value surfaces as a configuration error from [`WeaviateConfig::credentials`]
/// rather than as a usage message.
#[derive(Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct WeaviateConfig {
    /// Weaviate cluster URL (e.g. "abc123.c0.europe-west3.gcp.weaviate.cloud")
    #[cfg_attr(feature = "config", arg(long = "weaviate-url", env = "WEAVIATE_URL"))]
    pub weaviate_url: Option<String>,

    /// API key for Weaviate Cloud or secured instances
    #[cfg_attr(
        feature = "config",
        arg(long = "weaviate-api-key", env = "WEAVIATE_API_KEY", hide_env_values = true)
    )]
    #[serde(skip_serializing)]
    pub weaviate_api_key: Option<String>,

    /// Request timeout in seconds (optional)
    #[cfg_attr(
        feature = "config",
        arg(long = "weaviate-timeout-secs", env = "WEAVIATE_TIMEOUT_SECS")
    )]
    pub weaviate_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for WeaviateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaviateConfig")
            .field("weaviate_url", &self.weaviate_url)
            .field(
                "weaviate_api_key",
                &self.weaviate_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("weaviate_timeout_secs", &self.weaviate_timeout_secs)
            .finish()
    }
}

/// Validated URL and API key.
#[derive(Clone)]
pub struct WeaviateCredentials {
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for WeaviateCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeaviateCredentials")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl WeaviateCredentials {
    /// Base URL without a trailing slash, e.g. `https://abc.weaviate.cloud`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API key.
    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl WeaviateConfig {
    /// Creates a configuration with a URL and API key.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            weaviate_url: Some(url.into()),
            weaviate_api_key: Some(api_key.into()),
            weaviate_timeout_secs: None,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.weaviate_timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Returns the request timeout, using the default if unset or zero.
    pub fn timeout(&self) -> Duration {
        match self.weaviate_timeout_secs {
            Some(secs) if secs > 0 => Duration::from_secs(secs),
            _ => DEFAULT_TIMEOUT,
        }
    }

    /// Validates the URL and API key.
    ///
    /// The URL is checked first. A bare host gets an `https://` scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSetting`] if either value is missing or blank,
    /// or [`Error::InvalidSetting`] if the URL does not parse.
    pub fn credentials(&self) -> Result<WeaviateCredentials> {
        let url = non_blank(self.weaviate_url.as_deref())
            .ok_or(Error::MissingSetting(WEAVIATE_URL_ENV))?;
        let api_key = non_blank(self.weaviate_api_key.as_deref())
            .ok_or(Error::MissingSetting(WEAVIATE_API_KEY_ENV))?;

        Ok(WeaviateCredentials {
            base_url: normalize_url(url)?,
            api_key: api_key.to_owned(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Adds a missing scheme and strips trailing slashes.
fn normalize_url(raw: &str) -> Result<String> {
    let candidate = if raw.contains("://") {
        raw.to_owned()
    } else {
        format!("https://{raw}")
    };

    let url = Url::parse(&candidate).map_err(|e| Error::InvalidSetting {
        setting: WEAVIATE_URL_ENV,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_owned()),
        scheme => Err(Error::InvalidSetting {
            setting: WEAVIATE_URL_ENV,
            reason: format!("unsupported scheme `{scheme}`"),
        }),
    }
}
