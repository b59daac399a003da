//! Viewer configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default viewer executable.
pub const DEFAULT_VIEWER_BIN: &str = "rerun";

/// Default port the viewer listens on for SDK connections.
pub const DEFAULT_PORT: u16 = 9876;

/// Default application id shown in the viewer.
pub const DEFAULT_APP_ID: &str = "embedscope";

/// How to start and reach the Rerun viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ViewerConfig {
    /// Rerun viewer executable
    #[cfg_attr(
        feature = "config",
        arg(long = "viewer-bin", env = "EMBEDSCOPE_VIEWER_BIN", default_value = DEFAULT_VIEWER_BIN)
    )]
    pub viewer_bin: String,

    /// Port the viewer listens on
    #[cfg_attr(
        feature = "config",
        arg(long = "viewer-port", env = "EMBEDSCOPE_VIEWER_PORT", default_value_t = DEFAULT_PORT)
    )]
    pub viewer_port: u16,

    /// Application id shown in the viewer
    #[cfg_attr(
        feature = "config",
        arg(long = "viewer-app-id", env = "EMBEDSCOPE_VIEWER_APP_ID", default_value = DEFAULT_APP_ID)
    )]
    pub viewer_app_id: String,

    /// Seconds to wait for a freshly started viewer to accept connections
    #[cfg_attr(
        feature = "config",
        arg(long = "viewer-startup-secs", env = "EMBEDSCOPE_VIEWER_STARTUP_SECS", default_value_t = 10)
    )]
    pub viewer_startup_secs: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewer_bin: DEFAULT_VIEWER_BIN.to_owned(),
            viewer_port: DEFAULT_PORT,
            viewer_app_id: DEFAULT_APP_ID.to_owned(),
            viewer_startup_secs: 10,
        }
    }
}

impl ViewerConfig {
    /// Sets the viewer executable.
    #[must_use]
    pub fn with_viewer_bin(mut self, bin: impl Into<String>) -> Self {
        self.viewer_bin = bin.into();
        self
    }

    /// Sets the viewer port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.viewer_port = port;
        self
    }

    /// Local address the viewer listens on.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.viewer_port))
    }

    /// How long to wait for the viewer to accept connections.
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.viewer_startup_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.viewer_bin, "rerun");
        assert_eq!(config.addr().to_string(), "127.0.0.1:9876");
        assert_eq!(config.startup_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_zero_startup_is_clamped() {
        let config = ViewerConfig {
            viewer_startup_secs: 0,
            ..ViewerConfig::default()
        };
        assert_eq!(config.startup_timeout(), Duration::from_secs(1));
    }
}
