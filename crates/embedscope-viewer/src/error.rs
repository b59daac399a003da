//! Error types for the viewer.

use std::net::SocketAddr;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for viewer operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while starting or feeding the viewer.
#[derive(Debug, Error)]
pub enum Error {
    /// The viewer executable could not be started.
    #[error("failed to start viewer `{bin}`: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// The viewer exited before it accepted a connection.
    #[error("viewer exited before accepting connections ({status})")]
    Exited { status: ExitStatus },

    /// The viewer did not open its port in time.
    #[error("viewer did not listen on {addr} within {timeout:?}")]
    Startup { addr: SocketAddr, timeout: Duration },

    /// The recording stream could not be created or written.
    #[error("recording stream error: {0}")]
    Stream(String),

    /// Waiting for the viewer process failed.
    #[error("failed to wait for viewer: {0}")]
    Wait(#[source] std::io::Error),
}

impl From<Error> for embedscope_core::Error {
    fn from(err: Error) -> Self {
        embedscope_core::Error::render()
            .with_message(err.to_string())
            .with_source(err)
    }
}
