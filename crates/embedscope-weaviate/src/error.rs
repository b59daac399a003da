//! Error types for Weaviate operations.

use embedscope_core::ErrorKind;
use thiserror::Error;

/// Result type alias for Weaviate operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while talking to Weaviate.
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is missing or blank.
    #[error("{0} is not set")]
    MissingSetting(&'static str),

    /// A setting is present but unusable.
    #[error("invalid {setting}: {reason}")]
    InvalidSetting {
        setting: &'static str,
        reason: String,
    },

    /// The connection handshake failed.
    #[error("failed to connect to Weaviate: {0}")]
    Connect(#[source] Box<Error>),

    /// The server rejected the API key.
    #[error("authentication failed with HTTP {status}")]
    Unauthorized { status: u16 },

    /// The server answered with an unexpected status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A named vector map lacks the expected entry, or the entry is empty.
    #[error("No numerical vector `{name}` found for object {id}")]
    MissingNamedVector { id: String, name: String },

    /// An object carries neither a flat nor a named vector.
    #[error("object {id} has no vector")]
    MissingVector { id: String },
}

impl Error {
    /// Wraps this error as a handshake failure.
    pub(crate) fn into_connect(self) -> Self {
        match self {
            Self::Connect(_) => self,
            other => Self::Connect(Box::new(other)),
        }
    }

    /// Returns the pipeline error kind this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSetting(_) | Self::InvalidSetting { .. } => ErrorKind::Configuration,
            Self::Connect(_)
            | Self::Unauthorized { .. }
            | Self::Status { .. }
            | Self::Reqwest(_) => ErrorKind::Connection,
            Self::Serde(_) | Self::MissingNamedVector { .. } | Self::MissingVector { .. } => {
                ErrorKind::Data
            }
        }
    }
}

impl From<Error> for embedscope_core::Error {
    fn from(err: Error) -> Self {
        embedscope_core::Error::new(err.kind())
            .with_message(err.to_string())
            .with_source(err)
    }
}
