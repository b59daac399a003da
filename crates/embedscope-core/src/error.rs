//! Error handling for the embedscope pipeline.
//!
//! Every stage reports failures through the same [`Error`] type, classified by
//! [`ErrorKind`]:
//!
//! - **Configuration**: required settings are missing or blank
//! - **Connection**: the vector store handshake or a request failed
//! - **Data**: a record carries a malformed or missing embedding
//! - **Dimensionality**: too few records or dimensions for the projection
//! - **Render**: the viewer could not be started or fed

use strum::{AsRefStr, IntoStaticStr};

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for pipeline operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while running the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A required configuration value is missing or blank.
    Configuration,
    /// Connecting to or talking with the vector store failed.
    Connection,
    /// A fetched record is malformed.
    Data,
    /// The matrix shape does not allow the requested projection.
    Dimensionality,
    /// The plot could not be rendered.
    Render,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration error"),
            Self::Connection => write!(f, "connection error"),
            Self::Data => write!(f, "data error"),
            Self::Dimensionality => write!(f, "dimensionality error"),
            Self::Render => write!(f, "render error"),
        }
    }
}

/// A structured error carrying its kind, a message and an optional cause.
#[derive(Debug, thiserror::Error)]
#[error("{}", .message.as_ref().map(|m| format!("{}: {}", .kind, m)).unwrap_or_else(|| .kind.to_string()))]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional additional message providing more context.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a connection error.
    pub fn connection() -> Self {
        Self::new(ErrorKind::Connection)
    }

    /// Creates a data error.
    pub fn data() -> Self {
        Self::new(ErrorKind::Data)
    }

    /// Creates a dimensionality error.
    pub fn dimensionality() -> Self {
        Self::new(ErrorKind::Dimensionality)
    }

    /// Creates a render error.
    pub fn render() -> Self {
        Self::new(ErrorKind::Render)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}
