//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── weaviate: WeaviateConfig  # Cluster URL, API key, timeout
//! ├── fetch: FetchOptions       # Collection, label property, vector name, paging
//! └── viewer: ViewerConfig      # Rerun executable and port
//! ```
//!
//! Every option can also be set through its environment variable; with the
//! `dotenv` feature a `.env` file is loaded before parsing.

use std::ffi::OsString;
use std::process;

use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use embedscope_viewer::ViewerConfig;
use embedscope_weaviate::{FetchOptions, WeaviateConfig};
use serde::{Deserialize, Serialize};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "embedscope")]
#[command(about = "Plot a Weaviate collection's embeddings as a 3D PCA scatter")]
#[command(version)]
pub struct Cli {
    /// Weaviate connection settings.
    #[clap(flatten)]
    pub weaviate: WeaviateConfig,

    /// What to read from the collection.
    #[clap(flatten)]
    pub fetch: FetchOptions,

    /// Viewer process settings.
    #[clap(flatten)]
    pub viewer: ViewerConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// `--help` and `--version` print and exit as usual. Any other parse
    /// failure, including a malformed environment variable, is returned as a
    /// configuration error.
    pub fn init() -> anyhow::Result<Self> {
        Self::load_dotenv();
        Self::try_init_from(std::env::args_os())
    }

    /// Parses `args` the way [`Cli::init`] does, without loading `.env`.
    pub fn try_init_from<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(err)
                if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelp
                        | ClapErrorKind::DisplayVersion
                        | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) =>
            {
                err.exit()
            }
            Err(err) => Err(usage_error(&err).into()),
        }
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information and configuration (no secrets).
    pub fn log_config(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            weaviate_url = ?self.weaviate.weaviate_url,
            api_key_set = self.weaviate.weaviate_api_key.is_some(),
            collection = %self.fetch.collection,
            label_property = %self.fetch.label_property,
            vector_name = %self.fetch.vector_name,
            page_size = self.fetch.page_size,
            viewer_bin = %self.viewer.viewer_bin,
            viewer_port = self.viewer.viewer_port,
            "Configuration"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Reduces a clap error to its one-line summary.
fn usage_error(err: &clap::Error) -> embedscope_core::Error {
    let rendered = err.to_string();
    let summary = rendered.lines().next().unwrap_or_default();
    let summary = summary.strip_prefix("error: ").unwrap_or(summary).trim();

    embedscope_core::Error::configuration().with_message(summary)
}
