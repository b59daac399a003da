#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use std::process;

use embedscope_core::Pipeline;
use embedscope_viewer::RerunViewer;
use embedscope_weaviate::WeaviateSource;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "embedscope_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "embedscope_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "embedscope_cli::config";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    tracing::error!(
        target: TRACING_TARGET_SHUTDOWN,
        error = %error,
        "application terminated with error"
    );
    println!("Error: {error}");

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init()?;

    telemetry::init_tracing()?;
    cli.log_config();

    let source = WeaviateSource::with_options(cli.weaviate, cli.fetch);
    let renderer = RerunViewer::new(cli.viewer);

    let reduced = Pipeline::new(source, renderer).run().await?;

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        points = reduced.len(),
        explained_variance = ?reduced.explained_variance_ratio(),
        "Viewer closed"
    );

    Ok(())
}
