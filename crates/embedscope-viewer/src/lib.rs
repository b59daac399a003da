#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod error;
mod scatter;
mod viewer;

pub use config::{DEFAULT_APP_ID, DEFAULT_PORT, DEFAULT_VIEWER_BIN, ViewerConfig};
pub use error::{Error, Result};
pub use scatter::{AXIS_LABELS, PALETTE, label_colors, log_scatter};
pub use viewer::RerunViewer;

/// Tracing target for viewer operations.
pub const TRACING_TARGET: &str = "embedscope_viewer";
