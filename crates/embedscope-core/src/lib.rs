#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for the dimensionality reduction stage.
pub const TRACING_TARGET_REDUCE: &str = "embedscope_core::reduce";

/// Tracing target for pipeline orchestration.
pub const TRACING_TARGET_PIPELINE: &str = "embedscope_core::pipeline";

mod error;
mod pipeline;
mod reduce;
mod render;
mod source;
mod types;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use pipeline::Pipeline;
pub use reduce::{N_COMPONENTS, reduce_to_3d};
pub use render::PlotRenderer;
pub use source::VectorSource;
pub use types::{LabelSequence, Record, ReducedMatrix, UNKNOWN_LABEL, VectorMatrix};
