#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod error;
mod objects;
mod source;

pub use client::{
    DEFAULT_TIMEOUT, ServerMeta, WEAVIATE_API_KEY_ENV, WEAVIATE_URL_ENV, WeaviateClient,
    WeaviateConfig, WeaviateCredentials,
};
pub use error::{Error, Result};
pub use objects::{ObjectPage, ObjectVector, WeaviateObject};
pub use source::{
    DEFAULT_COLLECTION, DEFAULT_LABEL_PROPERTY, DEFAULT_PAGE_SIZE, DEFAULT_VECTOR_NAME,
    FetchOptions, WeaviateSource, fetch_records,
};

/// Tracing target for low-level HTTP requests.
pub const TRACING_TARGET_CLIENT: &str = "embedscope_weaviate::client";

/// Tracing target for session lifecycle events.
pub const TRACING_TARGET_CONNECTION: &str = "embedscope_weaviate::connection";

/// Tracing target for object listing.
pub const TRACING_TARGET_OBJECTS: &str = "embedscope_weaviate::objects";
