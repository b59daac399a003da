//! Weaviate client module.
//!
//! This module provides the session used to talk to a Weaviate cluster over
//! its REST API, together with its configuration.

mod weaviate_client;
mod weaviate_config;

pub use weaviate_client::{ServerMeta, WeaviateClient};
pub use weaviate_config::{
    DEFAULT_TIMEOUT, WEAVIATE_API_KEY_ENV, WEAVIATE_URL_ENV, WeaviateConfig, WeaviateCredentials,
};
