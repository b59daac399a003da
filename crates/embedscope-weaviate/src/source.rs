//! Weaviate-backed [`VectorSource`].

use async_trait::async_trait;
#[cfg(feature = "config")]
use clap::Args;
use embedscope_core::{LabelSequence, Record, VectorMatrix, VectorSource};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_OBJECTS;
use crate::client::{WeaviateClient, WeaviateConfig};
use crate::error::{Error, Result};

/// Default collection to read.
pub const DEFAULT_COLLECTION: &str = "FAQ";

/// Default property holding each object's label.
pub const DEFAULT_LABEL_PROPERTY: &str = "category";

/// Default named vector to read when objects carry named vectors.
pub const DEFAULT_VECTOR_NAME: &str = "text2vecweaviate";

/// Default number of objects requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// What to read from the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct FetchOptions {
    /// Collection to read vectors from
    #[cfg_attr(
        feature = "config",
        arg(long, env = "WEAVIATE_COLLECTION", default_value = DEFAULT_COLLECTION)
    )]
    pub collection: String,

    /// Object property used as the point label
    #[cfg_attr(
        feature = "config",
        arg(long, env = "WEAVIATE_LABEL_PROPERTY", default_value = DEFAULT_LABEL_PROPERTY)
    )]
    pub label_property: String,

    /// Named vector to read when objects carry named vectors
    #[cfg_attr(
        feature = "config",
        arg(long, env = "WEAVIATE_VECTOR_NAME", default_value = DEFAULT_VECTOR_NAME)
    )]
    pub vector_name: String,

    /// Number of objects requested per page
    #[cfg_attr(
        feature = "config",
        arg(long, env = "WEAVIATE_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)
    )]
    pub page_size: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_owned(),
            label_property: DEFAULT_LABEL_PROPERTY.to_owned(),
            vector_name: DEFAULT_VECTOR_NAME.to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FetchOptions {
    /// Sets the collection name.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<()> {
        if self.collection.trim().is_empty() {
            return Err(Error::InvalidSetting {
                setting: "collection",
                reason: "collection name cannot be empty".to_owned(),
            });
        }

        if self.page_size == 0 {
            return Err(Error::InvalidSetting {
                setting: "page size",
                reason: "page size must be greater than zero".to_owned(),
            });
        }

        Ok(())
    }
}

/// Reads every object of a collection through the cursor API.
///
/// The first malformed object aborts the walk; no partial result is returned.
pub async fn fetch_records(client: &WeaviateClient, options: &FetchOptions) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let page = client
            .list_objects(&options.collection, options.page_size, after.as_deref())
            .await?;
        let count = page.objects.len();

        for object in page.objects {
            after = Some(object.id.clone());
            records.push(object.into_record(&options.label_property, &options.vector_name)?);
        }

        if count < options.page_size {
            break;
        }
    }

    tracing::debug!(
        target: TRACING_TARGET_OBJECTS,
        collection = %options.collection,
        count = records.len(),
        "Fetched all objects"
    );

    Ok(records)
}

/// A [`VectorSource`] reading one Weaviate collection.
///
/// Each call to [`fetch_vectors`](VectorSource::fetch_vectors) opens its own
/// session and closes it before returning, on success and on failure alike.
#[derive(Debug, Clone, Default)]
pub struct WeaviateSource {
    config: WeaviateConfig,
    options: FetchOptions,
}

impl WeaviateSource {
    /// Creates a source with default fetch options.
    pub fn new(config: WeaviateConfig) -> Self {
        Self::with_options(config, FetchOptions::default())
    }

    /// Creates a source with explicit fetch options.
    pub fn with_options(config: WeaviateConfig, options: FetchOptions) -> Self {
        Self { config, options }
    }

    /// Returns the fetch options.
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        self.options.validate()?;

        let client = WeaviateClient::connect(&self.config).await?;
        let result = fetch_records(&client, &self.options).await;
        client.close();

        result
    }
}

#[async_trait]
impl VectorSource for WeaviateSource {
    async fn fetch_vectors(&self) -> embedscope_core::Result<(VectorMatrix, LabelSequence)> {
        let records = self.fetch().await?;
        VectorMatrix::from_records(records)
    }
}
