//! Vector source abstraction.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{LabelSequence, VectorMatrix};

/// A store that can hand over every embedding of a collection together with
/// its label.
///
/// Implementations own their connection lifecycle: a connection opened by
/// [`fetch_vectors`](VectorSource::fetch_vectors) must be released before the
/// call returns, whether it succeeds or fails.
#[async_trait]
pub trait VectorSource: Send + Sync {
    /// Fetches all vectors and their labels, rows and labels paired by index.
    async fn fetch_vectors(&self) -> Result<(VectorMatrix, LabelSequence)>;
}

#[async_trait]
impl<T> VectorSource for Box<T>
where
    T: VectorSource + ?Sized,
{
    async fn fetch_vectors(&self) -> Result<(VectorMatrix, LabelSequence)> {
        (**self).fetch_vectors().await
    }
}
