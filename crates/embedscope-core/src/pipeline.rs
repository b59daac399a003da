//! Fetch, reduce and render, in that order.

use crate::TRACING_TARGET_PIPELINE;
use crate::error::Result;
use crate::reduce::reduce_to_3d;
use crate::render::PlotRenderer;
use crate::source::VectorSource;
use crate::types::ReducedMatrix;

/// The three-stage embedding inspection pipeline.
///
/// Each stage runs once; the first error aborts the run and is returned
/// unchanged.
///
/// # Examples
///
/// ```rust,ignore
/// use embedscope_core::Pipeline;
///
/// let pipeline = Pipeline::new(source, renderer);
/// let reduced = pipeline.run().await?;
/// ```
#[derive(Debug)]
pub struct Pipeline<S, R> {
    source: S,
    renderer: R,
}

impl<S, R> Pipeline<S, R>
where
    S: VectorSource,
    R: PlotRenderer,
{
    /// Creates a pipeline over a vector source and a renderer.
    pub fn new(source: S, renderer: R) -> Self {
        Self { source, renderer }
    }

    /// Runs the pipeline and returns the projected points once the plot has
    /// been dismissed.
    pub async fn run(&self) -> Result<ReducedMatrix> {
        let (matrix, labels) = self.source.fetch_vectors().await?;
        tracing::info!(
            target: TRACING_TARGET_PIPELINE,
            records = matrix.nrows(),
            dimensions = matrix.ncols(),
            "Fetched vectors"
        );

        let reduced = reduce_to_3d(&matrix)?;

        tracing::info!(
            target: TRACING_TARGET_PIPELINE,
            points = reduced.len(),
            "Rendering scatter plot"
        );
        self.renderer.render(&reduced, &labels)?;

        Ok(reduced)
    }

    /// Returns the vector source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::types::{LabelSequence, Record, VectorMatrix};

    struct StaticSource {
        records: Vec<Record>,
    }

    #[async_trait]
    impl VectorSource for StaticSource {
        async fn fetch_vectors(&self) -> Result<(VectorMatrix, LabelSequence)> {
            VectorMatrix::from_records(self.records.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl VectorSource for FailingSource {
        async fn fetch_vectors(&self) -> Result<(VectorMatrix, LabelSequence)> {
            Err(Error::configuration().with_message("WEAVIATE_API_KEY is not set"))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(usize, LabelSequence)>>,
    }

    impl PlotRenderer for RecordingRenderer {
        fn render(&self, points: &ReducedMatrix, labels: &LabelSequence) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((points.len(), labels.clone()));
            Ok(())
        }
    }

    fn faq_records() -> Vec<Record> {
        let labels = ["billing", "shipping", "billing", "returns", "billing"];
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let vector = (0..128)
                    .map(|j| ((i * 31 + j * 7) % 17) as f32 / 17.0)
                    .collect();
                Record::new(vector, *label)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_renders_labeled_points() {
        let pipeline = Pipeline::new(
            StaticSource {
                records: faq_records(),
            },
            RecordingRenderer::default(),
        );

        let reduced = pipeline.run().await.unwrap();
        assert_eq!(reduced.len(), 5);

        let calls = pipeline.renderer().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 5);
        assert_eq!(
            calls[0].1,
            vec!["billing", "shipping", "billing", "returns", "billing"]
        );
    }

    #[tokio::test]
    async fn test_source_error_skips_rendering() {
        let pipeline = Pipeline::new(FailingSource, RecordingRenderer::default());

        let err = pipeline.run().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("WEAVIATE_API_KEY"));
        assert!(pipeline.renderer().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_collection_is_a_dimensionality_error() {
        let pipeline = Pipeline::new(
            StaticSource {
                records: Vec::new(),
            },
            RecordingRenderer::default(),
        );

        let err = pipeline.run().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimensionality);
        assert!(pipeline.renderer().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_boxed_components() {
        let source: Box<dyn VectorSource> = Box::new(StaticSource {
            records: faq_records(),
        });
        let renderer: Box<dyn PlotRenderer> = Box::new(RecordingRenderer::default());

        let reduced = Pipeline::new(source, renderer).run().await.unwrap();
        assert_eq!(reduced.len(), 5);
    }
}
