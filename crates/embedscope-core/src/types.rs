//! Data model shared by the fetch, reduction and rendering stages.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Label used when a record carries no label property.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One item fetched from a vector store collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The embedding vector.
    pub vector: Vec<f32>,
    /// The label or category attached to the item.
    pub label: String,
}

impl Record {
    /// Creates a new record.
    pub fn new(vector: Vec<f32>, label: impl Into<String>) -> Self {
        Self {
            vector,
            label: label.into(),
        }
    }

    /// Creates a record labeled [`UNKNOWN_LABEL`].
    pub fn unlabeled(vector: Vec<f32>) -> Self {
        Self::new(vector, UNKNOWN_LABEL)
    }
}

/// Labels paired by index with the rows of a [`VectorMatrix`].
pub type LabelSequence = Vec<String>;

/// Embedding vectors stacked row by row.
///
/// Rows keep the iteration order of the source and always share one width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorMatrix {
    data: Vec<f32>,
    nrows: usize,
    ncols: usize,
}

impl VectorMatrix {
    /// Stacks `rows` into a matrix.
    ///
    /// # Errors
    ///
    /// Returns a data error naming the first row whose length differs from the
    /// first row's.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * ncols);

        for (index, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::data().with_message(format!(
                    "vector at row {index} has {} dimensions, expected {ncols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            nrows: rows.len(),
            ncols,
        })
    }

    /// Splits records into a matrix and its parallel label sequence.
    pub fn from_records(records: Vec<Record>) -> Result<(Self, LabelSequence)> {
        let (rows, labels): (Vec<_>, Vec<_>) = records
            .into_iter()
            .map(|record| (record.vector, record.label))
            .unzip();
        Ok((Self::from_rows(rows)?, labels))
    }

    /// Number of rows (records).
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns (embedding dimensions).
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns true if the matrix holds no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    /// Returns the row at `index`, if any.
    pub fn row(&self, index: usize) -> Option<&[f32]> {
        (index < self.nrows).then(|| &self.data[index * self.ncols..(index + 1) * self.ncols])
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        (0..self.nrows).map(move |i| &self.data[i * self.ncols..(i + 1) * self.ncols])
    }

    /// Returns the row-major backing storage.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Points projected onto the first three principal components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReducedMatrix {
    points: Vec<[f32; 3]>,
    explained_variance_ratio: [f32; 3],
}

impl ReducedMatrix {
    /// Creates a reduced matrix from projected points.
    pub fn new(points: Vec<[f32; 3]>) -> Self {
        Self {
            points,
            explained_variance_ratio: [0.0; 3],
        }
    }

    /// Sets the share of total variance captured by each component.
    pub fn with_explained_variance_ratio(mut self, ratio: [f32; 3]) -> Self {
        self.explained_variance_ratio = ratio;
        self
    }

    /// Projected points, row `i` matching input row `i`.
    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coordinates of all points along one component axis (0, 1 or 2).
    pub fn axis(&self, component: usize) -> Vec<f32> {
        self.points.iter().map(|p| p[component]).collect()
    }

    /// Share of total variance captured by each component.
    pub fn explained_variance_ratio(&self) -> [f32; 3] {
        self.explained_variance_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_keeps_order() {
        let matrix = VectorMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.ncols(), 2);
        assert_eq!(matrix.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(matrix.row(2), None);
        assert_eq!(matrix.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = VectorMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0]])
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Data);
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = VectorMatrix::from_rows(Vec::new()).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.ncols(), 0);
        assert_eq!(matrix.rows().count(), 0);
    }

    #[test]
    fn test_from_records_pairs_labels() {
        let records = vec![
            Record::new(vec![0.1, 0.2], "billing"),
            Record::unlabeled(vec![0.3, 0.4]),
        ];
        let (matrix, labels) = VectorMatrix::from_records(records).unwrap();
        assert_eq!(matrix.nrows(), labels.len());
        assert_eq!(labels, vec!["billing".to_string(), UNKNOWN_LABEL.to_string()]);
    }

    #[test]
    fn test_reduced_axis() {
        let reduced = ReducedMatrix::new(vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(reduced.axis(2), vec![3.0, 6.0]);
        assert_eq!(reduced.len(), 2);
    }
}
