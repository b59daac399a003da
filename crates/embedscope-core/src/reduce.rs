//! Principal component projection to three dimensions.
//!
//! The projection centers each column on its mean, takes the singular value
//! decomposition of the centered data and keeps the three right-singular
//! vectors with the largest singular values. Inputs are not rescaled.
//!
//! Component signs are fixed so that the largest-magnitude score along each
//! component is positive, which makes repeated runs over the same input
//! produce identical output.

use nalgebra::{DMatrix, DVector};

use crate::TRACING_TARGET_REDUCE;
use crate::error::{Error, Result};
use crate::types::{ReducedMatrix, VectorMatrix};

/// Number of principal components kept by [`reduce_to_3d`].
pub const N_COMPONENTS: usize = 3;

/// Projects `matrix` onto its top three principal components.
///
/// # Errors
///
/// - dimensionality error if the matrix has fewer than three rows or
///   fewer than three columns
/// - data error if any value is NaN or infinite
pub fn reduce_to_3d(matrix: &VectorMatrix) -> Result<ReducedMatrix> {
    let (nrows, ncols) = (matrix.nrows(), matrix.ncols());

    if nrows < N_COMPONENTS || ncols < N_COMPONENTS {
        return Err(Error::dimensionality().with_message(format!(
            "n_components={N_COMPONENTS} needs at least {N_COMPONENTS} records with at least \
             {N_COMPONENTS} dimensions, got {nrows} records with {ncols} dimensions"
        )));
    }

    if let Some(position) = matrix.as_slice().iter().position(|v| !v.is_finite()) {
        return Err(Error::data().with_message(format!(
            "non-finite value in vector at row {}",
            position / ncols
        )));
    }

    tracing::debug!(
        target: TRACING_TARGET_REDUCE,
        records = nrows,
        dimensions = ncols,
        "Computing principal components"
    );

    let centered = center_columns(matrix);
    let svd = centered.clone().svd(false, true);
    let v_t = svd
        .v_t
        .ok_or_else(|| Error::dimensionality().with_message("decomposition produced no components"))?;
    let singular_values = svd.singular_values;

    let mut order: Vec<usize> = (0..singular_values.len()).collect();
    order.sort_by(|&a, &b| singular_values[b].total_cmp(&singular_values[a]));

    let total_variance: f64 = singular_values.iter().map(|s| s * s).sum();
    let mut points = vec![[0.0f32; N_COMPONENTS]; nrows];
    let mut ratio = [0.0f32; N_COMPONENTS];

    for (component, &index) in order.iter().take(N_COMPONENTS).enumerate() {
        let axis: DVector<f64> = v_t.row(index).transpose();
        let mut scores = &centered * axis;

        if scores[scores.iamax()] < 0.0 {
            scores *= -1.0;
        }

        for (point, score) in points.iter_mut().zip(scores.iter()) {
            point[component] = *score as f32;
        }

        if total_variance > 0.0 {
            let sigma = singular_values[index];
            ratio[component] = (sigma * sigma / total_variance) as f32;
        }
    }

    tracing::info!(
        target: TRACING_TARGET_REDUCE,
        records = nrows,
        explained_variance_ratio = ?ratio,
        "Reduced embeddings to 3 components"
    );

    Ok(ReducedMatrix::new(points).with_explained_variance_ratio(ratio))
}

/// Copies the matrix into `f64` and subtracts each column's mean.
fn center_columns(matrix: &VectorMatrix) -> DMatrix<f64> {
    let (nrows, ncols) = (matrix.nrows(), matrix.ncols());
    let mut centered = DMatrix::from_row_iterator(
        nrows,
        ncols,
        matrix.as_slice().iter().map(|&v| f64::from(v)),
    );

    for j in 0..ncols {
        let mean = centered.column(j).mean();
        for i in 0..nrows {
            centered[(i, j)] -= mean;
        }
    }

    centered
}
