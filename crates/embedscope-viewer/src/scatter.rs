//! Scatter plot logging onto a Rerun recording stream.

use std::collections::HashMap;

use embedscope_core::{LabelSequence, ReducedMatrix};
use rerun::{Arrows3D, Color, Points3D, RecordingStream, TextDocument};

use crate::TRACING_TARGET;
use crate::error::{Error, Result};

/// Titles of the three component axes.
pub const AXIS_LABELS: [&str; 3] = ["PCA 1", "PCA 2", "PCA 3"];

/// Colors assigned to distinct labels, in order of first appearance.
pub const PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],  // Blue
    [255, 127, 14],  // Orange
    [44, 160, 44],   // Green
    [214, 39, 40],   // Red
    [148, 103, 189], // Purple
    [140, 86, 75],   // Brown
    [227, 119, 194], // Pink
    [127, 127, 127], // Gray
    [188, 189, 34],  // Olive
    [23, 190, 207],  // Cyan
];

const UNLABELED_COLOR: [u8; 3] = [160, 160, 160];
const AXIS_COLOR: [u8; 3] = [90, 90, 90];

const POINTS_PATH: &str = "embeddings/points";
const AXES_PATH: &str = "embeddings/axes";
const SUMMARY_PATH: &str = "embeddings/summary";

/// Assigns one palette color per distinct label.
///
/// Colors repeat once there are more distinct labels than palette entries.
pub fn label_colors(labels: &[String]) -> Vec<[u8; 3]> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    labels
        .iter()
        .map(|label| {
            let next = seen.len();
            let index = *seen.entry(label.as_str()).or_insert(next);
            PALETTE[index % PALETTE.len()]
        })
        .collect()
}

/// Logs `points` as a labeled point cloud with component axes.
///
/// Labels pair with points by index. With an empty label list every point is
/// drawn unlabeled in a neutral color; any other length mismatch is logged
/// and the unmatched points are drawn unlabeled.
pub fn log_scatter(
    rec: &RecordingStream,
    points: &ReducedMatrix,
    labels: &LabelSequence,
) -> Result<()> {
    if !labels.is_empty() && labels.len() != points.len() {
        tracing::warn!(
            target: TRACING_TARGET,
            points = points.len(),
            labels = labels.len(),
            "Label count does not match point count"
        );
    }

    let extent = points
        .points()
        .iter()
        .flatten()
        .fold(0.0_f32, |max, v| max.max(v.abs()));
    let extent = if extent > 0.0 { extent } else { 1.0 };

    let mut colors = label_colors(labels);
    colors.resize(points.len(), UNLABELED_COLOR);

    let mut cloud = Points3D::new(points.points().iter().copied())
        .with_colors(colors.into_iter().map(|[r, g, b]| Color::from_rgb(r, g, b)))
        .with_radii([extent * 0.015]);

    if !labels.is_empty() {
        let mut text = labels.clone();
        text.resize(points.len(), String::new());
        cloud = cloud.with_labels(text);
    }

    rec.log(POINTS_PATH, &cloud)
        .map_err(|e| Error::Stream(e.to_string()))?;

    let [r, g, b] = AXIS_COLOR;
    let axes = Arrows3D::from_vectors([
        [extent, 0.0, 0.0],
        [0.0, extent, 0.0],
        [0.0, 0.0, extent],
    ])
    .with_labels(AXIS_LABELS)
    .with_colors([Color::from_rgb(r, g, b)]);

    rec.log(AXES_PATH, &axes)
        .map_err(|e| Error::Stream(e.to_string()))?;

    let [v1, v2, v3] = points.explained_variance_ratio();
    let summary = format!(
        "{} points\n\nExplained variance: {} {:.1}%, {} {:.1}%, {} {:.1}%",
        points.len(),
        AXIS_LABELS[0],
        v1 * 100.0,
        AXIS_LABELS[1],
        v2 * 100.0,
        AXIS_LABELS[2],
        v3 * 100.0,
    );

    rec.log(SUMMARY_PATH, &TextDocument::new(summary))
        .map_err(|e| Error::Stream(e.to_string()))?;

    tracing::debug!(
        target: TRACING_TARGET,
        points = points.len(),
        extent,
        "Logged scatter plot"
    );

    Ok(())
}
