//! Plot renderer abstraction.

use crate::error::Result;
use crate::types::{LabelSequence, ReducedMatrix};

/// Draws reduced points as a labeled 3D scatter plot.
///
/// Rendering is blocking: implementations return once the display surface
/// has been dismissed. Labels pair with points by index; mismatched lengths
/// are the caller's responsibility.
pub trait PlotRenderer {
    /// Renders `points`, annotating each with its label when labels are given.
    fn render(&self, points: &ReducedMatrix, labels: &LabelSequence) -> Result<()>;
}

impl<T> PlotRenderer for Box<T>
where
    T: PlotRenderer + ?Sized,
{
    fn render(&self, points: &ReducedMatrix, labels: &LabelSequence) -> Result<()> {
        (**self).render(points, labels)
    }
}
