//! The flat coordinate + offset array representation and the two engines that produce and
//! consume it.
//!
//! [`flatten`] walks a homogeneous sequence of geometries once and emits a single interleaved
//! XY buffer plus one offset array per nesting level. [`rebuild`] is the exact reverse walk.
//! Neither knows anything about Arrow; only [`crate::array`] does.

mod flatten;
mod rebuild;

pub use flatten::flatten;
pub use rebuild::rebuild;
pub(crate) use rebuild::validate_offsets;

use geo::Geometry;

use crate::datatypes::GeometryType;
use crate::error::Result;

/// The flat representation of a geometry sequence.
///
/// `coords` holds interleaved `(x0, y0, x1, y1, ...)` pairs. `offsets` holds one offset array
/// per nesting level of `geometry_type`, ordered innermost first: `offsets[0]` delimits
/// coordinate pairs, `offsets[k]` delimits entries of `offsets[k - 1]`. Each offset array
/// starts at 0 and is monotonically non-decreasing.
///
/// These buffers are transient scratch data: they are produced by one engine and consumed by
/// the other (or by [`crate::array::wrap`]) within a single conversion; no state outlives a
/// call.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatCoords {
    pub geometry_type: GeometryType,
    pub coords: Vec<f64>,
    pub offsets: Vec<Vec<i32>>,
}

impl FlatCoords {
    /// The number of geometries this flat representation describes.
    pub fn len(&self) -> usize {
        self.offsets
            .last()
            .map_or(self.coords.len() / 2, |outer| outer.len().saturating_sub(1))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reconstruct the geometry objects. See [`rebuild`].
    pub fn rebuild(&self) -> Result<Vec<Geometry>> {
        rebuild(self.geometry_type, &self.coords, &self.offsets)
    }
}
