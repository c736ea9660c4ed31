//! Columnar storage of vector geometries: convert [`geo`] geometry objects to and from the
//! GeoArrow nested-list encoding (a fixed-size list of interleaved XY coordinates wrapped in up
//! to three levels of variable-length lists), plus GeoParquet and Feather table I/O.
//!
//! The two halves of the conversion are independent of each other:
//!
//! - [`flatten`] decomposes a homogeneous sequence of geometries into a single flat coordinate
//!   buffer plus 0–3 offset arrays.
//! - [`rebuild`] reconstructs the geometry objects from those buffers.
//!
//! [`array::wrap`] and [`array::unwrap`] translate between the flat representation and Arrow
//! arrays; they are the only place that knows about the Arrow memory layout.
//!
//! ```
//! use geo::{point, Geometry};
//! use geocolumn::{flatten, rebuild};
//!
//! let geoms = vec![Geometry::Point(point!(x: 1., y: 2.))];
//! let flat = flatten(&geoms).unwrap();
//! assert_eq!(flat.coords, vec![1., 2.]);
//!
//! let restored = rebuild(flat.geometry_type, &flat.coords, &flat.offsets).unwrap();
//! assert_eq!(restored, geoms);
//! ```

#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod array;
pub mod coords;
pub mod datatypes;
pub mod error;
pub mod io;
pub mod metadata;
pub mod offsets;
pub mod registry;
pub mod table;
#[cfg(test)]
pub(crate) mod test;

pub use coords::{flatten, rebuild, FlatCoords};
pub use datatypes::GeometryType;
pub use error::{GeoColumnError, Result};
pub use registry::ExtensionRegistry;
pub use table::GeoTable;
