//! Grid geometry: coordinates, cell quantization, distance and adjacency.
//!
//! Raw coordinates live in scene units (pixels). Every comparison is made on
//! the center of the containing cell so a pixel-precise click resolves to
//! whole-square semantics.
mod anchor;
mod coordinate;
mod metric;

pub use anchor::Anchor;
pub use coordinate::Coordinate;
pub use metric::{GridMetric, SelfSquare};
