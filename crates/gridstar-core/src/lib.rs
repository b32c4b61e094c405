//! **gridstar-core**: geometry and map types for grid pathfinding.
//!
//! This crate provides the data-source side of the *gridstar* workspace:
//! integer [`Location`]s, half-open [`Bounds`] rectangles and the
//! [`SpatialMap`] walkability grid that search code queries.

#![warn(missing_docs)]

pub mod geom;
pub mod map;

pub use geom::{Bounds, BoundsIter, Location};
pub use map::{CellKind, MapShapeError, SpatialMap};
