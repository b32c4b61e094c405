//! Walkability map for grid pathfinding.
//!
//! [`SpatialMap`] stores one [`CellKind`] per location of a `width × height`
//! rectangle anchored at the origin. Search code only needs the query side
//! ([`SpatialMap::in_bounds`], [`SpatialMap::is_walkable`],
//! [`SpatialMap::neighbors`]); the owning application edits cells through
//! [`SpatialMap::set_cell`]. Because editing takes `&mut self`, a map cannot
//! change while any search holds a shared borrow of it.

use std::fmt;

use crate::geom::{Bounds, Location};

/// Kind of a single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Open floor an agent may stand on.
    #[default]
    Walkable,
    /// Obstacle.
    Blocked,
}

impl CellKind {
    /// Whether an agent may stand on this cell.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        matches!(self, CellKind::Walkable)
    }
}

/// Cell data that does not describe a valid map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapShapeError {
    /// Width or height below zero.
    NegativeDimension {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
    /// `cells` does not hold exactly `width * height` entries.
    CellCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied cells.
        actual: usize,
    },
}

impl fmt::Display for MapShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDimension { width, height } => {
                write!(f, "negative map dimensions {width}x{height}")
            }
            Self::CellCountMismatch { expected, actual } => {
                write!(f, "map needs {expected} cells, got {actual}")
            }
        }
    }
}

impl std::error::Error for MapShapeError {}

/// A bounded 2D grid of [`CellKind`] values.
///
/// Deserialization goes through [`SpatialMap::from_cells`], so a payload
/// whose cell count disagrees with its dimensions is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSpatialMap"))]
pub struct SpatialMap {
    cells: Vec<CellKind>,
    width: i32,
    height: i32,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSpatialMap {
    cells: Vec<CellKind>,
    width: i32,
    height: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSpatialMap> for SpatialMap {
    type Error = MapShapeError;

    fn try_from(raw: RawSpatialMap) -> Result<Self, MapShapeError> {
        Self::from_cells(raw.width, raw.height, raw.cells)
    }
}

impl SpatialMap {
    /// Create a map where every cell is [`CellKind::Walkable`].
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![CellKind::Walkable; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Build a map from row-major cell data.
    pub fn from_cells(width: i32, height: i32, cells: Vec<CellKind>) -> Result<Self, MapShapeError> {
        if width < 0 || height < 0 {
            return Err(MapShapeError::NegativeDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(MapShapeError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The rectangle covered by this map.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, loc: Location) -> Option<usize> {
        if !self.in_bounds(loc) {
            return None;
        }
        // in_bounds guarantees all three are non-negative
        Some(loc.y as usize * self.width as usize + loc.x as usize)
    }

    /// Whether `loc` lies inside the map.
    #[inline]
    pub fn in_bounds(&self, loc: Location) -> bool {
        loc.x >= 0 && loc.x < self.width && loc.y >= 0 && loc.y < self.height
    }

    /// Whether `loc` is inside the map and walkable.
    #[inline]
    pub fn is_walkable(&self, loc: Location) -> bool {
        self.cell(loc).is_walkable()
    }

    /// Cell kind at `loc`. Out-of-bounds locations read as blocked.
    #[inline]
    pub fn cell(&self, loc: Location) -> CellKind {
        match self.index(loc) {
            Some(i) => self.cells[i],
            None => CellKind::Blocked,
        }
    }

    /// Set the cell at `loc`. Does nothing if out of bounds.
    pub fn set_cell(&mut self, loc: Location, kind: CellKind) {
        if let Some(i) = self.index(loc) {
            self.cells[i] = kind;
        }
    }

    /// Fill the whole map with `kind`.
    pub fn fill(&mut self, kind: CellKind) {
        self.cells.fill(kind);
    }

    /// Fill the part of `rect` that overlaps the map with `kind`.
    pub fn fill_rect(&mut self, rect: Bounds, kind: CellKind) {
        for loc in rect.intersect(self.bounds()) {
            self.set_cell(loc, kind);
        }
    }

    /// Count cells of the given kind.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// Row-major iterator over `(location, kind)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Location, CellKind)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// Walkable cardinal neighbours of `loc`, in North, East, South, West
    /// order.
    pub fn neighbors(&self, loc: Location) -> Vec<Location> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(loc, &mut buf);
        buf
    }

    /// Append the walkable cardinal neighbours of `loc` into `buf`, in the
    /// same order as [`neighbors`](Self::neighbors). `buf` is not cleared.
    pub fn neighbors_into(&self, loc: Location, buf: &mut Vec<Location>) {
        buf.extend(
            loc.neighbors_4()
                .into_iter()
                .filter(|&n| self.is_walkable(n)),
        );
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn map_round_trip() {
        let mut m = SpatialMap::new(3, 3);
        m.set_cell(Location::new(1, 1), CellKind::Blocked);
        let json = serde_json::to_string(&m).unwrap();
        let back: SpatialMap = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn rejects_cell_count_mismatch() {
        let res = serde_json::from_str::<SpatialMap>(r#"{"cells":[],"width":3,"height":3}"#);
        let err = res.unwrap_err();
        assert!(err.to_string().contains("map needs 9 cells, got 0"));
    }

    #[test]
    fn rejects_negative_dimensions() {
        let res = serde_json::from_str::<SpatialMap>(r#"{"cells":[],"width":-2,"height":0}"#);
        assert!(res.is_err());
    }
}
