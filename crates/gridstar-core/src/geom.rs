//! Geometry primitives: [`Location`] and [`Bounds`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Add;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// An integer grid cell coordinate. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Location {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Unit offsets for the four cardinal directions, in North, East, South,
    /// West order.
    pub const CARDINALS: [Location; 4] = [
        Location::new(0, -1),
        Location::new(1, 0),
        Location::new(0, 1),
        Location::new(-1, 0),
    ];

    /// Create a new location.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a location shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four cardinal neighbours (north, east, south, west).
    #[inline]
    pub fn neighbors_4(self) -> [Location; 4] {
        Self::CARDINALS.map(|d| self + d)
    }

    /// Whether `other` is exactly one cardinal step away.
    #[inline]
    pub fn is_adjacent_4(self, other: Location) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

// --- trait impls for Location ---

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Location {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Inclusive top-left corner.
    pub min: Location,
    /// Exclusive bottom-right corner.
    pub max: Location,
}

impl Bounds {
    /// Create new bounds from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Location::new(x0.min(x1), y0.min(y1)),
            max: Location::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells covered.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the rectangle has zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Intersection of two rectangles. Disjoint inputs give the empty default.
    #[inline]
    pub fn intersect(self, other: Bounds) -> Self {
        let r = Self {
            min: Location::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Location::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Row-major iterator over every location inside.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Location;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the locations in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Location,
}

impl Iterator for BoundsIter {
    type Item = Location;

    #[inline]
    fn next(&mut self) -> Option<Location> {
        if self.cur.y >= self.bounds.max.y || self.bounds.is_empty() {
            return None;
        }
        let loc = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.max.x {
            self.cur.x = self.bounds.min.x;
            self.cur.y += 1;
        }
        Some(loc)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.max.y {
            return (0, Some(0));
        }
        let w = self.bounds.width() as usize;
        let remaining_in_row = (self.bounds.max.x - self.cur.x) as usize;
        let remaining_rows = (self.bounds.max.y - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn location_round_trip() {
        let loc = Location::new(-3, 7);
        let json = serde_json::to_string(&loc).unwrap();
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, back);
    }
}
