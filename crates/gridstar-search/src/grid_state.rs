use std::fmt;
use std::hash::{Hash, Hasher};

use gridstar_core::{Location, SpatialMap};
use log::warn;

use crate::distance::manhattan;
use crate::traits::SearchState;

/// A map location as seen by the search engine.
///
/// The state borrows the map it belongs to rather than owning it, so the
/// map must outlive every search that uses the state and cannot be edited
/// while one is in progress. Identity is the location alone: equality and
/// hashing ignore which map the state is bound to.
#[derive(Clone, Copy)]
pub struct GridState<'m> {
    location: Location,
    map: Option<&'m SpatialMap>,
}

impl<'m> GridState<'m> {
    /// A state at `location` on `map`.
    pub fn new(location: Location, map: &'m SpatialMap) -> Self {
        Self {
            location,
            map: Some(map),
        }
    }

    /// A state with no map. It can be compared and estimated but produces
    /// no successors.
    pub fn unbound(location: Location) -> Self {
        Self {
            location,
            map: None,
        }
    }

    /// The location this state stands for.
    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    /// The map this state is bound to.
    #[inline]
    pub fn map(&self) -> Option<&'m SpatialMap> {
        self.map
    }
}

impl PartialEq for GridState<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for GridState<'_> {}

impl Hash for GridState<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

impl fmt::Debug for GridState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridState")
            .field("location", &self.location)
            .field("bound", &self.map.is_some())
            .finish()
    }
}

impl SearchState for GridState<'_> {
    /// Manhattan distance. Admissible and consistent for unit-cost
    /// 4-directional movement.
    fn goal_distance_estimate(&self, goal: &Self) -> f32 {
        manhattan(self.location, goal.location) as f32
    }

    fn is_goal(&self, goal: &Self) -> bool {
        self.location == goal.location
    }

    /// Walkable cardinal neighbours, minus the cell we just came from.
    /// Longer cycles are left to the engine's closed set.
    fn successors(&self, parent: Option<&Self>, out: &mut Vec<Self>) -> bool {
        let Some(map) = self.map else {
            warn!("successors requested for unbound state at {}", self.location);
            return false;
        };
        let from = parent.map(|p| p.location);
        out.extend(
            map.neighbors(self.location)
                .into_iter()
                .filter(|&n| Some(n) != from)
                .map(|n| GridState::new(n, map)),
        );
        true
    }

    // Uniform terrain; weighted terrain would read the map here.
    fn cost(&self, _successor: &Self) -> f32 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstar_core::CellKind;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(s: &GridState<'_>) -> u64 {
        let mut h = DefaultHasher::new();
        s.hash(&mut h);
        h.finish()
    }

    fn succ_locations(s: &GridState<'_>, parent: Option<&GridState<'_>>) -> Vec<Location> {
        let mut out = Vec::new();
        assert!(s.successors(parent, &mut out));
        out.iter().map(GridState::location).collect()
    }

    #[test]
    fn estimate_is_manhattan() {
        let map = SpatialMap::new(10, 10);
        let a = GridState::new(Location::new(1, 1), &map);
        let b = GridState::new(Location::new(4, 5), &map);
        assert_eq!(a.goal_distance_estimate(&b), 7.0);
        assert_eq!(a.goal_distance_estimate(&a), 0.0);
    }

    #[test]
    fn goal_test_uses_location() {
        let map = SpatialMap::new(5, 5);
        let a = GridState::new(Location::new(2, 2), &map);
        assert!(a.is_goal(&GridState::unbound(Location::new(2, 2))));
        assert!(!a.is_goal(&GridState::new(Location::new(2, 3), &map)));
    }

    #[test]
    fn successors_follow_map_neighbors() {
        let map = SpatialMap::new(5, 5);
        let s = GridState::new(Location::new(2, 2), &map);
        assert_eq!(
            succ_locations(&s, None),
            vec![
                Location::new(2, 1),
                Location::new(3, 2),
                Location::new(2, 3),
                Location::new(1, 2),
            ]
        );
    }

    #[test]
    fn successors_exclude_parent() {
        let map = SpatialMap::new(5, 5);
        let s = GridState::new(Location::new(2, 2), &map);
        let parent = GridState::new(Location::new(2, 1), &map);
        let locs = succ_locations(&s, Some(&parent));
        assert_eq!(locs.len(), 3);
        assert!(!locs.contains(&Location::new(2, 1)));
    }

    #[test]
    fn successors_skip_blocked_cells() {
        let mut map = SpatialMap::new(3, 3);
        map.set_cell(Location::new(1, 0), CellKind::Blocked);
        let s = GridState::new(Location::new(0, 0), &map);
        assert_eq!(succ_locations(&s, None), vec![Location::new(0, 1)]);
    }

    #[test]
    fn unbound_state_has_no_successors() {
        let s = GridState::unbound(Location::new(1, 1));
        let mut out = Vec::new();
        assert!(!s.successors(None, &mut out));
        assert!(out.is_empty());
    }

    #[test]
    fn unit_edge_cost() {
        let map = SpatialMap::new(3, 3);
        let a = GridState::new(Location::new(0, 0), &map);
        let b = GridState::new(Location::new(1, 0), &map);
        assert_eq!(a.cost(&b), 1.0);
    }

    #[test]
    fn identity_ignores_map_binding() {
        let map_a = SpatialMap::new(3, 3);
        let map_b = SpatialMap::new(8, 8);
        let a = GridState::new(Location::new(1, 2), &map_a);
        let b = GridState::new(Location::new(1, 2), &map_b);
        let c = GridState::unbound(Location::new(1, 2));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(hash_of(&a), hash_of(&c));
        assert_ne!(a, GridState::new(Location::new(2, 1), &map_a));
    }
}
