//! A map-bound walker that can be steered directly or sent along a path.

use gridstar_core::{Location, SpatialMap};
use log::debug;

use crate::config::SearchConfig;
use crate::error::PathError;
use crate::pathfinder::Pathfinder;

/// An agent standing on a [`SpatialMap`].
///
/// Manual moves check walkability before committing. Paths found with
/// [`find_path_to`](Self::find_path_to) are consumed one location at a time
/// by [`follow_path`](Self::follow_path); the path is cleared once its last
/// location is reached.
#[derive(Debug, Clone)]
pub struct Agent {
    position: Location,
    pathfinder: Pathfinder,
    path: Vec<Location>,
    // index of the next location to step onto
    cursor: usize,
}

impl Agent {
    /// An agent at `position` with the default [`SearchConfig`].
    pub fn new(position: Location) -> Self {
        Self::with_config(position, SearchConfig::default())
    }

    /// An agent at `position` whose pathfinder uses `config`.
    pub fn with_config(position: Location, config: SearchConfig) -> Self {
        Self {
            position,
            pathfinder: Pathfinder::with_config(config),
            path: Vec::new(),
            cursor: 0,
        }
    }

    /// Current location.
    #[inline]
    pub fn position(&self) -> Location {
        self.position
    }

    /// Teleport without any map check. Any current path is kept.
    pub fn set_position(&mut self, position: Location) {
        self.position = position;
    }

    /// Step north if that cell is walkable. Returns whether the agent moved.
    pub fn move_up(&mut self, map: &SpatialMap) -> bool {
        self.try_move(map, self.position.shift(0, -1))
    }

    /// Step south if that cell is walkable.
    pub fn move_down(&mut self, map: &SpatialMap) -> bool {
        self.try_move(map, self.position.shift(0, 1))
    }

    /// Step west if that cell is walkable.
    pub fn move_left(&mut self, map: &SpatialMap) -> bool {
        self.try_move(map, self.position.shift(-1, 0))
    }

    /// Step east if that cell is walkable.
    pub fn move_right(&mut self, map: &SpatialMap) -> bool {
        self.try_move(map, self.position.shift(1, 0))
    }

    fn try_move(&mut self, map: &SpatialMap, to: Location) -> bool {
        if !map.is_walkable(to) {
            return false;
        }
        self.position = to;
        true
    }

    /// Plan a path from the current position to `target`.
    ///
    /// On failure the current path is cleared. When `target` is the current
    /// position the request succeeds but leaves nothing to follow.
    pub fn find_path_to(&mut self, map: &SpatialMap, target: Location) -> Result<(), PathError> {
        self.clear_path();
        let path = self.pathfinder.find_path(map, self.position, target)?;
        self.path = path.locations;
        self.cursor = 1;
        if self.cursor >= self.path.len() {
            self.clear_path();
        }
        Ok(())
    }

    /// Step onto the next location of the current path.
    ///
    /// Returns the new position, or `None` if there is no path. If the next
    /// location has become blocked since planning, the path is dropped and
    /// the agent stays put.
    pub fn follow_path(&mut self, map: &SpatialMap) -> Option<Location> {
        let next = *self.path.get(self.cursor)?;
        if !map.is_walkable(next) {
            debug!("path blocked at {next}, dropping remaining path");
            self.clear_path();
            return None;
        }
        self.position = next;
        self.cursor += 1;
        if self.cursor >= self.path.len() {
            self.clear_path();
        }
        Some(next)
    }

    /// Forget the current path.
    pub fn clear_path(&mut self) {
        self.path.clear();
        self.cursor = 0;
    }

    /// Whether there are locations left to follow.
    #[inline]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// The full current path, start location included.
    pub fn current_path(&self) -> &[Location] {
        &self.path
    }

    /// Locations still to be walked.
    pub fn remaining(&self) -> &[Location] {
        self.path.get(self.cursor..).unwrap_or_default()
    }

    /// The pathfinder and its last-search diagnostics.
    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }
}
