//! Grid pathfinding facade over [`AStarSearch`].

use gridstar_core::{Location, SpatialMap};
use log::{debug, info, warn};

use crate::config::SearchConfig;
use crate::engine::{AStarSearch, SearchStatus};
use crate::error::{Endpoint, PathError};
use crate::grid_state::GridState;

/// A path found on a map.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Locations from start to goal, both included.
    pub locations: Vec<Location>,
    /// Accumulated edge cost at the goal.
    pub cost: f32,
    /// Search steps spent finding it.
    pub steps: usize,
}

impl Path {
    /// Number of locations, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Always false for a path returned by [`Pathfinder`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// First location.
    pub fn start(&self) -> Option<Location> {
        self.locations.first().copied()
    }

    /// Last location.
    pub fn goal(&self) -> Option<Location> {
        self.locations.last().copied()
    }

    /// Iterate the locations from start to goal.
    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }
}

/// Snapshot handed to a stop callback between search steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    /// Steps performed so far.
    pub steps: usize,
    /// Entries waiting in the open set.
    pub open: usize,
    /// States already expanded.
    pub closed: usize,
}

/// Finds paths on a [`SpatialMap`] and remembers diagnostics of the most
/// recent request.
#[derive(Debug, Clone, Default)]
pub struct Pathfinder {
    config: SearchConfig,
    last_path_cost: f32,
    last_search_steps: usize,
}

impl Pathfinder {
    /// A pathfinder with the default [`SearchConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A pathfinder with a custom [`SearchConfig`].
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration every search uses.
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Cost of the last successful path, or 0 if the last request failed.
    pub fn last_path_cost(&self) -> f32 {
        self.last_path_cost
    }

    /// Search steps performed by the last request.
    pub fn last_search_steps(&self) -> usize {
        self.last_search_steps
    }

    /// Find a shortest 4-directional path from `start` to `goal`.
    ///
    /// Both endpoints must be in bounds and walkable; otherwise the request
    /// fails with [`PathError::InvalidEndpoint`] before any search. A
    /// request with `start == goal` succeeds with a one-element path, cost
    /// 0 and no search steps.
    pub fn find_path(
        &mut self,
        map: &SpatialMap,
        start: Location,
        goal: Location,
    ) -> Result<Path, PathError> {
        self.find_path_until(map, start, goal, |_| false)
    }

    /// Like [`find_path`](Self::find_path), but `should_stop` is consulted
    /// between steps and can cancel the search.
    pub fn find_path_until(
        &mut self,
        map: &SpatialMap,
        start: Location,
        goal: Location,
        mut should_stop: impl FnMut(SearchProgress) -> bool,
    ) -> Result<Path, PathError> {
        self.last_path_cost = 0.0;
        self.last_search_steps = 0;

        check_endpoint(map, Endpoint::Start, start)?;
        check_endpoint(map, Endpoint::Goal, goal)?;

        if start == goal {
            debug!("start and goal coincide at {start}");
            return Ok(Path {
                locations: vec![start],
                cost: 0.0,
                steps: 0,
            });
        }

        let mut search = AStarSearch::new(self.config);
        search.set_start_and_goal(GridState::new(start, map), GridState::new(goal, map));

        let mut status = search.status();
        while status == SearchStatus::Searching {
            let progress = SearchProgress {
                steps: search.step_count(),
                open: search.open_len(),
                closed: search.closed_len(),
            };
            if should_stop(progress) {
                search.cancel();
            }
            status = search.step();
        }

        let steps = search.step_count();
        self.last_search_steps = steps;

        let result = match status {
            SearchStatus::Succeeded => {
                let locations: Vec<Location> = search
                    .solution()
                    .map(|sol| sol.map(GridState::location).collect())
                    .unwrap_or_default();
                let cost = search.solution_cost().unwrap_or_default();
                self.last_path_cost = cost;
                info!(
                    "path {start} -> {goal} found in {steps} steps, cost {cost}, {} locations",
                    locations.len()
                );
                Ok(Path {
                    locations,
                    cost,
                    steps,
                })
            }
            SearchStatus::Failed if search.was_cancelled() => {
                info!("path {start} -> {goal} cancelled after {steps} steps");
                Err(PathError::Cancelled { steps })
            }
            SearchStatus::OutOfMemory => {
                info!("path {start} -> {goal} ran out of nodes after {steps} steps");
                Err(PathError::ResourceExhausted {
                    steps,
                    max_nodes: self.config.max_nodes,
                })
            }
            _ => {
                info!("no path {start} -> {goal}, search exhausted after {steps} steps");
                Err(PathError::NoPathExists { steps })
            }
        };

        search.free_nodes();
        result
    }
}

fn check_endpoint(map: &SpatialMap, endpoint: Endpoint, location: Location) -> Result<(), PathError> {
    if map.is_walkable(location) {
        return Ok(());
    }
    warn!("{endpoint} location {location} is out of bounds or blocked");
    Err(PathError::InvalidEndpoint { endpoint, location })
}
