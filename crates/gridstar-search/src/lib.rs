//! Best-first (A\*) search over grids.
//!
//! The crate is split in two layers:
//!
//! - **Engine** ([`AStarSearch`]): a generic, step-wise A\* driver over any
//!   type implementing [`SearchState`]. It owns its open and closed sets,
//!   pools nodes in an arena and reconstructs the solution on success.
//! - **Grid adapter** ([`GridState`], [`Pathfinder`], [`Agent`]): binds
//!   locations on a [`SpatialMap`](gridstar_core::SpatialMap) to the engine,
//!   validates endpoints and drains the search to completion.
//!
//! # Search lifecycle
//!
//! | Status | Reached by |
//! |---|---|
//! | [`SearchStatus::Idle`] | construction, [`AStarSearch::free_nodes`] |
//! | [`SearchStatus::Searching`] | [`AStarSearch::set_start_and_goal`] |
//! | [`SearchStatus::Succeeded`] | goal popped from the open set |
//! | [`SearchStatus::Failed`] | open set exhausted, or cancelled |
//! | [`SearchStatus::OutOfMemory`] | node budget exceeded |

#![warn(missing_docs)]

mod agent;
mod config;
mod distance;
mod engine;
mod error;
mod grid_state;
mod node;
mod pathfinder;
mod traits;

pub use agent::Agent;
pub use config::SearchConfig;
pub use distance::manhattan;
pub use engine::{AStarSearch, SearchStatus, Solution};
pub use error::{Endpoint, PathError};
pub use grid_state::GridState;
pub use pathfinder::{Path, Pathfinder, SearchProgress};
pub use traits::SearchState;
