//! Failure results of a pathfinding request.

use std::fmt;

use gridstar_core::Location;

/// Which endpoint of a request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Where the search begins.
    Start,
    /// Where the search should end.
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Reasons a path could not be produced.
///
/// None of these are fatal; the caller decides whether to retry with a
/// different goal, raise the node budget, or report to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// An endpoint is out of bounds or blocked. No search was performed.
    InvalidEndpoint {
        /// The rejected endpoint.
        endpoint: Endpoint,
        /// Its location.
        location: Location,
    },
    /// The open set was exhausted without reaching the goal.
    NoPathExists {
        /// Search steps performed.
        steps: usize,
    },
    /// The node budget was reached mid-search.
    ResourceExhausted {
        /// Search steps performed.
        steps: usize,
        /// The budget that was hit.
        max_nodes: usize,
    },
    /// The caller asked the search to stop.
    Cancelled {
        /// Search steps performed.
        steps: usize,
    },
}

impl PathError {
    /// Number of search steps attempted before failing.
    pub fn steps(&self) -> usize {
        match *self {
            Self::InvalidEndpoint { .. } => 0,
            Self::NoPathExists { steps }
            | Self::ResourceExhausted { steps, .. }
            | Self::Cancelled { steps } => steps,
        }
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { endpoint, location } => {
                write!(f, "{endpoint} location {location} is out of bounds or blocked")
            }
            Self::NoPathExists { steps } => {
                write!(f, "no path exists (search exhausted after {steps} steps)")
            }
            Self::ResourceExhausted { steps, max_nodes } => write!(
                f,
                "search ran out of nodes after {steps} steps (budget {max_nodes})"
            ),
            Self::Cancelled { steps } => write!(f, "search cancelled after {steps} steps"),
        }
    }
}

impl std::error::Error for PathError {}
