//! Shared scene used by the terminal pathfinding demo.
//!
//! Builds a walled test map, plans a path for an [`Agent`] and renders the
//! result as ASCII.

use std::fmt;

use gridstar_core::{Bounds, CellKind, Location, SpatialMap};
use gridstar_search::{Agent, PathError, SearchConfig};
use rand::{Rng, RngExt, SeedableRng};

pub const WIDTH: i32 = 40;
pub const HEIGHT: i32 = 30;

const FLOOR: char = '.';
const WALL: char = '#';
const TRAIL: char = '*';
const START: char = 'S';
const GOAL: char = 'G';
const AGENT: char = '@';

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Demo settings, read from positional command-line arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub width: i32,
    pub height: i32,
    /// Seed for random wall scatter. `None` keeps only the fixed walls.
    pub seed: Option<u64>,
    /// Probability in \[0, 1\] that a free cell becomes a wall.
    pub density: f64,
    pub search: SearchConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            seed: None,
            density: 0.2,
            search: SearchConfig::default(),
        }
    }
}

/// A command-line argument that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgError {
    pub name: &'static str,
    pub value: String,
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.name, self.value)
    }
}

impl std::error::Error for ArgError {}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ArgError> {
    value.parse().map_err(|_| ArgError {
        name,
        value: value.to_string(),
    })
}

impl DemoConfig {
    /// Parse `WIDTH HEIGHT SEED DENSITY MAX_NODES`; missing trailing
    /// arguments keep their defaults.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, ArgError> {
        let mut cfg = Self::default();
        for (i, arg) in args.into_iter().enumerate() {
            match i {
                0 => cfg.width = parse("width", &arg)?,
                1 => cfg.height = parse("height", &arg)?,
                2 => cfg.seed = Some(parse("seed", &arg)?),
                3 => cfg.density = parse("density", &arg)?,
                4 => cfg.search.max_nodes = parse("max nodes", &arg)?,
                _ => {
                    return Err(ArgError {
                        name: "argument count",
                        value: arg,
                    });
                }
            }
        }
        if cfg.width < 3 {
            return Err(ArgError {
                name: "width",
                value: cfg.width.to_string(),
            });
        }
        if cfg.height < 3 {
            return Err(ArgError {
                name: "height",
                value: cfg.height.to_string(),
            });
        }
        if !(0.0..=1.0).contains(&cfg.density) {
            return Err(ArgError {
                name: "density",
                value: cfg.density.to_string(),
            });
        }
        Ok(cfg)
    }
}

// ---------------------------------------------------------------------------
// Map layout
// ---------------------------------------------------------------------------

/// Fixed test obstacles: a horizontal wall, a vertical wall and an L shape.
/// Parts outside the map are clipped.
pub fn add_test_obstacles(map: &mut SpatialMap) {
    map.fill_rect(Bounds::new(5, 8, 15, 9), CellKind::Blocked);
    map.fill_rect(Bounds::new(12, 3, 13, 12), CellKind::Blocked);
    map.fill_rect(Bounds::new(18, 5, 25, 6), CellKind::Blocked);
    map.fill_rect(Bounds::new(18, 5, 19, 10), CellKind::Blocked);
}

/// Turn free cells into walls with probability `density`.
pub fn scatter_walls(map: &mut SpatialMap, rng: &mut impl Rng, density: f64) {
    for loc in map.bounds() {
        if rng.random_bool(density) {
            map.set_cell(loc, CellKind::Blocked);
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

pub struct Scene {
    map: SpatialMap,
    agent: Agent,
    start: Location,
    goal: Location,
    trail: Vec<Location>,
}

impl Scene {
    pub fn new(cfg: &DemoConfig) -> Self {
        let mut map = SpatialMap::new(cfg.width, cfg.height);
        add_test_obstacles(&mut map);
        if let Some(seed) = cfg.seed {
            let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
            scatter_walls(&mut map, &mut rng, cfg.density);
        }

        let start = Location::new(1, 1);
        let goal = Location::new(cfg.width - 2, cfg.height - 2);
        map.set_cell(start, CellKind::Walkable);
        map.set_cell(goal, CellKind::Walkable);
        log::info!(
            "map {}x{} with {} walls",
            map.width(),
            map.height(),
            map.count(CellKind::Blocked)
        );

        Self {
            map,
            agent: Agent::with_config(start, cfg.search),
            start,
            goal,
            trail: Vec::new(),
        }
    }

    pub fn map(&self) -> &SpatialMap {
        &self.map
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Plan the agent's route from its position to the goal.
    pub fn plan(&mut self) -> Result<(), PathError> {
        let res = self.agent.find_path_to(&self.map, self.goal);
        self.trail = self.agent.current_path().to_vec();
        let pf = self.agent.pathfinder();
        log::info!(
            "planning took {} steps, path cost {}",
            pf.last_search_steps(),
            pf.last_path_cost()
        );
        res
    }

    /// Follow the planned path to its end. Returns the number of moves.
    pub fn walk(&mut self) -> usize {
        let mut moves = 0;
        while let Some(p) = self.agent.follow_path(&self.map) {
            log::debug!("agent moved to {p}");
            moves += 1;
        }
        moves
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(((self.map.width() + 1) * self.map.height()) as usize);
        for y in 0..self.map.height() {
            for x in 0..self.map.width() {
                let loc = Location::new(x, y);
                let ch = if loc == self.agent.position() {
                    AGENT
                } else if loc == self.start {
                    START
                } else if loc == self.goal {
                    GOAL
                } else if self.trail.contains(&loc) {
                    TRAIL
                } else if self.map.is_walkable(loc) {
                    FLOOR
                } else {
                    WALL
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
