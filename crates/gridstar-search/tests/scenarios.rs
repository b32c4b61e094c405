use gridstar_core::{Bounds, CellKind, Location, SpatialMap};
use gridstar_search::{
    AStarSearch, Agent, GridState, PathError, Pathfinder, SearchConfig, SearchState, SearchStatus,
};

fn loc(x: i32, y: i32) -> Location {
    Location::new(x, y)
}

#[test]
fn open_five_by_five_corner_to_center() {
    let map = SpatialMap::new(5, 5);
    let path = Pathfinder::new().find_path(&map, loc(0, 0), loc(2, 2)).unwrap();
    assert_eq!(path.len(), 5);
    assert_eq!(path.cost, 4.0);
    for pair in path.locations.windows(2) {
        assert!(pair[0].is_adjacent_4(pair[1]));
    }
}

#[test]
fn blocked_column_makes_goal_unreachable() {
    let mut map = SpatialMap::new(5, 5);
    map.fill_rect(Bounds::new(2, 0, 3, 5), CellKind::Blocked);
    let mut pf = Pathfinder::new();
    let err = pf.find_path(&map, loc(0, 0), loc(4, 4)).unwrap_err();
    assert!(matches!(err, PathError::NoPathExists { .. }));
    assert!(err.steps() > 0);
    assert_eq!(pf.last_path_cost(), 0.0);
}

#[test]
fn single_wall_forces_detour() {
    let mut map = SpatialMap::new(5, 5);
    map.set_cell(loc(1, 1), CellKind::Blocked);
    let path = Pathfinder::new().find_path(&map, loc(0, 1), loc(2, 1)).unwrap();
    assert!(path.len() > 3);
    assert!(!path.locations.contains(&loc(1, 1)));
    assert_eq!(path.start(), Some(loc(0, 1)));
    assert_eq!(path.goal(), Some(loc(2, 1)));
    assert_eq!(path.cost, 4.0);
}

#[test]
fn repeated_requests_are_identical() {
    let mut map = SpatialMap::new(12, 9);
    map.fill_rect(Bounds::new(3, 0, 4, 7), CellKind::Blocked);
    map.fill_rect(Bounds::new(7, 2, 8, 9), CellKind::Blocked);
    let mut pf = Pathfinder::new();
    let a = pf.find_path(&map, loc(0, 0), loc(11, 8)).unwrap();
    let b = pf.find_path(&map, loc(0, 0), loc(11, 8)).unwrap();
    assert_eq!(a, b);
    assert_eq!(pf.last_search_steps(), b.steps);
}

#[test]
fn engine_driven_step_by_step_matches_facade() {
    let mut map = SpatialMap::new(8, 8);
    map.fill_rect(Bounds::new(1, 3, 7, 4), CellKind::Blocked);
    let (start, goal) = (loc(0, 0), loc(7, 7));

    let mut search = AStarSearch::new(SearchConfig::default());
    search.set_start_and_goal(GridState::new(start, &map), GridState::new(goal, &map));
    let mut steps = 0;
    while search.step() == SearchStatus::Searching {
        steps += 1;
        assert!(search.open_len() > 0);
    }
    assert_eq!(search.status(), SearchStatus::Succeeded);
    assert_eq!(search.step_count(), steps + 1);

    let engine_path: Vec<_> = search
        .solution_path()
        .unwrap()
        .iter()
        .map(GridState::location)
        .collect();
    let facade = Pathfinder::new().find_path(&map, start, goal).unwrap();
    assert_eq!(engine_path, facade.locations);
    assert_eq!(search.solution_cost(), Some(facade.cost));
    assert_eq!(search.step_count(), facade.steps);
}

#[test]
fn closed_states_are_never_blocked() {
    let mut map = SpatialMap::new(6, 6);
    map.fill_rect(Bounds::new(2, 1, 3, 6), CellKind::Blocked);
    let mut search = AStarSearch::default();
    search.set_start_and_goal(
        GridState::new(loc(0, 5), &map),
        GridState::new(loc(5, 5), &map),
    );
    while search.step() == SearchStatus::Searching {}
    assert!(search.closed_states().all(|s| map.is_walkable(s.location())));
    // Every closed state was reached with a cost no better than its distance.
    for s in search.closed_states() {
        let g = search.cost_to(s).unwrap();
        assert!(g >= s.goal_distance_estimate(&GridState::unbound(loc(0, 5))));
    }
}

#[test]
fn agent_walks_around_wall_to_target() {
    let mut map = SpatialMap::new(10, 10);
    map.fill_rect(Bounds::new(5, 0, 6, 8), CellKind::Blocked);
    let mut agent = Agent::new(loc(0, 0));
    agent.find_path_to(&map, loc(9, 0)).unwrap();
    let planned = agent.remaining().len();

    let mut walked = Vec::new();
    while let Some(p) = agent.follow_path(&map) {
        assert!(map.is_walkable(p));
        walked.push(p);
    }
    assert_eq!(walked.len(), planned);
    assert_eq!(agent.position(), loc(9, 0));
    assert!(!agent.has_path());
    assert_eq!(agent.pathfinder().last_path_cost(), planned as f32);
}
