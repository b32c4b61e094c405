use std::collections::VecDeque;

use gridstar_core::{CellKind, Location, SpatialMap};
use gridstar_search::{PathError, Pathfinder, manhattan};
use proptest::prelude::*;

/// Reference breadth-first distance, independent of the A* engine.
fn bfs_distance(map: &SpatialMap, start: Location, goal: Location) -> Option<usize> {
    let w = map.width() as usize;
    let mut dist = vec![usize::MAX; map.bounds().len()];
    let idx = |l: Location| l.y as usize * w + l.x as usize;
    dist[idx(start)] = 0;
    let mut queue = VecDeque::from([start]);
    while let Some(cur) = queue.pop_front() {
        if cur == goal {
            return Some(dist[idx(cur)]);
        }
        for n in map.neighbors(cur) {
            if dist[idx(n)] == usize::MAX {
                dist[idx(n)] = dist[idx(cur)] + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn arb_map() -> impl Strategy<Value = SpatialMap> {
    (2i32..12, 2i32..12).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::bool::weighted(0.3), (w * h) as usize).prop_map(
            move |walls| {
                let mut map = SpatialMap::new(w, h);
                for (i, &wall) in walls.iter().enumerate() {
                    if wall {
                        let l = Location::new(i as i32 % w, i as i32 / w);
                        map.set_cell(l, CellKind::Blocked);
                    }
                }
                map
            },
        )
    })
}

proptest! {
    #[test]
    fn open_map_paths_are_manhattan_optimal(
        w in 1i32..15,
        h in 1i32..15,
        sx in 0i32..15, sy in 0i32..15,
        gx in 0i32..15, gy in 0i32..15,
    ) {
        let map = SpatialMap::new(w, h);
        let start = Location::new(sx % w, sy % h);
        let goal = Location::new(gx % w, gy % h);
        let path = Pathfinder::new().find_path(&map, start, goal).unwrap();
        let d = manhattan(start, goal);
        prop_assert_eq!(path.len(), 1 + d as usize);
        prop_assert_eq!(path.cost, d as f32);
    }

    #[test]
    fn paths_on_random_maps_are_valid_and_optimal(
        map in arb_map(),
        s in any::<(u8, u8)>(),
        g in any::<(u8, u8)>(),
    ) {
        let start = Location::new(s.0 as i32 % map.width(), s.1 as i32 % map.height());
        let goal = Location::new(g.0 as i32 % map.width(), g.1 as i32 % map.height());
        let mut pf = Pathfinder::new();
        match pf.find_path(&map, start, goal) {
            Ok(path) => {
                prop_assert_eq!(path.start(), Some(start));
                prop_assert_eq!(path.goal(), Some(goal));
                prop_assert!(path.iter().all(|&l| map.is_walkable(l)));
                for pair in path.locations.windows(2) {
                    prop_assert!(pair[0].is_adjacent_4(pair[1]));
                }
                prop_assert_eq!(path.cost, (path.len() - 1) as f32);
                prop_assert_eq!(Some(path.len() - 1), bfs_distance(&map, start, goal));
            }
            Err(PathError::InvalidEndpoint { location, .. }) => {
                prop_assert!(!map.is_walkable(location));
                prop_assert_eq!(pf.last_search_steps(), 0);
            }
            Err(PathError::NoPathExists { steps }) => {
                prop_assert!(steps > 0);
                prop_assert_eq!(bfs_distance(&map, start, goal), None);
            }
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    #[test]
    fn searches_are_deterministic(
        map in arb_map(),
        s in any::<(u8, u8)>(),
        g in any::<(u8, u8)>(),
    ) {
        let start = Location::new(s.0 as i32 % map.width(), s.1 as i32 % map.height());
        let goal = Location::new(g.0 as i32 % map.width(), g.1 as i32 % map.height());
        let mut pf = Pathfinder::new();
        let a = pf.find_path(&map, start, goal);
        let steps_a = pf.last_search_steps();
        let b = pf.find_path(&map, start, goal);
        prop_assert_eq!(a, b);
        prop_assert_eq!(steps_a, pf.last_search_steps());
    }
}
