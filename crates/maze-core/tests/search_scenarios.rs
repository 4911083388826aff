// crates/maze-core/tests/search_scenarios.rs
use std::collections::{HashSet, VecDeque};

use maze_core::{search, search_with_callback, Grid, Point, SearchResult};
use maze_protocol::text_grid::{parse_text_grid, TextGrid};

const MAZES: &str = include_str!("data/mazes.txt");

fn load_mazes() -> Vec<(String, TextGrid)> {
    let mut mazes = Vec::new();
    let mut name = None;
    let mut body = String::new();

    for line in MAZES.lines() {
        if let Some(next) = line.strip_prefix("== ") {
            if let Some(prev) = name.replace(next.trim().to_string()) {
                mazes.push((prev, parse_text_grid(&body).expect("fixture grid")));
            }
            body.clear();
        } else if name.is_some() {
            body.push_str(line);
            body.push('\n');
        }
    }
    if let Some(prev) = name {
        mazes.push((prev, parse_text_grid(&body).expect("fixture grid")));
    }
    mazes
}

fn maze(name: &str) -> TextGrid {
    load_mazes()
        .into_iter()
        .find(|(n, _)| n == name)
        .map(|(_, m)| m)
        .unwrap_or_else(|| panic!("no fixture named {name}"))
}

fn endpoints(m: &TextGrid) -> (Point, Point) {
    (m.start.expect("fixture start"), m.goal.expect("fixture goal"))
}

/// Reference shortest distance by plain BFS.
fn bfs_distance(grid: &Grid, start: Point, goal: Point) -> Option<usize> {
    let mut dist = vec![None; grid.len()];
    let mut queue = VecDeque::new();
    dist[grid.index_of(start)?] = Some(0usize);
    queue.push_back(start);

    while let Some(p) = queue.pop_front() {
        let d = dist[grid.index_of(p)?]?;
        if p == goal {
            return Some(d);
        }
        for n in p.neighbors() {
            if let Some(idx) = grid.index_of(n) {
                if grid.is_passable(n) && dist[idx].is_none() {
                    dist[idx] = Some(d + 1);
                    queue.push_back(n);
                }
            }
        }
    }
    None
}

fn assert_valid_path(grid: &Grid, start: Point, goal: Point, result: &SearchResult) {
    let path = &result.path;
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    for p in path {
        assert!(grid.is_passable(*p), "path crosses wall at {p}");
    }
    for pair in path.windows(2) {
        assert!(
            pair[0].is_adjacent(pair[1]),
            "non-unit step {} -> {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn open_grid_scenario() {
    let m = maze("open-3x3");
    let (start, goal) = endpoints(&m);
    let result = search(&m.grid, start, goal);

    assert_eq!(result.path.len(), 5);
    assert_eq!(result.path_length(), 4);
    assert!(result.visited_count() >= 5);
    assert_valid_path(&m.grid, start, goal, &result);
}

#[test]
fn open_grid_expansion_order_is_stable() {
    let m = maze("open-3x3");
    let (start, goal) = endpoints(&m);
    let result = search(&m.grid, start, goal);

    let p = |r, c| Point::new(r, c);
    assert_eq!(
        result.visited_order,
        vec![
            p(0, 0),
            p(1, 0),
            p(0, 1),
            p(2, 0),
            p(1, 1),
            p(0, 2),
            p(2, 1),
            p(1, 2),
            p(2, 2),
        ]
    );
    assert_eq!(
        result.path,
        vec![p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(2, 2)]
    );
}

#[test]
fn walled_off_goal_is_unreachable() {
    let m = maze("walled-off-3x3");
    let (start, goal) = endpoints(&m);
    let result = search(&m.grid, start, goal);

    assert!(result.path.is_empty());
    assert!(!result.has_path());
    assert_eq!(result.path_length(), 0);
    assert!(result.visited_count() > 0);
    assert_eq!(result.visited_order, vec![start]);
}

#[test]
fn single_row_corridor() {
    let m = maze("corridor-1x3");
    let (start, goal) = endpoints(&m);
    let result = search(&m.grid, start, goal);

    assert_eq!(
        result.path,
        vec![Point::new(0, 0), Point::new(0, 1), Point::new(0, 2)]
    );
    assert_eq!(result.path_length(), 2);
}

#[test]
fn paths_are_optimal_and_valid_on_all_fixtures() {
    for (name, m) in load_mazes() {
        let (start, goal) = endpoints(&m);
        let result = search(&m.grid, start, goal);

        match bfs_distance(&m.grid, start, goal) {
            Some(dist) => {
                assert_eq!(result.path_length(), dist, "{name}: not optimal");
                assert_valid_path(&m.grid, start, goal, &result);
            }
            None => {
                assert!(result.path.is_empty(), "{name}: path to unreachable goal");
                assert!(result.visited_count() > 0, "{name}: nothing visited");
            }
        }

        assert_eq!(result.visited_nodes().len(), result.visited_count(), "{name}");
        let unique: HashSet<_> = result.visited_order.iter().collect();
        assert_eq!(unique.len(), result.visited_count(), "{name}: duplicate visit");
    }
}

#[test]
fn start_equals_goal_everywhere() {
    let m = maze("rooms");
    for idx in 0..m.grid.len() {
        let p = m.grid.point_at(idx);
        if m.grid.is_wall(p) {
            continue;
        }
        let result = search(&m.grid, p, p);
        assert_eq!(result.path, vec![p]);
        assert_eq!(result.path_length(), 0);
        assert!(result.visited_count() >= 1);
    }
}

#[test]
fn repeated_runs_are_identical() {
    for (name, m) in load_mazes() {
        let (start, goal) = endpoints(&m);
        let first = search(&m.grid, start, goal);
        for _ in 0..3 {
            assert_eq!(search(&m.grid, start, goal), first, "{name}");
        }
    }
}

#[test]
fn callback_sees_visits_in_order() {
    let m = maze("spiral");
    let (start, goal) = endpoints(&m);

    let mut seen = Vec::new();
    let result = search_with_callback(&m.grid, start, goal, |p| seen.push(p));

    assert_eq!(seen, result.visited_order);
    assert!(result.has_path());
}

#[test]
fn visited_nodes_use_row_col_keys() {
    let m = maze("corridor-1x3");
    let (start, goal) = endpoints(&m);
    let result = search(&m.grid, start, goal);

    assert_eq!(result.visited_nodes(), vec!["0,0", "0,1", "0,2"]);
}

#[test]
fn walled_start_is_searched_from() {
    let mut grid = Grid::open(3, 3).unwrap();
    let start = Point::new(0, 0);
    let goal = Point::new(2, 2);
    grid.set_wall(start, true);

    let result = search(&grid, start, goal);
    assert_eq!(result.path.first(), Some(&start));
    assert_eq!(result.path_length(), 4);
}

#[test]
fn start_outside_grid_yields_empty_result() {
    let grid = Grid::open(2, 2).unwrap();
    let result = search(&grid, Point::new(-1, 0), Point::new(1, 1));

    assert!(result.path.is_empty());
    assert_eq!(result.visited_count(), 0);
}

#[test]
fn goal_outside_grid_exhausts_reachable_cells() {
    let grid = Grid::open(2, 3).unwrap();
    let result = search(&grid, Point::new(0, 0), Point::new(5, 5));

    assert!(result.path.is_empty());
    assert_eq!(result.visited_count(), 6);
}

#[test]
fn distant_goal_does_not_overflow_scores() {
    let grid = Grid::open(1, 1).unwrap();
    let start = Point::new(0, 0);

    for goal in [Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MIN)] {
        let result = search(&grid, start, goal);
        assert!(result.path.is_empty());
        assert_eq!(result.visited_order, vec![start]);
    }

    assert_eq!(
        Point::new(i32::MAX, i32::MAX).manhattan(Point::new(i32::MIN, i32::MIN)),
        u32::MAX
    );
}

#[test]
fn grid_rejects_bad_shapes() {
    use maze_core::GridError;

    assert_eq!(Grid::new(vec![]), Err(GridError::Empty));
    assert_eq!(Grid::new(vec![vec![]]), Err(GridError::EmptyRow));
    assert_eq!(
        Grid::new(vec![vec![false, false], vec![false]]),
        Err(GridError::Jagged {
            row: 1,
            expected: 2,
            found: 1
        })
    );
}
