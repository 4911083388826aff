//! A* search over a [`Grid`].
//!
//! - Manhattan heuristic, unit step cost, 4-connected moves.
//! - Neighbors are expanded in the fixed order up, down, left, right.
//! - Ties on `f_score` follow a stable queue order. Every push takes a
//!   fresh sequence number. After each expansion, cells whose score
//!   improved while already open are requeued first, ranked by their
//!   previous `(f_score, seq)`. Newly opened cells follow, in neighbor
//!   order. An improved cell therefore lands after the cells that
//!   already held its new score and before the ones discovered in the
//!   same step, the same order a stable sort of an insertion-ordered
//!   list gives. `visited_order` and `path` are fully deterministic for
//!   a given `(grid, start, goal)`.
//!
//! The engine does not validate `start` / `goal`: a walled start is
//! searched from as-is. A start outside the grid yields an empty result.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::grid::Grid;
use crate::point::Point;

/// Output of a search: the optimal path (if any) and every expanded
/// cell in expansion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// `start..=goal`, or empty when the goal is unreachable.
    pub path: Vec<Point>,

    /// Cells in the order they were expanded. No duplicates.
    pub visited_order: Vec<Point>,
}

impl SearchResult {
    pub fn visited_count(&self) -> usize {
        self.visited_order.len()
    }

    /// `visited_order` rendered as `"row,col"` keys.
    pub fn visited_nodes(&self) -> Vec<String> {
        self.visited_order.iter().map(Point::to_string).collect()
    }

    /// Number of moves along the path (start cell excluded).
    ///
    /// Zero both when there is no path and when start == goal.
    pub fn path_length(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Run A* from `start` to `goal`.
pub fn search(grid: &Grid, start: Point, goal: Point) -> SearchResult {
    search_with_callback(grid, start, goal, |_| {})
}

/// Run A* from `start` to `goal`, calling `on_visit` for each cell as
/// it is expanded, in the same order as `visited_order`.
///
/// The callback runs synchronously; every call has completed before
/// this function returns.
pub fn search_with_callback<F>(grid: &Grid, start: Point, goal: Point, mut on_visit: F) -> SearchResult
where
    F: FnMut(Point),
{
    let Some(start_idx) = grid.index_of(start) else {
        trace!(?start, "search start outside grid");
        return SearchResult::default();
    };

    let n = grid.len();
    let mut g_score = vec![u32::MAX; n];
    let mut f_score = vec![u32::MAX; n];
    let mut came_from: Vec<Option<usize>> = vec![None; n];
    let mut closed = vec![false; n];
    let mut visited_order = Vec::new();

    g_score[start_idx] = 0;
    f_score[start_idx] = start.manhattan(goal);

    let mut open = OpenSet::new(n);
    open.push(start_idx, f_score[start_idx]);

    // Per-expansion scratch: (old f, old seq, cell) and new cells.
    let mut improved: Vec<(u32, u64, usize)> = Vec::with_capacity(4);
    let mut opened: Vec<usize> = Vec::with_capacity(4);

    while let Some(current_idx) = open.pop() {
        let current = grid.point_at(current_idx);

        if !closed[current_idx] {
            closed[current_idx] = true;
            visited_order.push(current);
            on_visit(current);
        }

        if current == goal {
            let path = reconstruct_path(grid, &came_from, current_idx);
            trace!(
                path_len = path.len(),
                visited = visited_order.len(),
                "search reached goal"
            );
            return SearchResult {
                path,
                visited_order,
            };
        }

        let tentative_g = g_score[current_idx] + 1;
        improved.clear();
        opened.clear();
        for neighbor in current.neighbors() {
            let Some(neighbor_idx) = grid.index_of(neighbor) else {
                continue;
            };
            if grid.is_wall(neighbor) {
                continue;
            }

            if tentative_g < g_score[neighbor_idx] {
                match open.seq_of(neighbor_idx) {
                    Some(seq) => improved.push((f_score[neighbor_idx], seq, neighbor_idx)),
                    None => opened.push(neighbor_idx),
                }
                came_from[neighbor_idx] = Some(current_idx);
                g_score[neighbor_idx] = tentative_g;
                f_score[neighbor_idx] = tentative_g.saturating_add(neighbor.manhattan(goal));
            }
        }

        improved.sort_unstable();
        for &(_, _, idx) in &improved {
            open.push(idx, f_score[idx]);
        }
        for &idx in &opened {
            open.push(idx, f_score[idx]);
        }
    }

    trace!(visited = visited_order.len(), "search exhausted open set");
    SearchResult {
        path: Vec::new(),
        visited_order,
    }
}

fn reconstruct_path(grid: &Grid, came_from: &[Option<usize>], goal_idx: usize) -> Vec<Point> {
    let mut path = vec![grid.point_at(goal_idx)];
    let mut cursor = goal_idx;
    while let Some(prev) = came_from[cursor] {
        path.push(grid.point_at(prev));
        cursor = prev;
    }
    path.reverse();
    path
}

// -----------------------------------------------------------------------------
// Open set
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    seq: u64,
    idx: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want smallest (f, seq) on top.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap on `(f, seq)` with lazy deletion.
///
/// Pushing a cell that is already open gives it a new sequence number;
/// the entry carrying the old one is dropped when it surfaces.
#[derive(Debug)]
struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    in_open: Vec<bool>,
    seq_of: Vec<u64>,
    next_seq: u64,
}

impl OpenSet {
    fn new(cells: usize) -> Self {
        OpenSet {
            heap: BinaryHeap::new(),
            in_open: vec![false; cells],
            seq_of: vec![0; cells],
            next_seq: 0,
        }
    }

    /// Current sequence number of an open cell.
    fn seq_of(&self, idx: usize) -> Option<u64> {
        self.in_open[idx].then_some(self.seq_of[idx])
    }

    fn push(&mut self, idx: usize, f: u32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_open[idx] = true;
        self.seq_of[idx] = seq;
        self.heap.push(OpenEntry { f, seq, idx });
    }

    fn pop(&mut self) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            if !self.in_open[entry.idx] || entry.seq != self.seq_of[entry.idx] {
                continue;
            }
            self.in_open[entry.idx] = false;
            return Some(entry.idx);
        }
        None
    }
}
