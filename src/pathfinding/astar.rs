use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::facing::{Facing, GridPos, path_facings};
use crate::map::TileMap;

// =============================================================================
// A* PATHFINDING
// =============================================================================

/// Find the shortest 4-directional route between two cells of a map.
///
/// Movement follows the map's passability mask, so the blocked border ring is
/// never entered. The returned path includes both endpoints; `None` means no
/// route exists, an endpoint lies off the grid, or the search exceeded
/// `max_iterations`.
///
/// The goal cell itself may be impassable — it is often the cell an entity or
/// prop stands on, and the route should lead right up to (and onto) it.
pub fn astar(
    map: &TileMap,
    start: GridPos,
    goal: GridPos,
    max_iterations: usize,
) -> Option<Vec<GridPos>> {
    if !map.contains(start.0, start.1) || !map.contains(goal.0, goal.1) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    // Priority queue: (f_score, row, col) — Reverse for a min-heap.
    let mut open: BinaryHeap<Reverse<(i32, i32, i32)>> = BinaryHeap::new();
    let mut came_from: HashMap<GridPos, GridPos> = HashMap::new();
    let mut g_score: HashMap<GridPos, i32> = HashMap::new();

    g_score.insert(start, 0);
    open.push(Reverse((manhattan(start, goal), start.0, start.1)));

    let mut iterations = 0;

    while let Some(Reverse((_, row, col))) = open.pop() {
        iterations += 1;
        if iterations > max_iterations {
            return None;
        }

        let current = (row, col);

        if current == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }

        let current_g = g_score[&current];

        for facing in Facing::ALL {
            let (d_row, d_col) = facing.delta();
            let next = (row + d_row, col + d_col);

            let is_goal = next == goal;
            if !is_goal && !map.is_passable(next.0, next.1) {
                continue;
            }

            let new_g = current_g + 1;
            let existing_g = g_score.get(&next).copied().unwrap_or(i32::MAX);

            if new_g < existing_g {
                g_score.insert(next, new_g);
                came_from.insert(next, current);
                let f = new_g + manhattan(next, goal);
                open.push(Reverse((f, next.0, next.1)));
            }
        }
    }

    None // No route found
}

/// First step along the shortest route, or `None` when already at the goal or
/// no route exists.
pub fn astar_next_step(
    map: &TileMap,
    start: GridPos,
    goal: GridPos,
    max_iterations: usize,
) -> Option<GridPos> {
    let path = astar(map, start, goal, max_iterations)?;
    if path.len() > 1 { Some(path[1]) } else { None }
}

/// Shortest route expressed as the facing a sprite holds on each leg —
/// [`astar`] composed with [`path_facings`]. A route of a single cell yields
/// an empty facing list.
pub fn route_facings(
    map: &TileMap,
    start: GridPos,
    goal: GridPos,
    max_iterations: usize,
) -> Option<Vec<Facing>> {
    astar(map, start, goal, max_iterations).map(|path| path_facings(&path))
}

fn manhattan(a: GridPos, b: GridPos) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Reconstruct the route from the came_from map.
fn reconstruct_path(
    came_from: &HashMap<GridPos, GridPos>,
    start: GridPos,
    goal: GridPos,
) -> Vec<GridPos> {
    let mut path = vec![goal];
    let mut current = goal;

    while current != start {
        current = came_from[&current];
        path.push(current);
    }

    path.reverse();
    path
}
