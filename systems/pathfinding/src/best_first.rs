//! A* search guided by Manhattan distance.

use std::{cmp::Reverse, collections::BinaryHeap};

use maze_chase_core::{CellCoord, Grid, Path};

use crate::{settle_trivial, Trail};

/// Returns a shortest route using a frontier ordered by `(cost + estimate, cost)`.
///
/// Manhattan distance is consistent on a four-directional unit grid, so the
/// first time the goal leaves the frontier its route is optimal. Improved
/// costs re-queue a cell; the stale entries left behind are skipped on pop.
#[must_use]
pub fn search(grid: &Grid, start: CellCoord, goal: CellCoord) -> Option<Path> {
    if let Some(settled) = settle_trivial(grid, start, goal) {
        return settled;
    }

    let mut trail = Trail::new(grid, start);
    let mut costs = vec![u32::MAX; grid.cell_count()];
    let start_index = grid.index(start)?;
    costs[start_index] = 0;

    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((start.manhattan_distance(goal), 0_u32, start)));

    while let Some(Reverse((_, cost, current))) = frontier.pop() {
        if current == goal {
            return trail.path_to(goal);
        }

        let Some(index) = grid.index(current) else {
            continue;
        };
        if cost > costs[index] {
            continue;
        }

        let tentative = cost.saturating_add(1);
        for next in grid.open_neighbors(current) {
            let Some(next_index) = grid.index(next) else {
                continue;
            };
            if tentative < costs[next_index] {
                costs[next_index] = tentative;
                trail.link(next, current);
                frontier.push(Reverse((
                    tentative + next.manhattan_distance(goal),
                    tentative,
                    next,
                )));
            }
        }
    }

    None
}
