//! Depth-first search over the open cells of a grid.

use maze_chase_core::{CellCoord, Grid, Path};

use crate::{settle_trivial, Trail};

/// Returns the first route found by stack order, which is not necessarily the shortest.
///
/// Cells are finalized when popped, so a cell may sit on the stack several
/// times before it is expanded. Each push records the pusher as the cell's
/// predecessor; the entry popped first is the most recent push, so the
/// recorded predecessor always belongs to an already finalized cell.
#[must_use]
pub fn search(grid: &Grid, start: CellCoord, goal: CellCoord) -> Option<Path> {
    if let Some(settled) = settle_trivial(grid, start, goal) {
        return settled;
    }

    let mut trail = Trail::new(grid, start);
    let mut visited = vec![false; grid.cell_count()];
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if current == goal {
            return trail.path_to(goal);
        }

        let Some(index) = grid.index(current) else {
            continue;
        };
        if visited[index] {
            continue;
        }
        visited[index] = true;

        for next in grid.open_neighbors(current) {
            let finalized = grid.index(next).is_some_and(|slot| visited[slot]);
            if !finalized {
                trail.link(next, current);
                stack.push(next);
            }
        }
    }

    None
}
