#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Interchangeable grid searches used by agents to plan routes.
//!
//! Every algorithm shares the same contract: four-directional movement with
//! unit cost through open cells only, a single-cell path when the start is the
//! goal, and `None` when the goal cannot be reached. An absent route is an
//! ordinary outcome rather than an error.

pub mod best_first;
pub mod breadth_first;
pub mod depth_first;

use std::fmt;

use maze_chase_core::{CellCoord, Grid, Path};
use rand::Rng;

/// Search strategies available to agent controllers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Stack-driven search returning the first route found.
    DepthFirst,
    /// Queue-driven search returning a shortest route.
    BreadthFirst,
    /// A* search guided by Manhattan distance, returning a shortest route.
    BestFirst,
}

impl Algorithm {
    /// Every available algorithm.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::DepthFirst,
        Algorithm::BreadthFirst,
        Algorithm::BestFirst,
    ];

    /// Picks one algorithm uniformly at random.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Searches `grid` for a route from `start` to `goal`.
    #[must_use]
    pub fn search(self, grid: &Grid, start: CellCoord, goal: CellCoord) -> Option<Path> {
        match self {
            Self::DepthFirst => depth_first::search(grid, start, goal),
            Self::BreadthFirst => breadth_first::search(grid, start, goal),
            Self::BestFirst => best_first::search(grid, start, goal),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DepthFirst => "dfs",
            Self::BreadthFirst => "bfs",
            Self::BestFirst => "a*",
        };
        f.write_str(label)
    }
}

/// Selects which algorithm an agent uses on a given tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlgorithmPolicy {
    /// Draw a fresh algorithm uniformly at random on every tick.
    #[default]
    Random,
    /// Always use the same algorithm.
    Fixed(Algorithm),
}

impl AlgorithmPolicy {
    /// Resolves the algorithm to use for the current tick.
    pub fn pick<R>(self, rng: &mut R) -> Algorithm
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Random => Algorithm::random(rng),
            Self::Fixed(algorithm) => algorithm,
        }
    }
}

/// Shared handling of the degenerate cases every search treats identically.
///
/// Returns `Some(result)` when the query is settled without exploring.
fn settle_trivial(grid: &Grid, start: CellCoord, goal: CellCoord) -> Option<Option<Path>> {
    if !grid.contains(start) || !grid.is_open(goal) {
        return Some(None);
    }
    if start == goal {
        return Some(Path::from_cells(vec![start]));
    }
    None
}

/// Dense predecessor table keyed by grid index.
struct Trail<'a> {
    grid: &'a Grid,
    came_from: Vec<Option<CellCoord>>,
    discovered: Vec<bool>,
}

impl<'a> Trail<'a> {
    fn new(grid: &'a Grid, start: CellCoord) -> Self {
        let mut trail = Self {
            grid,
            came_from: vec![None; grid.cell_count()],
            discovered: vec![false; grid.cell_count()],
        };
        if let Some(index) = grid.index(start) {
            trail.discovered[index] = true;
        }
        trail
    }

    fn is_discovered(&self, cell: CellCoord) -> bool {
        self.grid
            .index(cell)
            .is_some_and(|index| self.discovered[index])
    }

    /// Records `from` as the predecessor of `cell`, replacing any earlier entry.
    fn link(&mut self, cell: CellCoord, from: CellCoord) {
        if let Some(index) = self.grid.index(cell) {
            self.came_from[index] = Some(from);
            self.discovered[index] = true;
        }
    }

    /// Walks predecessors back from `goal` and returns the route in travel order.
    fn path_to(&self, goal: CellCoord) -> Option<Path> {
        let mut cells = vec![goal];
        let mut current = goal;
        while let Some(previous) = self
            .grid
            .index(current)
            .and_then(|index| self.came_from[index])
        {
            cells.push(previous);
            current = previous;
            if cells.len() > self.came_from.len() {
                return None;
            }
        }
        cells.reverse();
        Path::from_cells(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::Cell;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_pick_covers_every_algorithm() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            let _ = seen.insert(AlgorithmPolicy::Random.pick(&mut rng));
        }
        assert_eq!(seen.len(), Algorithm::ALL.len());
    }

    #[test]
    fn fixed_policy_never_changes() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..8 {
            assert_eq!(
                AlgorithmPolicy::Fixed(Algorithm::BestFirst).pick(&mut rng),
                Algorithm::BestFirst
            );
        }
    }

    #[test]
    fn trivial_cases_settle_without_search() {
        let mut grid = Grid::filled(3, 3, Cell::Open);
        grid.set(CellCoord::new(2, 2), Cell::Wall);
        let here = CellCoord::new(1, 1);

        assert_eq!(
            settle_trivial(&grid, here, here),
            Some(Path::from_cells(vec![here]))
        );
        assert_eq!(settle_trivial(&grid, here, CellCoord::new(2, 2)), Some(None));
        assert_eq!(settle_trivial(&grid, here, CellCoord::new(7, 0)), Some(None));
        assert_eq!(settle_trivial(&grid, here, CellCoord::new(0, 0)), None);
    }
}
