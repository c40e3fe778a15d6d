//! Maze layout generation and resource-point bookkeeping.

use std::collections::BTreeSet;

use maze_chase_core::{Cell, CellCoord, Grid};
use rand::{seq::SliceRandom, Rng};

const CARVE_OFFSETS: [(i32, i32); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];
const MINIMUM_EXTENT: u32 = 3;

/// Errors raised while constructing a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    /// The requested dimensions cannot hold a border plus a single open cell.
    #[error("maze dimensions {columns}x{rows} are below the 3x3 minimum")]
    TooSmall {
        /// Requested width.
        columns: u32,
        /// Requested height.
        rows: u32,
    },
}

/// Passability grid together with start positions and collectible resource points.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: Grid,
    start_position: CellCoord,
    hunter_start_position: CellCoord,
    resource_points: BTreeSet<CellCoord>,
}

impl Maze {
    /// Generates a connected maze with additional loops.
    ///
    /// Even dimensions are widened by one so the carve lands on the odd
    /// sub-lattice. A randomized depth-first carve from the seeker start opens a
    /// spanning tree over every odd cell, the hunter start is forced open, and
    /// then each between-cell wall separating two open cells is removed with
    /// probability `wall_density` (clamped to `[0, 1]`).
    pub fn generate<R>(
        width: u32,
        height: u32,
        wall_density: f64,
        rng: &mut R,
    ) -> Result<Self, MazeError>
    where
        R: Rng + ?Sized,
    {
        ensure_extent(width, height)?;
        let columns = force_odd(width);
        let rows = force_odd(height);

        let mut maze = Self::with_grid(Grid::filled(columns, rows, Cell::Wall));
        carve(&mut maze.grid, maze.start_position, rng);
        maze.grid.set(maze.hunter_start_position, Cell::Open);
        add_loops(&mut maze.grid, clamp_density(wall_density), rng);
        Ok(maze)
    }

    /// Wraps a prebuilt grid, anchoring the start positions to its corners.
    pub fn from_grid(grid: Grid) -> Result<Self, MazeError> {
        ensure_extent(grid.columns(), grid.rows())?;
        Ok(Self::with_grid(grid))
    }

    fn with_grid(grid: Grid) -> Self {
        let start_position = CellCoord::new(1, 1);
        let hunter_start_position =
            CellCoord::new(grid.columns().saturating_sub(2), grid.rows().saturating_sub(2));
        Self {
            grid,
            start_position,
            hunter_start_position,
            resource_points: BTreeSet::new(),
        }
    }

    /// Underlying passability grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Width of the maze in cells.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.grid.columns()
    }

    /// Height of the maze in cells.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Cell the seeker starts on.
    #[must_use]
    pub const fn start_position(&self) -> CellCoord {
        self.start_position
    }

    /// Cell the first hunter starts on.
    #[must_use]
    pub const fn hunter_start_position(&self) -> CellCoord {
        self.hunter_start_position
    }

    /// Reports whether the cell is in bounds and passable.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.grid.is_open(cell)
    }

    /// Turns every open cell except the two start positions into a resource point.
    pub fn place_resource_points(&mut self) {
        let start = self.start_position;
        let hunter_start = self.hunter_start_position;
        self.resource_points = self
            .grid
            .open_cells()
            .filter(|cell| *cell != start && *cell != hunter_start)
            .collect();
    }

    /// Resource points that have not been collected yet.
    #[must_use]
    pub fn resource_points(&self) -> &BTreeSet<CellCoord> {
        &self.resource_points
    }

    /// Removes the resource point at `cell`, reporting whether one was present.
    pub fn collect_resource(&mut self, cell: CellCoord) -> bool {
        self.resource_points.remove(&cell)
    }
}

fn ensure_extent(columns: u32, rows: u32) -> Result<(), MazeError> {
    if columns < MINIMUM_EXTENT || rows < MINIMUM_EXTENT {
        return Err(MazeError::TooSmall { columns, rows });
    }
    Ok(())
}

fn force_odd(value: u32) -> u32 {
    if value % 2 == 0 {
        value.saturating_add(1)
    } else {
        value
    }
}

fn clamp_density(wall_density: f64) -> f64 {
    if wall_density.is_nan() {
        0.0
    } else {
        wall_density.clamp(0.0, 1.0)
    }
}

fn carve<R>(grid: &mut Grid, start: CellCoord, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let columns = grid.columns();
    let rows = grid.rows();
    let mut stack = vec![start];
    grid.set(start, Cell::Open);

    while let Some(&current) = stack.last() {
        let mut candidates = [None; 4];
        let mut count = 0;
        for (columns_delta, rows_delta) in CARVE_OFFSETS {
            let Some(next) = current.offset(columns_delta, rows_delta) else {
                continue;
            };
            let inside = next.column() >= 1
                && next.column() < columns - 1
                && next.row() >= 1
                && next.row() < rows - 1;
            if inside && grid.cell(next) == Some(Cell::Wall) {
                candidates[count] = Some(next);
                count += 1;
            }
        }

        match candidates[..count].choose(rng).copied().flatten() {
            Some(next) => {
                let between = CellCoord::new(
                    (current.column() + next.column()) / 2,
                    (current.row() + next.row()) / 2,
                );
                grid.set(between, Cell::Open);
                grid.set(next, Cell::Open);
                stack.push(next);
            }
            None => {
                let _ = stack.pop();
            }
        }
    }
}

fn add_loops<R>(grid: &mut Grid, wall_density: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let columns = grid.columns();
    let rows = grid.rows();

    for row in 1..rows - 1 {
        for column in 1..columns - 1 {
            let cell = CellCoord::new(column, row);
            if grid.cell(cell) != Some(Cell::Wall) {
                continue;
            }
            if column % 2 == 1 && row % 2 == 1 {
                continue;
            }

            let horizontal = grid.is_open(CellCoord::new(column - 1, row))
                && grid.is_open(CellCoord::new(column + 1, row));
            let vertical = grid.is_open(CellCoord::new(column, row - 1))
                && grid.is_open(CellCoord::new(column, row + 1));

            if (horizontal || vertical) && rng.gen_bool(wall_density) {
                grid.set(cell, Cell::Open);
            }
        }
    }
}
