#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Drivers submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. Systems query immutable snapshots of the [`Grid`] and
//! agents and respond exclusively with new command batches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cardinal movement directions available to agents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in neighbour-expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Unit column and row offset travelled by a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Direction of a single cardinal step from `from` to `to`, if they are adjacent.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Direction> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());

        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Self::East)
            } else {
                Some(Self::West)
            }
        } else if to.row() > from.row() {
            Some(Self::South)
        } else {
            Some(Self::North)
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Shifts the coordinate by a signed offset, failing when either axis would go negative.
    #[must_use]
    pub fn offset(self, columns: i32, rows: i32) -> Option<CellCoord> {
        let column = self.column.checked_add_signed(columns)?;
        let row = self.row.checked_add_signed(rows)?;
        Some(Self::new(column, row))
    }

    /// Neighbouring coordinate one step away in `direction`, ignoring grid bounds.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (columns, rows) = direction.offset();
        self.offset(columns, rows)
    }

    /// Top-left pixel of the cell when every tile spans `tile_size` pixels.
    #[must_use]
    pub fn pixel_position(self, tile_size: f32) -> (f32, f32) {
        (self.column as f32 * tile_size, self.row as f32 * tile_size)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Passability of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Passable cell.
    Open,
}

/// Dense row-major passability grid.
///
/// Every query tolerates out-of-bounds coordinates: lookups return `None` and
/// passability checks report the cell as not open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid where every cell holds `cell`.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, cell: Cell) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![cell; capacity],
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells stored by the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the coordinate lies within the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Row-major offset of the coordinate, if it lies within the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Cell stored at the coordinate, if it lies within the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the coordinate is in bounds and passable.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.cell(cell) == Some(Cell::Open)
    }

    /// Overwrites a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, cell: CellCoord, value: Cell) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = value;
            }
        }
    }

    /// In-bounds neighbour one step away in `direction`.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction).filter(|next| self.contains(*next))
    }

    /// Passable cardinal neighbours of `cell`, shared by every search algorithm.
    pub fn open_neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.neighbor(cell, direction))
            .filter(move |next| self.is_open(*next))
    }

    /// Iterator over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Open)
            .filter_map(move |(index, _)| {
                let width = usize::try_from(columns).ok().filter(|width| *width > 0)?;
                let column = u32::try_from(index % width).ok()?;
                let row = u32::try_from(index / width).ok()?;
                Some(CellCoord::new(column, row))
            })
    }

    /// Clamps a signed position into the grid bounds.
    ///
    /// An empty grid clamps everything to the origin.
    #[must_use]
    pub fn clamp(&self, column: i64, row: i64) -> CellCoord {
        let max_column = i64::from(self.columns.saturating_sub(1));
        let max_row = i64::from(self.rows.saturating_sub(1));
        let column = column.clamp(0, max_column);
        let row = row.clamp(0, max_row);
        CellCoord::new(
            u32::try_from(column).unwrap_or(0),
            u32::try_from(row).unwrap_or(0),
        )
    }
}

/// Ordered route from a start cell to a goal cell, both inclusive.
///
/// Consecutive cells are cardinal neighbours. A path always holds at least the
/// start cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    /// Wraps an ordered list of cells. Returns `None` for an empty list.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { cells })
        }
    }

    /// Cells visited by the path in travel order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Number of cells on the path, including start and goal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; paths hold at least their start cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First cell of the path.
    #[must_use]
    pub fn start(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    /// Final cell of the path.
    #[must_use]
    pub fn goal(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    /// Cell immediately after the start, absent for single-cell paths.
    #[must_use]
    pub fn next_hop(&self) -> Option<CellCoord> {
        self.cells.get(1).copied()
    }
}

/// Unique identifier assigned to a hunter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HunterId(u32);

impl HunterId {
    /// Creates a new hunter identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for HunterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hunter#{}", self.0)
    }
}

/// Identifies the agent a command or event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentId {
    /// The resource-collecting agent.
    Seeker,
    /// One of the pursuing agents.
    Hunter(HunterId),
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seeker => write!(f, "seeker"),
            Self::Hunter(hunter) => write!(f, "{hunter}"),
        }
    }
}

/// Behaviour tag carried by a level definition.
///
/// Hunter targeting is selected by level number; the tag describes the
/// intended flavour of a configured level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HunterBehaviour {
    /// Hunters head straight for the seeker.
    #[default]
    SimpleChase,
    /// Hunters aim ahead of the seeker.
    Predictive,
    /// Hunters spread around the seeker.
    CoordinatedAttack,
}

impl fmt::Display for HunterBehaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SimpleChase => "simple_chase",
            Self::Predictive => "predictive",
            Self::CoordinatedAttack => "coordinated_attack",
        };
        f.write_str(label)
    }
}

/// Parameters describing a single level.
///
/// Field names on the wire follow the level configuration file format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelParams {
    /// Requested maze width and height in cells before odd-size correction.
    pub maze_size: [u32; 2],
    /// Probability of opening each eligible wall during loop augmentation.
    pub wall_density: f64,
    /// Movement progress hunters accrue per tick.
    #[serde(rename = "ghost_speed")]
    pub hunter_speed: f64,
    /// Behaviour tag describing the level.
    #[serde(rename = "ghost_behaviour")]
    pub hunter_behaviour: HunterBehaviour,
    /// Number of hunters to spawn.
    #[serde(rename = "number_of_ghosts")]
    pub hunter_count: u32,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            maze_size: [15, 15],
            wall_density: 0.3,
            hunter_speed: 0.5,
            hunter_behaviour: HunterBehaviour::SimpleChase,
            hunter_count: 4,
        }
    }
}

/// Reasons the world refuses a move or placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum StepRejection {
    /// The agent has not accrued enough progress to act this tick.
    #[error("agent has not accrued enough progress to act")]
    NotReady,
    /// The destination is not a cardinal neighbour of the agent.
    #[error("destination is not adjacent")]
    NotAdjacent,
    /// The destination is a wall or lies outside the grid.
    #[error("destination is not passable")]
    Blocked,
    /// Another hunter already stands on the destination.
    #[error("destination is occupied by another hunter")]
    Occupied,
    /// No hunter with the provided identifier exists.
    #[error("unknown hunter")]
    UnknownHunter,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by one tick, accruing movement progress.
    Tick,
    /// Replaces the seeker's movement speed and hunter safety margin.
    ConfigureSeeker {
        /// Movement progress the seeker accrues per tick.
        speed: f64,
        /// Minimum Manhattan distance to every hunter for a resource point to count as safe.
        safe_distance: u32,
    },
    /// Registers a new hunter at the provided cell.
    SpawnHunter {
        /// Cell the hunter starts on.
        cell: CellCoord,
        /// Movement progress the hunter accrues per tick.
        speed: f64,
    },
    /// Moves the seeker one step.
    MoveSeeker {
        /// Destination cell, which must be adjacent and open.
        to: CellCoord,
        /// Whether the step follows a planned route. Off-route steps clear the heading.
        on_route: bool,
    },
    /// Moves a hunter one step.
    MoveHunter {
        /// Hunter attempting to move.
        hunter: HunterId,
        /// Destination cell, which must be adjacent, open and free of other hunters.
        to: CellCoord,
    },
    /// Spends the agent's turn without moving.
    Hold {
        /// Agent that stays in place.
        agent: AgentId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// Confirms the seeker configuration was replaced.
    SeekerConfigured {
        /// Speed now applied to the seeker.
        speed: f64,
        /// Safety margin now applied to the seeker.
        safe_distance: u32,
    },
    /// Confirms a hunter joined the registry.
    HunterSpawned {
        /// Identifier assigned to the hunter.
        hunter: HunterId,
        /// Cell the hunter occupies.
        cell: CellCoord,
    },
    /// Reports that a hunter could not be placed.
    HunterSpawnRejected {
        /// Requested spawn cell.
        cell: CellCoord,
        /// Reason the placement failed.
        reason: StepRejection,
    },
    /// Confirms that the seeker moved between two cells.
    SeekerAdvanced {
        /// Cell occupied before moving.
        from: CellCoord,
        /// Cell occupied after moving.
        to: CellCoord,
    },
    /// Confirms that a hunter moved between two cells.
    HunterAdvanced {
        /// Hunter that moved.
        hunter: HunterId,
        /// Cell occupied before moving.
        from: CellCoord,
        /// Cell occupied after moving.
        to: CellCoord,
    },
    /// Confirms the seeker consumed a resource point.
    ResourceCollected {
        /// Cell whose resource point was consumed.
        cell: CellCoord,
        /// Resource points still present in the maze.
        remaining: usize,
    },
    /// Confirms that an agent spent its turn in place.
    AgentHeld {
        /// Agent that held.
        agent: AgentId,
    },
    /// Reports that a move command was refused.
    MoveRejected {
        /// Agent whose move was refused.
        agent: AgentId,
        /// Requested destination.
        to: CellCoord,
        /// Reason the move failed.
        reason: StepRejection,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn direction_between_neighbors() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 2)),
            Some(Direction::North)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(4, 3)),
            Some(Direction::East)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 4)),
            Some(Direction::South)
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(2, 3)),
            Some(Direction::West)
        );
        assert_eq!(Direction::between(origin, origin), None);
        assert_eq!(Direction::between(origin, CellCoord::new(4, 4)), None);
    }

    #[test]
    fn out_of_bounds_cells_are_never_open() {
        let grid = Grid::filled(3, 3, Cell::Open);
        assert!(grid.is_open(CellCoord::new(2, 2)));
        assert!(!grid.is_open(CellCoord::new(3, 0)));
        assert!(!grid.is_open(CellCoord::new(0, 3)));
        assert_eq!(grid.cell(CellCoord::new(5, 5)), None);
    }

    #[test]
    fn open_neighbors_skip_walls_and_edges() {
        let mut grid = Grid::filled(3, 3, Cell::Open);
        grid.set(CellCoord::new(1, 0), Cell::Wall);

        let neighbors: Vec<_> = grid.open_neighbors(CellCoord::new(0, 0)).collect();

        assert_eq!(neighbors, vec![CellCoord::new(0, 1)]);
    }

    #[test]
    fn open_cells_enumerate_in_row_major_order() {
        let mut grid = Grid::filled(2, 2, Cell::Wall);
        grid.set(CellCoord::new(1, 0), Cell::Open);
        grid.set(CellCoord::new(0, 1), Cell::Open);

        let open: Vec<_> = grid.open_cells().collect();

        assert_eq!(open, vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]);
    }

    #[test]
    fn clamp_keeps_positions_inside_grid() {
        let grid = Grid::filled(5, 7, Cell::Wall);
        assert_eq!(grid.clamp(-3, 2), CellCoord::new(0, 2));
        assert_eq!(grid.clamp(9, 9), CellCoord::new(4, 6));
    }

    #[test]
    fn offset_rejects_negative_coordinates() {
        assert_eq!(CellCoord::new(0, 4).offset(-1, 0), None);
        assert_eq!(
            CellCoord::new(2, 4).offset(-1, 1),
            Some(CellCoord::new(1, 5))
        );
    }

    #[test]
    fn pixel_position_scales_by_tile_size() {
        assert_eq!(CellCoord::new(3, 2).pixel_position(30.0), (90.0, 60.0));
    }

    #[test]
    fn path_next_hop_requires_two_cells() {
        let single = Path::from_cells(vec![CellCoord::new(1, 1)]).expect("non-empty");
        assert_eq!(single.next_hop(), None);
        assert!(Path::from_cells(Vec::new()).is_none());
    }

    #[test]
    fn level_params_fill_missing_fields_with_defaults() {
        let params: LevelParams =
            serde_json::from_str(r#"{"maze_size": [21, 19], "ghost_behaviour": "predictive"}"#)
                .expect("level params parse");

        assert_eq!(params.maze_size, [21, 19]);
        assert_eq!(params.hunter_behaviour, HunterBehaviour::Predictive);
        assert_eq!(params.hunter_count, 4);
        assert!((params.hunter_speed - 0.5).abs() < f64::EPSILON);
    }
}
