//! Level-dependent target selection for hunters.

use maze_chase_core::{CellCoord, Direction, Grid};

/// Cells the predictive tier looks ahead along the seeker's heading.
const LOOKAHEAD: i64 = 2;

/// Difficulty bracket selecting how hunters choose their target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HunterTier {
    /// Levels below 3: head for the seeker's current cell.
    DirectChase,
    /// Levels 3 and 4: aim two cells ahead of the seeker's heading.
    Predictive,
    /// Level 5 onwards: surround the seeker in an evenly spaced formation.
    Formation,
}

impl HunterTier {
    /// Resolves the tier active for the provided level number.
    #[must_use]
    pub const fn for_level(level_number: u32) -> Self {
        if level_number < 3 {
            Self::DirectChase
        } else if level_number < 5 {
            Self::Predictive
        } else {
            Self::Formation
        }
    }
}

/// What a hunter knows about the seeker when choosing a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeekerSighting {
    /// Cell currently occupied by the seeker.
    pub cell: CellCoord,
    /// Direction of the seeker's most recent step, if it is moving.
    pub heading: Option<Direction>,
}

/// Position of a hunter within the set of active hunters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormationSlot {
    /// Zero-based registration index of the hunter.
    pub index: usize,
    /// Number of active hunters.
    pub count: usize,
}

/// Chooses hunter targets for a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HunterHeuristic {
    tier: HunterTier,
}

impl HunterHeuristic {
    /// Creates the heuristic used on the provided level.
    #[must_use]
    pub const fn for_level(level_number: u32) -> Self {
        Self {
            tier: HunterTier::for_level(level_number),
        }
    }

    /// Returns the cell the hunter occupying `slot` should pursue.
    #[must_use]
    pub fn target(&self, grid: &Grid, seeker: SeekerSighting, slot: FormationSlot) -> CellCoord {
        match self.tier {
            HunterTier::DirectChase => seeker.cell,
            HunterTier::Predictive => predict(grid, seeker),
            HunterTier::Formation => surround(grid, seeker.cell, slot),
        }
    }
}

fn predict(grid: &Grid, seeker: SeekerSighting) -> CellCoord {
    let (columns, rows) = seeker
        .heading
        .map_or((0, 0), |direction| direction.offset());
    grid.clamp(
        i64::from(seeker.cell.column()) + i64::from(columns) * LOOKAHEAD,
        i64::from(seeker.cell.row()) + i64::from(rows) * LOOKAHEAD,
    )
}

fn surround(grid: &Grid, seeker: CellCoord, slot: FormationSlot) -> CellCoord {
    let (columns, rows) = formation_offset(slot.index, slot.count);
    seeker
        .offset(columns, rows)
        .filter(|cell| grid.is_open(*cell))
        .unwrap_or(seeker)
}

/// Unit offset assigned to the hunter at `index` out of `count`.
///
/// Hunters are spaced `360 / count` degrees apart, starting east and turning
/// towards increasing rows. Components round half to even, so `count = 4`
/// yields `(1, 0)`, `(0, 1)`, `(-1, 0)` and `(0, -1)`.
#[must_use]
pub fn formation_offset(index: usize, count: usize) -> (i32, i32) {
    if count == 0 {
        return (0, 0);
    }
    let angle = (360.0 / count as f64 * index as f64).to_radians();
    (
        angle.cos().round_ties_even() as i32,
        angle.sin().round_ties_even() as i32,
    )
}
