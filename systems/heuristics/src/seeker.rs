//! Resource-point targeting for the seeker.

use std::collections::BTreeSet;

use maze_chase_core::CellCoord;

/// Chooses which resource point the seeker heads for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeekerHeuristic {
    safe_distance: u32,
}

impl SeekerHeuristic {
    /// Creates a heuristic that treats points at least `safe_distance` from
    /// every hunter as safe.
    #[must_use]
    pub const fn new(safe_distance: u32) -> Self {
        Self { safe_distance }
    }

    /// Picks the nearest safe resource point, else the nearest point overall.
    ///
    /// Ties resolve in row-major order: smallest row, then smallest column.
    /// With no points left the seeker targets its own cell.
    #[must_use]
    pub fn target(
        &self,
        seeker: CellCoord,
        resource_points: &BTreeSet<CellCoord>,
        hunters: &[CellCoord],
    ) -> CellCoord {
        let nearest_safe = resource_points
            .iter()
            .copied()
            .filter(|point| self.is_safe(*point, hunters))
            .min_by_key(|point| scan_key(seeker, *point));

        nearest_safe
            .or_else(|| {
                resource_points
                    .iter()
                    .copied()
                    .min_by_key(|point| scan_key(seeker, *point))
            })
            .unwrap_or(seeker)
    }

    fn is_safe(&self, point: CellCoord, hunters: &[CellCoord]) -> bool {
        hunters
            .iter()
            .all(|hunter| point.manhattan_distance(*hunter) >= self.safe_distance)
    }
}

fn scan_key(seeker: CellCoord, point: CellCoord) -> (u32, u32, u32) {
    (seeker.manhattan_distance(point), point.row(), point.column())
}
