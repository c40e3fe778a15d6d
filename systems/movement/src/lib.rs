#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick agent controller that plans routes and proposes steps.
//!
//! The controller never mutates the world. For every agent that accrued
//! enough progress it selects a target, searches for a route with the
//! algorithm drawn from its [`AlgorithmPolicy`], and emits either a move to
//! the route's next hop, a random legal move, or a hold.

use std::collections::BTreeSet;

use maze_chase_core::{AgentId, CellCoord, Command, Direction, Grid, Path};
use maze_chase_system_heuristics::{
    FormationSlot, HunterHeuristic, SeekerHeuristic, SeekerSighting,
};
use maze_chase_system_pathfinding::AlgorithmPolicy;
use maze_chase_world::query::{HunterSnapshot, HunterView, SeekerSnapshot};
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;
use tracing::{debug, warn};

/// Number of most recent cells a hunter refuses to step back onto.
const OSCILLATION_WINDOW: usize = 2;

/// Faults detected while turning a route into a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The agent reported a cell outside the grid.
    #[error("{agent} stands on {cell}, outside the grid")]
    OutsideGrid {
        /// Agent being planned for.
        agent: AgentId,
        /// Cell the agent reported.
        cell: CellCoord,
    },
    /// The route's next hop is not a cardinal neighbour of the agent.
    #[error("route for {agent} jumps from {from} to {to}")]
    DetachedHop {
        /// Agent being planned for.
        agent: AgentId,
        /// Cell the agent occupies.
        from: CellCoord,
        /// Hop proposed by the route.
        to: CellCoord,
    },
}

/// Pure system that reads world snapshots and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    policy: AlgorithmPolicy,
}

impl Movement {
    /// Creates a controller that chooses search algorithms with `policy`.
    #[must_use]
    pub const fn new(policy: AlgorithmPolicy) -> Self {
        Self { policy }
    }

    /// Emits the seeker's command for this tick, if it is ready to act.
    pub fn update_seeker<R>(
        &self,
        grid: &Grid,
        seeker: &SeekerSnapshot,
        resource_points: &BTreeSet<CellCoord>,
        hunters: &HunterView,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        if !seeker.ready_for_step {
            return;
        }

        let target = SeekerHeuristic::new(seeker.safe_distance).target(
            seeker.cell,
            resource_points,
            &hunters.cells(),
        );
        let hop = self
            .contain(self.route_hop(grid, AgentId::Seeker, seeker.cell, target, rng))
            .filter(|cell| grid.is_open(*cell));

        let step = match hop {
            Some(to) => Some((to, true)),
            None => random_step(grid, seeker.cell, |_| true, rng).map(|to| (to, false)),
        };
        match step {
            Some((to, on_route)) => out.push(Command::MoveSeeker { to, on_route }),
            None => out.push(Command::Hold {
                agent: AgentId::Seeker,
            }),
        }
    }

    /// Emits the command for one hunter, if it is ready to act.
    ///
    /// `hunters` must reflect moves already made by hunters earlier in the
    /// same tick so occupancy checks see them.
    pub fn update_hunter<R>(
        &self,
        grid: &Grid,
        level_number: u32,
        hunter: &HunterSnapshot,
        seeker: &SeekerSnapshot,
        hunters: &HunterView,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        if !hunter.ready_for_step {
            return;
        }

        let agent = AgentId::Hunter(hunter.id);
        let target = HunterHeuristic::for_level(level_number).target(
            grid,
            SeekerSighting {
                cell: seeker.cell,
                heading: seeker.heading,
            },
            FormationSlot {
                index: hunter.index,
                count: hunters.len(),
            },
        );
        let free = |cell: CellCoord| !hunters.occupied_by_other(cell, hunter.id);
        let hop = self
            .contain(self.route_hop(grid, agent, hunter.cell, target, rng))
            .filter(|cell| !hunter.history.visited_recently(*cell, OSCILLATION_WINDOW))
            .filter(|cell| free(*cell));

        match hop.or_else(|| random_step(grid, hunter.cell, free, rng)) {
            Some(to) => out.push(Command::MoveHunter {
                hunter: hunter.id,
                to,
            }),
            None => out.push(Command::Hold { agent }),
        }
    }

    fn route_hop<R>(
        &self,
        grid: &Grid,
        agent: AgentId,
        from: CellCoord,
        target: CellCoord,
        rng: &mut R,
    ) -> Result<Option<CellCoord>, PlanError>
    where
        R: Rng + ?Sized,
    {
        if !grid.contains(from) {
            return Err(PlanError::OutsideGrid { agent, cell: from });
        }

        let algorithm = self.policy.pick(rng);
        let path = algorithm.search(grid, from, target);
        debug!(
            %agent,
            %algorithm,
            %target,
            length = path.as_ref().map_or(0, Path::len),
            "planned route"
        );

        let Some(hop) = path.as_ref().and_then(Path::next_hop) else {
            return Ok(None);
        };
        if Direction::between(from, hop).is_none() {
            return Err(PlanError::DetachedHop {
                agent,
                from,
                to: hop,
            });
        }
        Ok(Some(hop))
    }

    fn contain(&self, planned: Result<Option<CellCoord>, PlanError>) -> Option<CellCoord> {
        planned.unwrap_or_else(|error| {
            warn!(%error, "route planning failed; falling back to a random move");
            None
        })
    }
}

/// Picks a random in-bounds open neighbour accepted by `admissible`.
fn random_step<R, F>(grid: &Grid, from: CellCoord, admissible: F, rng: &mut R) -> Option<CellCoord>
where
    R: Rng + ?Sized,
    F: Fn(CellCoord) -> bool,
{
    let mut directions = Direction::ALL;
    directions.shuffle(rng);
    directions
        .into_iter()
        .filter_map(|direction| grid.neighbor(from, direction))
        .find(|cell| grid.is_open(*cell) && admissible(*cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::Cell;
    use maze_chase_system_pathfinding::Algorithm;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn corridor() -> Grid {
        let mut grid = Grid::filled(7, 3, Cell::Wall);
        for column in 1..6 {
            grid.set(CellCoord::new(column, 1), Cell::Open);
        }
        grid
    }

    #[test]
    fn random_step_only_lands_on_open_cells() {
        let grid = corridor();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..32 {
            let step = random_step(&grid, CellCoord::new(3, 1), |_| true, &mut rng)
                .expect("corridor has two exits");
            assert!(step == CellCoord::new(2, 1) || step == CellCoord::new(4, 1));
        }
    }

    #[test]
    fn random_step_respects_admissibility() {
        let grid = corridor();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let blocked = CellCoord::new(2, 1);
        for _ in 0..16 {
            assert_eq!(
                random_step(&grid, CellCoord::new(3, 1), |cell| cell != blocked, &mut rng),
                Some(CellCoord::new(4, 1))
            );
        }
        assert_eq!(
            random_step(&grid, CellCoord::new(1, 1), |cell| cell != blocked, &mut rng),
            None
        );
    }

    #[test]
    fn route_hop_reports_agents_outside_the_grid() {
        let movement = Movement::new(AlgorithmPolicy::Fixed(Algorithm::BreadthFirst));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outside = CellCoord::new(40, 1);

        let planned = movement.route_hop(
            &corridor(),
            AgentId::Seeker,
            outside,
            CellCoord::new(3, 1),
            &mut rng,
        );

        assert_eq!(
            planned,
            Err(PlanError::OutsideGrid {
                agent: AgentId::Seeker,
                cell: outside,
            })
        );
        assert_eq!(movement.contain(planned), None);
    }

    #[test]
    fn route_hop_follows_route() {
        let movement = Movement::new(AlgorithmPolicy::Fixed(Algorithm::BestFirst));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let planned = movement.route_hop(
            &corridor(),
            AgentId::Seeker,
            CellCoord::new(1, 1),
            CellCoord::new(5, 1),
            &mut rng,
        );

        assert_eq!(planned, Ok(Some(CellCoord::new(2, 1))));
    }
}
