#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.

mod history;
mod maze;

use maze_chase_core::{AgentId, CellCoord, Command, Direction, Event, HunterId, StepRejection};

pub use history::{History, HISTORY_CAPACITY};
pub use maze::{Maze, MazeError};

/// Hunter safety margin applied to a freshly created seeker.
pub const DEFAULT_SAFE_DISTANCE: u32 = 3;
/// Movement progress a freshly created seeker accrues per tick.
pub const DEFAULT_SEEKER_SPEED: f64 = 1.0;

const STEP_THRESHOLD: f64 = 1.0;

/// Represents the authoritative Maze Chase world state for a single level.
#[derive(Debug)]
pub struct World {
    maze: Maze,
    level_number: u32,
    seeker: Seeker,
    hunters: Vec<Hunter>,
    next_hunter_id: u32,
    tick_index: u64,
}

impl World {
    /// Creates a world around a generated maze, placing the seeker on the maze start.
    #[must_use]
    pub fn new(maze: Maze, level_number: u32) -> Self {
        let seeker = Seeker::at(maze.start_position());
        Self {
            maze,
            level_number,
            seeker,
            hunters: Vec::new(),
            next_hunter_id: 0,
            tick_index: 0,
        }
    }

    fn hunter_index(&self, hunter: HunterId) -> Option<usize> {
        self.hunters.iter().position(|entry| entry.id == hunter)
    }

    fn hunter_on(&self, cell: CellCoord, except: Option<HunterId>) -> bool {
        self.hunters
            .iter()
            .any(|hunter| hunter.cell == cell && Some(hunter.id) != except)
    }

    fn move_seeker(&mut self, to: CellCoord, on_route: bool, out_events: &mut Vec<Event>) {
        if !self.seeker.ready_for_step() {
            out_events.push(Event::MoveRejected {
                agent: AgentId::Seeker,
                to,
                reason: StepRejection::NotReady,
            });
            return;
        }
        self.seeker.progress = 0.0;

        let from = self.seeker.cell;
        let Some(direction) = Direction::between(from, to) else {
            out_events.push(Event::MoveRejected {
                agent: AgentId::Seeker,
                to,
                reason: StepRejection::NotAdjacent,
            });
            return;
        };
        if !self.maze.is_open(to) {
            out_events.push(Event::MoveRejected {
                agent: AgentId::Seeker,
                to,
                reason: StepRejection::Blocked,
            });
            return;
        }

        self.seeker.cell = to;
        self.seeker.heading = on_route.then_some(direction);
        self.seeker.history.push(to);
        out_events.push(Event::SeekerAdvanced { from, to });

        if self.maze.collect_resource(to) {
            out_events.push(Event::ResourceCollected {
                cell: to,
                remaining: self.maze.resource_points().len(),
            });
        }
    }

    fn move_hunter(&mut self, hunter: HunterId, to: CellCoord, out_events: &mut Vec<Event>) {
        let agent = AgentId::Hunter(hunter);
        let Some(index) = self.hunter_index(hunter) else {
            out_events.push(Event::MoveRejected {
                agent,
                to,
                reason: StepRejection::UnknownHunter,
            });
            return;
        };
        if !self.hunters[index].ready_for_step() {
            out_events.push(Event::MoveRejected {
                agent,
                to,
                reason: StepRejection::NotReady,
            });
            return;
        }
        self.hunters[index].progress = 0.0;

        let from = self.hunters[index].cell;
        let reason = if Direction::between(from, to).is_none() {
            Some(StepRejection::NotAdjacent)
        } else if !self.maze.is_open(to) {
            Some(StepRejection::Blocked)
        } else if self.hunter_on(to, Some(hunter)) {
            Some(StepRejection::Occupied)
        } else {
            None
        };
        if let Some(reason) = reason {
            out_events.push(Event::MoveRejected { agent, to, reason });
            return;
        }

        let entry = &mut self.hunters[index];
        entry.cell = to;
        entry.history.push(to);
        out_events.push(Event::HunterAdvanced { hunter, from, to });
    }

    fn hold(&mut self, agent: AgentId, out_events: &mut Vec<Event>) {
        match agent {
            AgentId::Seeker => {
                if !self.seeker.ready_for_step() {
                    return;
                }
                self.seeker.progress = 0.0;
                self.seeker.heading = None;
            }
            AgentId::Hunter(hunter) => {
                let Some(index) = self.hunter_index(hunter) else {
                    return;
                };
                if !self.hunters[index].ready_for_step() {
                    return;
                }
                self.hunters[index].progress = 0.0;
            }
        }
        out_events.push(Event::AgentHeld { agent });
    }

    fn spawn_hunter(&mut self, cell: CellCoord, speed: f64, out_events: &mut Vec<Event>) {
        let reason = if !self.maze.is_open(cell) {
            Some(StepRejection::Blocked)
        } else if self.seeker.cell == cell || self.hunter_on(cell, None) {
            Some(StepRejection::Occupied)
        } else {
            None
        };
        if let Some(reason) = reason {
            out_events.push(Event::HunterSpawnRejected { cell, reason });
            return;
        }

        let hunter = HunterId::new(self.next_hunter_id);
        self.next_hunter_id = self.next_hunter_id.saturating_add(1);
        self.hunters.push(Hunter {
            id: hunter,
            cell,
            history: History::default(),
            progress: 0.0,
            speed,
        });
        out_events.push(Event::HunterSpawned { hunter, cell });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            world.seeker.progress += world.seeker.speed;
            for hunter in &mut world.hunters {
                hunter.progress += hunter.speed;
            }
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
        Command::ConfigureSeeker {
            speed,
            safe_distance,
        } => {
            world.seeker.speed = speed;
            world.seeker.safe_distance = safe_distance;
            out_events.push(Event::SeekerConfigured {
                speed,
                safe_distance,
            });
        }
        Command::SpawnHunter { cell, speed } => world.spawn_hunter(cell, speed, out_events),
        Command::MoveSeeker { to, on_route } => world.move_seeker(to, on_route, out_events),
        Command::MoveHunter { hunter, to } => world.move_hunter(hunter, to, out_events),
        Command::Hold { agent } => world.hold(agent, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeSet;

    use super::{History, Maze, World};
    use maze_chase_core::{CellCoord, Direction, Grid, HunterId};

    /// Provides read-only access to the maze.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Provides read-only access to the passability grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        world.maze.grid()
    }

    /// Reports whether the cell is in bounds and passable.
    #[must_use]
    pub fn is_open(world: &World, cell: CellCoord) -> bool {
        world.maze.is_open(cell)
    }

    /// Level number the world was created for.
    #[must_use]
    pub fn level_number(world: &World) -> u32 {
        world.level_number
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Resource points still waiting to be collected.
    #[must_use]
    pub fn resource_points(world: &World) -> &BTreeSet<CellCoord> {
        world.maze.resource_points()
    }

    /// Reports whether every resource point has been collected.
    #[must_use]
    pub fn resources_exhausted(world: &World) -> bool {
        world.maze.resource_points().is_empty()
    }

    /// First hunter in registry order standing on the seeker's cell.
    #[must_use]
    pub fn capturing_hunter(world: &World) -> Option<HunterId> {
        world
            .hunters
            .iter()
            .find(|hunter| hunter.cell == world.seeker.cell)
            .map(|hunter| hunter.id)
    }

    /// Captures a read-only snapshot of the seeker.
    #[must_use]
    pub fn seeker(world: &World) -> SeekerSnapshot {
        let seeker = &world.seeker;
        SeekerSnapshot {
            cell: seeker.cell,
            heading: seeker.heading,
            history: seeker.history,
            ready_for_step: seeker.ready_for_step(),
            speed: seeker.speed,
            safe_distance: seeker.safe_distance,
        }
    }

    /// Captures a read-only view of the hunters in registry order.
    #[must_use]
    pub fn hunter_view(world: &World) -> HunterView {
        let snapshots = world
            .hunters
            .iter()
            .enumerate()
            .map(|(index, hunter)| HunterSnapshot {
                id: hunter.id,
                index,
                cell: hunter.cell,
                history: hunter.history,
                ready_for_step: hunter.ready_for_step(),
                speed: hunter.speed,
            })
            .collect();
        HunterView { snapshots }
    }

    /// Immutable representation of the seeker's state.
    #[derive(Clone, Debug, PartialEq)]
    pub struct SeekerSnapshot {
        /// Cell currently occupied by the seeker.
        pub cell: CellCoord,
        /// Direction of the seeker's most recent step, if it moved on its last turn.
        pub heading: Option<Direction>,
        /// Cells the seeker recently stepped onto.
        pub history: History,
        /// Indicates whether the seeker accrued enough progress to act.
        pub ready_for_step: bool,
        /// Movement progress accrued per tick.
        pub speed: f64,
        /// Minimum hunter distance for a resource point to count as safe.
        pub safe_distance: u32,
    }

    /// Immutable representation of a single hunter's state.
    #[derive(Clone, Debug, PartialEq)]
    pub struct HunterSnapshot {
        /// Identifier assigned to the hunter.
        pub id: HunterId,
        /// Position of the hunter within the registry.
        pub index: usize,
        /// Cell currently occupied by the hunter.
        pub cell: CellCoord,
        /// Cells the hunter recently stepped onto.
        pub history: History,
        /// Indicates whether the hunter accrued enough progress to act.
        pub ready_for_step: bool,
        /// Movement progress accrued per tick.
        pub speed: f64,
    }

    /// Read-only snapshot describing every registered hunter.
    #[derive(Clone, Debug, Default)]
    pub struct HunterView {
        snapshots: Vec<HunterSnapshot>,
    }

    impl HunterView {
        /// Iterator over the hunters in registry order.
        pub fn iter(&self) -> impl Iterator<Item = &HunterSnapshot> {
            self.snapshots.iter()
        }

        /// Number of registered hunters.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no hunters are registered.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Snapshot of the hunter with the provided identifier.
        #[must_use]
        pub fn get(&self, hunter: HunterId) -> Option<&HunterSnapshot> {
            self.snapshots.iter().find(|snapshot| snapshot.id == hunter)
        }

        /// Cells occupied by every hunter in registry order.
        #[must_use]
        pub fn cells(&self) -> Vec<CellCoord> {
            self.snapshots.iter().map(|snapshot| snapshot.cell).collect()
        }

        /// Reports whether a hunter other than `except` stands on `cell`.
        #[must_use]
        pub fn occupied_by_other(&self, cell: CellCoord, except: HunterId) -> bool {
            self.snapshots
                .iter()
                .any(|snapshot| snapshot.cell == cell && snapshot.id != except)
        }
    }
}

#[derive(Clone, Debug)]
struct Seeker {
    cell: CellCoord,
    heading: Option<Direction>,
    history: History,
    progress: f64,
    speed: f64,
    safe_distance: u32,
}

impl Seeker {
    fn at(cell: CellCoord) -> Self {
        Self {
            cell,
            heading: None,
            history: History::default(),
            progress: 0.0,
            speed: DEFAULT_SEEKER_SPEED,
            safe_distance: DEFAULT_SAFE_DISTANCE,
        }
    }

    fn ready_for_step(&self) -> bool {
        self.progress >= STEP_THRESHOLD
    }
}

#[derive(Clone, Debug)]
struct Hunter {
    id: HunterId,
    cell: CellCoord,
    history: History,
    progress: f64,
    speed: f64,
}

impl Hunter {
    fn ready_for_step(&self) -> bool {
        self.progress >= STEP_THRESHOLD
    }
}
