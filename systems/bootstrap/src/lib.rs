#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level start-up and the tick driver that runs a level to completion.

mod session;

pub use session::{Session, TickOutcome};

use maze_chase_core::{CellCoord, Command, Event, LevelParams};
use maze_chase_world::{
    self as world, query, Maze, MazeError, World, DEFAULT_SAFE_DISTANCE, DEFAULT_SEEKER_SPEED,
};
use rand::Rng;
use tracing::{info, warn};

/// Offsets from the hunter start used by the first hunters of a level.
const FORMATION_SPAWNS: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
/// Attempts made to find a random interior cell for an extra hunter.
const RANDOM_SPAWN_ATTEMPTS: usize = 100;

/// Prepares worlds for new levels.
#[derive(Clone, Debug, PartialEq)]
pub struct Bootstrap {
    seeker_speed: f64,
    safe_distance: u32,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            seeker_speed: DEFAULT_SEEKER_SPEED,
            safe_distance: DEFAULT_SAFE_DISTANCE,
        }
    }
}

impl Bootstrap {
    /// Overrides the hunter distance the seeker treats as safe.
    #[must_use]
    pub fn with_safe_distance(mut self, safe_distance: u32) -> Self {
        self.safe_distance = safe_distance;
        self
    }

    /// Overrides the movement progress the seeker accrues per tick.
    #[must_use]
    pub fn with_seeker_speed(mut self, seeker_speed: f64) -> Self {
        self.seeker_speed = seeker_speed;
        self
    }

    /// Generates the maze for a level, seeds its resource points and places the hunters.
    ///
    /// Fails only when the requested maze is smaller than 3x3.
    pub fn start_level<R>(
        &self,
        params: &LevelParams,
        level_number: u32,
        rng: &mut R,
    ) -> Result<World, MazeError>
    where
        R: Rng + ?Sized,
    {
        let [width, height] = params.maze_size;
        let mut maze = Maze::generate(width, height, params.wall_density, rng)?;
        maze.place_resource_points();

        let mut world = World::new(maze, level_number);
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::ConfigureSeeker {
                speed: self.seeker_speed,
                safe_distance: self.safe_distance,
            },
            &mut events,
        );
        spawn_hunters(&mut world, params, rng);

        let maze = query::maze(&world);
        info!(
            level = level_number,
            columns = maze.columns(),
            rows = maze.rows(),
            behaviour = %params.hunter_behaviour,
            hunters = query::hunter_view(&world).len(),
            resources = maze.resource_points().len(),
            "level started"
        );
        Ok(world)
    }
}

fn spawn_hunters<R>(world: &mut World, params: &LevelParams, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let hunter_start = query::maze(world).hunter_start_position();

    for index in 0..params.hunter_count {
        let candidate = usize::try_from(index)
            .ok()
            .and_then(|slot| FORMATION_SPAWNS.get(slot))
            .and_then(|(column, row)| hunter_start.offset(*column, *row))
            .unwrap_or_else(|| random_spawn_cell(query::maze(world), rng));
        if try_spawn(world, candidate, params.hunter_speed) {
            continue;
        }

        let retry = random_spawn_cell(query::maze(world), rng);
        if !try_spawn(world, retry, params.hunter_speed) {
            warn!(index, %candidate, %retry, "no free cell for hunter; skipping it");
        }
    }
}

fn try_spawn(world: &mut World, cell: CellCoord, speed: f64) -> bool {
    let mut events = Vec::new();
    world::apply(world, Command::SpawnHunter { cell, speed }, &mut events);
    events
        .iter()
        .any(|event| matches!(event, Event::HunterSpawned { .. }))
}

/// Random open interior cell away from both start positions, or the hunter start.
fn random_spawn_cell<R>(maze: &Maze, rng: &mut R) -> CellCoord
where
    R: Rng + ?Sized,
{
    let max_column = maze.columns().saturating_sub(2).max(1);
    let max_row = maze.rows().saturating_sub(2).max(1);

    for _ in 0..RANDOM_SPAWN_ATTEMPTS {
        let cell = CellCoord::new(rng.gen_range(1..=max_column), rng.gen_range(1..=max_row));
        if cell != maze.start_position()
            && cell != maze.hunter_start_position()
            && maze.is_open(cell)
        {
            return cell;
        }
    }
    maze.hunter_start_position()
}
