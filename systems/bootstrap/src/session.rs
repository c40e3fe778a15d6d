use maze_chase_core::{Command, Event, HunterId};
use maze_chase_system_movement::Movement;
use maze_chase_world::{self as world, query, World};
use rand::Rng;
use tracing::info;

/// State of a level after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The level continues.
    Running,
    /// A hunter shares the seeker's cell.
    Captured {
        /// First hunter in registry order found on the seeker's cell.
        hunter: HunterId,
    },
    /// Every resource point has been collected.
    Cleared,
}

impl TickOutcome {
    /// Reports whether the level has ended.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Drives one level: advances time, then lets the seeker and each hunter act in turn.
#[derive(Debug)]
pub struct Session<R> {
    world: World,
    movement: Movement,
    rng: R,
    events: Vec<Event>,
    outcome: TickOutcome,
}

impl<R> Session<R>
where
    R: Rng,
{
    /// Wraps a prepared world.
    pub fn new(world: World, movement: Movement, rng: R) -> Self {
        Self {
            world,
            movement,
            rng,
            events: Vec::new(),
            outcome: TickOutcome::Running,
        }
    }

    /// Read-only access to the world being driven.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Events broadcast during the most recent tick.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    /// Outcome reported by the most recent tick.
    #[must_use]
    pub const fn outcome(&self) -> TickOutcome {
        self.outcome
    }

    /// Consumes the session, returning the world.
    #[must_use]
    pub fn into_world(self) -> World {
        self.world
    }

    /// Runs a single tick and reports whether the level ended.
    ///
    /// Agents act strictly one after another: the seeker first, then hunters
    /// in registration order, each planning against the state left by the
    /// agents before it. Once the level has ended further ticks are no-ops.
    pub fn tick(&mut self) -> TickOutcome {
        self.events.clear();
        if self.outcome.is_finished() {
            return self.outcome;
        }

        world::apply(&mut self.world, Command::Tick, &mut self.events);

        let mut commands = Vec::new();
        self.movement.update_seeker(
            query::grid(&self.world),
            &query::seeker(&self.world),
            query::resource_points(&self.world),
            &query::hunter_view(&self.world),
            &mut self.rng,
            &mut commands,
        );
        self.execute(&mut commands);

        let level_number = query::level_number(&self.world);
        for index in 0..query::hunter_view(&self.world).len() {
            let hunters = query::hunter_view(&self.world);
            let Some(hunter) = hunters.iter().nth(index) else {
                continue;
            };
            self.movement.update_hunter(
                query::grid(&self.world),
                level_number,
                hunter,
                &query::seeker(&self.world),
                &hunters,
                &mut self.rng,
                &mut commands,
            );
            self.execute(&mut commands);
        }

        self.outcome = if let Some(hunter) = query::capturing_hunter(&self.world) {
            TickOutcome::Captured { hunter }
        } else if query::resources_exhausted(&self.world) {
            TickOutcome::Cleared
        } else {
            TickOutcome::Running
        };
        self.outcome
    }

    /// Ticks until the level ends or `max_ticks` ticks have run.
    pub fn run(&mut self, max_ticks: u64) -> TickOutcome {
        let mut outcome = self.outcome;
        for _ in 0..max_ticks {
            outcome = self.tick();
            if outcome.is_finished() {
                break;
            }
        }

        info!(
            level = query::level_number(&self.world),
            ticks = query::tick_index(&self.world),
            remaining = query::resource_points(&self.world).len(),
            ?outcome,
            "session stopped"
        );
        outcome
    }

    fn execute(&mut self, commands: &mut Vec<Command>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}
