//! Per-round result reporting.

use std::fmt;

use maze_chase_system_bootstrap::TickOutcome;
use maze_chase_world::{query, World};
use serde::Serialize;

/// Result of playing one level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct RoundSummary {
    pub(crate) level: u32,
    pub(crate) outcome: RoundOutcome,
    pub(crate) ticks: u64,
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) hunters: usize,
    pub(crate) remaining_resources: usize,
}

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub(crate) enum RoundOutcome {
    Captured { hunter: u32 },
    Cleared,
    TickLimit,
}

impl RoundSummary {
    pub(crate) fn new(outcome: TickOutcome, world: &World) -> Self {
        let maze = query::maze(world);
        Self {
            level: query::level_number(world),
            outcome: match outcome {
                TickOutcome::Captured { hunter } => RoundOutcome::Captured {
                    hunter: hunter.get(),
                },
                TickOutcome::Cleared => RoundOutcome::Cleared,
                TickOutcome::Running => RoundOutcome::TickLimit,
            },
            ticks: query::tick_index(world),
            columns: maze.columns(),
            rows: maze.rows(),
            hunters: query::hunter_view(world).len(),
            remaining_resources: maze.resource_points().len(),
        }
    }
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            RoundOutcome::Captured { hunter } => format!("captured by hunter#{hunter}"),
            RoundOutcome::Cleared => "cleared".to_owned(),
            RoundOutcome::TickLimit => "stopped at tick limit".to_owned(),
        };
        write!(
            f,
            "level {}: {outcome} after {} ticks ({}x{} maze, {} hunters, {} resources left)",
            self.level, self.ticks, self.columns, self.rows, self.hunters, self.remaining_resources
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(outcome: RoundOutcome) -> RoundSummary {
        RoundSummary {
            level: 2,
            outcome,
            ticks: 41,
            columns: 15,
            rows: 13,
            hunters: 4,
            remaining_resources: 9,
        }
    }

    #[test]
    fn human_readable_line() {
        assert_eq!(
            summary(RoundOutcome::Captured { hunter: 3 }).to_string(),
            "level 2: captured by hunter#3 after 41 ticks (15x13 maze, 4 hunters, 9 resources left)"
        );
    }

    #[test]
    fn json_line_tags_outcome() {
        let json = serde_json::to_value(summary(RoundOutcome::Cleared)).expect("serializes");
        assert_eq!(json["outcome"]["kind"], "cleared");
        assert_eq!(json["remaining_resources"], 9);

        let json =
            serde_json::to_value(summary(RoundOutcome::Captured { hunter: 1 })).expect("serializes");
        assert_eq!(json["outcome"]["kind"], "captured");
        assert_eq!(json["outcome"]["hunter"], 1);
    }
}
