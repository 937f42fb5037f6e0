//! Lifecycle events
//!
//! Aggregate mutations report what happened through these values. The statistics side
//! effects of every event are defined here, in one table, so that the engine only has to
//! apply them.
//!
//! | Event                         | Counter deltas                                    |
//! |-------------------------------|---------------------------------------------------|
//! | game created                  | totalGamesRecorded +1                             |
//! | game deleted (unresolved)     | totalGamesRecorded -1                             |
//! | game deleted (resolved)       | totalGamesRecorded -1, totalProblemsSolved -1     |
//! | resolved false -> true        | totalProblemsSolved +1                            |
//! | resolved true -> false        | totalProblemsSolved -1                            |
//! | resolve on a resolved game    | none                                              |
//! | user created                  | totalUsers +1                                     |
//! | user hard-deleted             | totalUsers -1                                     |

use serde::{Deserialize, Serialize};

use crate::entities::StatField;

/// Outcome of a change to a game's `resolved` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionChange {
    /// false -> true
    Resolved,
    /// true -> false
    Unresolved,
    /// The flag kept its value.
    Unchanged,
}

impl ResolutionChange {
    pub fn between(was_resolved: bool, is_resolved: bool) -> Self {
        match (was_resolved, is_resolved) {
            (false, true) => Self::Resolved,
            (true, false) => Self::Unresolved,
            _ => Self::Unchanged,
        }
    }
}

/// Events with statistics consequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum LifecycleEvent {
    GameCreated,
    GameDeleted { was_resolved: bool },
    GameResolution { change: ResolutionChange },
    UserCreated,
    UserDeleted,
}

/// One counter adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatDelta {
    pub field: StatField,
    pub delta: i64,
}

impl StatDelta {
    pub fn increment(field: StatField) -> Self {
        Self { field, delta: 1 }
    }

    pub fn decrement(field: StatField) -> Self {
        Self { field, delta: -1 }
    }
}

impl LifecycleEvent {
    /// Counter adjustments owed for this event, in application order.
    pub fn stat_deltas(&self) -> Vec<StatDelta> {
        match self {
            Self::GameCreated => vec![StatDelta::increment(StatField::GamesRecorded)],
            Self::GameDeleted { was_resolved } => {
                let mut deltas = vec![StatDelta::decrement(StatField::GamesRecorded)];
                if *was_resolved {
                    deltas.push(StatDelta::decrement(StatField::ProblemsSolved));
                }
                deltas
            }
            Self::GameResolution { change } => match change {
                ResolutionChange::Resolved => {
                    vec![StatDelta::increment(StatField::ProblemsSolved)]
                }
                ResolutionChange::Unresolved => {
                    vec![StatDelta::decrement(StatField::ProblemsSolved)]
                }
                ResolutionChange::Unchanged => Vec::new(),
            },
            Self::UserCreated => vec![StatDelta::increment(StatField::TotalUsers)],
            Self::UserDeleted => vec![StatDelta::decrement(StatField::TotalUsers)],
        }
    }
}

impl From<ResolutionChange> for LifecycleEvent {
    fn from(change: ResolutionChange) -> Self {
        Self::GameResolution { change }
    }
}
