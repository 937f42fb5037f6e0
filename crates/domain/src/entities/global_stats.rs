//! Site-wide counters kept in a single well-known document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identity of the one and only statistics document.
pub const GLOBAL_STATS_ID: &str = "Global";

/// The counters that may be adjusted individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatField {
    #[serde(rename = "totalGamesRecorded")]
    GamesRecorded,
    #[serde(rename = "totalProblemsSolved")]
    ProblemsSolved,
    #[serde(rename = "totalUsers")]
    TotalUsers,
}

impl StatField {
    pub const ALL: [StatField; 3] = [
        StatField::GamesRecorded,
        StatField::ProblemsSolved,
        StatField::TotalUsers,
    ];

    /// Persisted / wire field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GamesRecorded => "totalGamesRecorded",
            Self::ProblemsSolved => "totalProblemsSolved",
            Self::TotalUsers => "totalUsers",
        }
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Invalid field. Must be one of: {}",
                    Self::ALL.map(|f| f.as_str()).join(", ")
                ))
            })
    }
}

/// Snapshot of the global counters.
///
/// # Invariants
///
/// All counters are non-negative (enforced by the unsigned representation; writes that
/// would cross zero are rejected at the storage layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_games_recorded: u64,
    pub total_problems_solved: u64,
    pub total_users: u64,
}

impl GlobalStats {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a full replacement from caller-supplied counters.
    ///
    /// # Errors
    ///
    /// `DomainError::Validation` if any counter is missing or negative.
    pub fn from_counts(
        games_recorded: Option<i64>,
        problems_solved: Option<i64>,
        total_users: Option<i64>,
    ) -> Result<Self, DomainError> {
        fn counter(field: StatField, value: Option<i64>) -> Result<u64, DomainError> {
            let value = value
                .ok_or_else(|| DomainError::validation(format!("{} is required", field)))?;
            u64::try_from(value).map_err(|_| {
                DomainError::validation(format!("{} must be a non-negative number", field))
            })
        }

        Ok(Self {
            total_games_recorded: counter(StatField::GamesRecorded, games_recorded)?,
            total_problems_solved: counter(StatField::ProblemsSolved, problems_solved)?,
            total_users: counter(StatField::TotalUsers, total_users)?,
        })
    }

    pub fn get(&self, field: StatField) -> u64 {
        match field {
            StatField::GamesRecorded => self.total_games_recorded,
            StatField::ProblemsSolved => self.total_problems_solved,
            StatField::TotalUsers => self.total_users,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_only() {
        assert_eq!(
            "totalProblemsSolved".parse::<StatField>().unwrap(),
            StatField::ProblemsSolved
        );
        let err = "gamesRecorded".parse::<StatField>().unwrap_err();
        assert!(err.to_string().contains("totalGamesRecorded"));
    }

    #[test]
    fn replacement_requires_every_counter() {
        let err = GlobalStats::from_counts(Some(1), None, Some(3)).unwrap_err();
        assert!(err.to_string().contains("totalProblemsSolved is required"));
    }

    #[test]
    fn replacement_rejects_negative_counters() {
        let err = GlobalStats::from_counts(Some(1), Some(2), Some(-3)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn replacement_accepts_zeroes() {
        let stats = GlobalStats::from_counts(Some(0), Some(0), Some(0)).unwrap();
        assert_eq!(stats, GlobalStats::zero());
    }

    #[test]
    fn serializes_with_document_field_names() {
        let stats = GlobalStats {
            total_games_recorded: 4,
            total_problems_solved: 2,
            total_users: 9,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalGamesRecorded"], 4);
        assert_eq!(json["totalProblemsSolved"], 2);
        assert_eq!(json["totalUsers"], 9);
    }
}
