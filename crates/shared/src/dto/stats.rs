use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStatsDto {
    pub total_games_recorded: u64,
    pub total_problems_solved: u64,
    pub total_users: u64,
}
