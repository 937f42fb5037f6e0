use serde::{Deserialize, Serialize};

/// Body of `PUT /global`. Counters are signed here so that negative input can be reported
/// as a validation failure rather than a decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplaceStatsRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub total_games_recorded: Option<i64>,
    pub total_problems_solved: Option<i64>,
    pub total_users: Option<i64>,
}

/// Body of `PUT /global/increment/{field}`. A missing `value` means +1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncrementStatRequest {
    pub value: Option<i64>,
}

impl IncrementStatRequest {
    pub fn delta(&self) -> i64 {
        self.value.unwrap_or(1)
    }
}
