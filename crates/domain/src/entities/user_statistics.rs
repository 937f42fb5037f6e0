use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::GameId;

/// Personal record block stored on each user.
///
/// Persisted with defaults for new users. Nothing in the core updates it; clients write it
/// through the admin update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatistics {
    pub games_recorded: u64,
    pub problems_solved: u64,
    pub winning_streak: u32,
    pub max_profit_personal: Decimal,
    #[serde(rename = "maxProfitGameID")]
    pub max_profit_game_id: Option<GameId>,
    pub max_chips_on_table: Decimal,
    #[serde(rename = "maxChipsOnTableGameID")]
    pub max_chips_on_table_game_id: Option<GameId>,
    pub max_loss_all: Decimal,
    pub max_profit_all: Decimal,
    pub max_loss_all_name: String,
    pub max_profit_all_name: String,
    #[serde(rename = "maxLossAllGameID")]
    pub max_loss_all_game_id: Option<GameId>,
    #[serde(rename = "maxProfitAllGameID")]
    pub max_profit_all_game_id: Option<GameId>,
}
