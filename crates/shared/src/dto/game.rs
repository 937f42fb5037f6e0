use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A game as returned to clients. Field names follow the stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "userGameID")]
    pub user_game_id: u32,
    #[serde(rename = "type")]
    pub game_type: String,
    pub program_run_time: DateTime<Utc>,
    pub location: String,
    pub resolved: bool,
    pub resolved_string: String,
    pub game_string: String,
    pub game_user_note: String,
    pub total_cash_on_table: Decimal,
    pub game_players: Vec<GamePlayerDto>,
    pub game_debts: Vec<GameDebtDto>,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayerDto {
    pub player_name: String,
    pub buy_in: Decimal,
    pub cash_out: Decimal,
    pub profit_loss: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDebtDto {
    pub debtor: String,
    pub creditor: String,
    pub amount: Decimal,
    pub payment_type: String,
}
