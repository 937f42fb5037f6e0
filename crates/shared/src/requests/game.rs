use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /games`.
///
/// `userID` may be omitted; the authenticated caller then owns the game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateGameRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
    #[serde(rename = "userGameID")]
    pub user_game_id: Option<i64>,
    #[serde(rename = "type")]
    pub game_type: Option<String>,
    pub location: Option<String>,
    pub game_user_note: Option<String>,
    pub game_string: Option<String>,
    pub game_players: Option<Vec<PlayerInput>>,
    pub game_debts: Option<Vec<DebtInput>>,
}

/// A player as supplied by a client. Also the body of `POST /games/player/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerInput {
    pub player_name: Option<String>,
    pub buy_in: Option<Decimal>,
    pub cash_out: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerChanges {
    pub player_name: Option<String>,
    pub buy_in: Option<Decimal>,
    pub cash_out: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePlayerRequest {
    pub player_name: Option<String>,
    pub updates: Option<PlayerChanges>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemovePlayerRequest {
    pub player_name: Option<String>,
}

/// A debt as supplied by a client. Also the body of `POST /games/debt/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebtInput {
    pub debtor: Option<String>,
    pub creditor: Option<String>,
    pub amount: Option<Decimal>,
    pub payment_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DebtChanges {
    pub amount: Option<Decimal>,
    pub payment_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateDebtRequest {
    pub debtor: Option<String>,
    pub creditor: Option<String>,
    pub updates: Option<DebtChanges>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoveDebtRequest {
    pub debtor: Option<String>,
    pub creditor: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveGameRequest {
    pub resolved_string: Option<String>,
}

/// Body of `PUT /games/{id}`. Identity and derived fields are not updatable and are
/// ignored if sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateGameRequest {
    #[serde(rename = "type")]
    pub game_type: Option<String>,
    pub location: Option<String>,
    pub game_user_note: Option<String>,
    pub game_string: Option<String>,
    pub resolved: Option<bool>,
    pub resolved_string: Option<String>,
    pub game_players: Option<Vec<PlayerInput>>,
    pub game_debts: Option<Vec<DebtInput>>,
}
