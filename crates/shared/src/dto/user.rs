use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user as returned to clients. The password hash never leaves the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: String,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub user_statistics: serde_json::Value,
    pub fav_players: Vec<FavPlayerDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavPlayerDto {
    pub player_name: String,
    pub phone: String,
    pub email: String,
    pub group: String,
    pub profit_loss: Decimal,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Identity returned by a successful login, for the upstream identity collaborator to sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub role: String,
}
