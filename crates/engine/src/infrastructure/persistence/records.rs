//! Stored document shapes.
//!
//! Field names are the persisted wire names. Missing fields fall back to defaults so older
//! documents still load; derived values (`totalCashOnTable`, a player's `profitLoss`) are
//! written for readers of the raw documents but ignored on load.

use chrono::{DateTime, Utc};
use pokerledger_domain::{
    Email, FavPlayer, Game, GameDebt, GameId, GameLabel, GamePlayer, GlobalStats, Money,
    PaymentType, PlayerName, User, UserId, UserRole, UserStatistics, Username,
    GLOBAL_STATS_ID,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::infrastructure::ports::{Document, RepoError};

pub(crate) fn to_document<T: Serialize>(record: &T) -> Result<Document, RepoError> {
    match serde_json::to_value(record).map_err(RepoError::serialization)? {
        Value::Object(map) => Ok(map),
        other => Err(RepoError::serialization(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

pub(crate) fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, RepoError> {
    serde_json::from_value(Value::Object(doc)).map_err(RepoError::serialization)
}

fn corrupt(err: impl ToString) -> RepoError {
    RepoError::serialization(format!("stored document is invalid: {}", err.to_string()))
}

// =============================================================================
// Games
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GamePlayerRecord {
    pub player_name: String,
    pub buy_in: Decimal,
    #[serde(default)]
    pub cash_out: Decimal,
    #[serde(default)]
    pub profit_loss: Decimal,
}

fn default_payment_type() -> String {
    PaymentType::DEFAULT.to_string()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GameDebtRecord {
    pub debtor: String,
    pub creditor: String,
    pub amount: Decimal,
    #[serde(default = "default_payment_type")]
    pub payment_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GameRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "userGameID")]
    pub user_game_id: u32,
    #[serde(rename = "type")]
    pub game_type: String,
    #[serde(default)]
    pub program_run_time: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub resolved_string: String,
    #[serde(default)]
    pub game_string: String,
    #[serde(default)]
    pub game_user_note: String,
    #[serde(default)]
    pub total_cash_on_table: Decimal,
    #[serde(default)]
    pub game_players: Vec<GamePlayerRecord>,
    #[serde(default)]
    pub game_debts: Vec<GameDebtRecord>,
    /// Absent on documents written before optimistic concurrency existed.
    #[serde(default)]
    pub revision: u64,
}

impl GameRecord {
    /// Snapshot `game` as it should be stored under `revision`.
    pub fn from_game(game: &Game, revision: u64) -> Self {
        Self {
            id: game.id().to_string(),
            user_id: game.owner_id().to_string(),
            user_game_id: game.user_game_id(),
            game_type: game.game_type().to_string(),
            program_run_time: game.created_at(),
            location: game.location().to_string(),
            resolved: game.is_resolved(),
            resolved_string: game.resolved_string().to_string(),
            game_string: game.game_string().to_string(),
            game_user_note: game.user_note().to_string(),
            total_cash_on_table: game.total_cash_on_table().amount(),
            game_players: game
                .players()
                .iter()
                .map(|p| GamePlayerRecord {
                    player_name: p.name().to_string(),
                    buy_in: p.buy_in().amount(),
                    cash_out: p.cash_out().amount(),
                    profit_loss: p.profit_loss(),
                })
                .collect(),
            game_debts: game
                .debts()
                .iter()
                .map(|d| GameDebtRecord {
                    debtor: d.debtor().to_string(),
                    creditor: d.creditor().to_string(),
                    amount: d.amount().amount(),
                    payment_type: d.payment_type().to_string(),
                })
                .collect(),
            revision,
        }
    }
}

impl TryFrom<GamePlayerRecord> for GamePlayer {
    type Error = RepoError;

    fn try_from(record: GamePlayerRecord) -> Result<Self, Self::Error> {
        let name = PlayerName::new(record.player_name).map_err(corrupt)?;
        let buy_in = Money::new(record.buy_in).map_err(corrupt)?;
        let cash_out = Money::new(record.cash_out).map_err(corrupt)?;
        Ok(GamePlayer::new(name, buy_in).with_cash_out(cash_out))
    }
}

impl TryFrom<GameDebtRecord> for GameDebt {
    type Error = RepoError;

    fn try_from(record: GameDebtRecord) -> Result<Self, Self::Error> {
        GameDebt::new(
            PlayerName::new(record.debtor).map_err(corrupt)?,
            PlayerName::new(record.creditor).map_err(corrupt)?,
            Money::new(record.amount).map_err(corrupt)?,
            PaymentType::new(record.payment_type).map_err(corrupt)?,
        )
        .map_err(corrupt)
    }
}

impl TryFrom<GameRecord> for Game {
    type Error = RepoError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let players = record
            .game_players
            .into_iter()
            .map(GamePlayer::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let debts = record
            .game_debts
            .into_iter()
            .map(GameDebt::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let game = Game::new(
            GameId::new(record.id).map_err(corrupt)?,
            UserId::new(record.user_id).map_err(corrupt)?,
            record.user_game_id,
            GameLabel::new(record.game_type).map_err(corrupt)?,
            GameLabel::new(record.location).map_err(corrupt)?,
            record.program_run_time,
        )
        .map_err(corrupt)?
        .with_user_note(record.game_user_note)
        .with_game_string(record.game_string)
        .with_resolution(record.resolved, record.resolved_string)
        .with_players(players)
        .with_debts(debts)
        .with_revision(record.revision);
        Ok(game)
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FavPlayerRecord {
    pub player_name: String,
    pub phone: String,
    pub email: String,
    pub group: String,
    #[serde(default)]
    pub profit_loss: Decimal,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

fn default_role() -> String {
    UserRole::User.as_str().to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub hash_password: String,
    pub username: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
    #[serde(rename = "userStatistics", default)]
    pub user_statistics: UserStatistics,
    #[serde(rename = "favPlayers", default)]
    pub fav_players: Vec<FavPlayerRecord>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            hash_password: user.password_hash().to_string(),
            username: user.username().to_string(),
            role: user.role().as_str().to_string(),
            created_at: user.created_at(),
            is_deleted: user.is_deleted(),
            user_statistics: user.statistics().clone(),
            fav_players: user
                .fav_players()
                .iter()
                .map(|p| FavPlayerRecord {
                    player_name: p.name().to_string(),
                    phone: p.phone().to_string(),
                    email: p.email().to_string(),
                    group: p.group().to_string(),
                    profit_loss: p.profit_loss(),
                    created: p.created(),
                    updated: p.updated(),
                })
                .collect(),
        }
    }
}

impl TryFrom<FavPlayerRecord> for FavPlayer {
    type Error = RepoError;

    fn try_from(record: FavPlayerRecord) -> Result<Self, Self::Error> {
        let player = FavPlayer::new(
            PlayerName::new(record.player_name).map_err(corrupt)?,
            record.phone,
            Email::new(record.email).map_err(corrupt)?,
            record.group,
            record.created,
        )
        .map_err(corrupt)?;
        Ok(player.with_history(record.profit_loss, record.created, record.updated))
    }
}

impl TryFrom<UserRecord> for User {
    type Error = RepoError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let fav_players = record
            .fav_players
            .into_iter()
            .map(FavPlayer::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let user = User::new(
            UserId::new(record.id).map_err(corrupt)?,
            Email::new(record.email).map_err(corrupt)?,
            record.hash_password,
            Username::new(record.username).map_err(corrupt)?,
            record.created_at,
        )
        .with_role(record.role.parse().map_err(corrupt)?)
        .with_deleted(record.is_deleted)
        .with_statistics(record.user_statistics)
        .with_fav_players(fav_players);
        Ok(user)
    }
}

// =============================================================================
// Global statistics
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GlobalStatsRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub total_games_recorded: u64,
    #[serde(default)]
    pub total_problems_solved: u64,
    #[serde(default)]
    pub total_users: u64,
}

impl From<&GlobalStats> for GlobalStatsRecord {
    fn from(stats: &GlobalStats) -> Self {
        Self {
            id: GLOBAL_STATS_ID.to_string(),
            total_games_recorded: stats.total_games_recorded,
            total_problems_solved: stats.total_problems_solved,
            total_users: stats.total_users,
        }
    }
}

impl From<GlobalStatsRecord> for GlobalStats {
    fn from(record: GlobalStatsRecord) -> Self {
        Self {
            total_games_recorded: record.total_games_recorded,
            total_problems_solved: record.total_problems_solved,
            total_users: record.total_users,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test documents are objects"),
        }
    }

    #[test]
    fn legacy_game_document_loads_with_defaults() {
        let stored = doc(json!({
            "_id": "g1",
            "userID": "u1",
            "userGameID": 3,
            "type": "Texas Holdem",
            "location": "Tel Aviv",
            "totalCashOnTable": 999,
            "gamePlayers": [
                { "playerName": "Alice", "buyIn": 100, "cashOut": 150, "profitLoss": 7 }
            ],
            "gameDebts": [
                { "debtor": "Bob", "creditor": "Alice", "amount": 50 }
            ]
        }));

        let record: GameRecord = from_document(stored).unwrap();
        let game = Game::try_from(record).unwrap();

        assert_eq!(game.revision(), 0);
        assert!(!game.is_resolved());
        // Derived values come from the ledger, not from the stored copies.
        assert_eq!(game.total_cash_on_table(), Money::from_units(100));
        assert_eq!(game.players()[0].profit_loss(), Decimal::from(50));
        assert_eq!(game.debts()[0].payment_type().as_str(), "BIT");
    }

    #[test]
    fn game_record_writes_derived_fields() {
        let game = Game::new(
            GameId::new("g1").unwrap(),
            UserId::new("u1").unwrap(),
            1,
            GameLabel::new("Omaha").unwrap(),
            GameLabel::new("Haifa").unwrap(),
            Utc::now(),
        )
        .unwrap()
        .with_players(vec![GamePlayer::new(
            PlayerName::new("Alice").unwrap(),
            Money::from_units(80),
        )]);

        let stored = to_document(&GameRecord::from_game(&game, 4)).unwrap();
        assert_eq!(stored["totalCashOnTable"], json!(80.0));
        assert_eq!(stored["gamePlayers"][0]["profitLoss"], json!(-80.0));
        assert_eq!(stored["revision"], json!(4));
        assert_eq!(stored["userGameID"], json!(1));
    }

    #[test]
    fn corrupt_game_is_a_serialization_error() {
        let stored = doc(json!({
            "_id": "g1",
            "userID": "u1",
            "userGameID": 0,
            "type": "Omaha",
            "location": "Haifa"
        }));
        let record: GameRecord = from_document(stored).unwrap();
        assert!(matches!(
            Game::try_from(record),
            Err(RepoError::Serialization(_))
        ));
    }

    #[test]
    fn user_record_keeps_persisted_names() {
        let user = User::new(
            UserId::new("u1").unwrap(),
            Email::new("a@b.com").unwrap(),
            "$argon2id$hash",
            Username::new("alice").unwrap(),
            Utc::now(),
        );
        let stored = to_document(&UserRecord::from(&user)).unwrap();
        for key in ["_id", "hash_password", "created_at", "isDeleted", "userStatistics", "favPlayers"] {
            assert!(stored.contains_key(key), "missing {key}");
        }
        assert_eq!(stored["role"], json!("user"));

        let back = User::try_from(from_document::<UserRecord>(stored).unwrap()).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let record: GlobalStatsRecord =
            from_document(doc(json!({ "_id": "Global", "totalUsers": 4 }))).unwrap();
        let stats = GlobalStats::from(record);
        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.total_games_recorded, 0);
    }
}
