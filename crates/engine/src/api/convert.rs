//! Conversions between wire DTOs and domain values.
//!
//! Request fields are optional on the wire; a missing required field is reported by name.

use pokerledger_domain::{
    DebtUpdate, DomainError, Email, FavPlayer, FavPlayerUpdate, Game, GameChanges, GameDebt,
    GameId, GameLabel, GamePlayer, GlobalStats, Money, PaymentType, PlayerName, PlayerUpdate,
    User, UserId, UserRole, UserStatistics, Username,
};
use pokerledger_shared::{
    AddFavPlayerRequest, AdminUpdateUserRequest, CreateGameRequest, CreateUserRequest,
    DebtChanges, DebtInput, FavPlayerChanges, FavPlayerDto, GameDebtDto, GameDto, GamePlayerDto,
    GlobalStatsDto, PlayerChanges, PlayerInput, PrincipalDto, UpdateGameRequest, UserDto,
};

use super::error::ApiError;
use crate::use_cases::games::NewGame;
use crate::use_cases::users::{AdminUserUpdate, NewFavPlayer, NewUser};
use crate::use_cases::Principal;

pub fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::Validation(format!("{} is required", field)))
}

// =============================================================================
// Games
// =============================================================================

pub fn new_game(req: CreateGameRequest) -> Result<NewGame, ApiError> {
    let id = GameId::new(required(req.id, "_id")?)?;
    let owner = req.user_id.map(UserId::new).transpose()?;
    let user_game_id = u32::try_from(required(req.user_game_id, "userGameID")?)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| DomainError::validation("userGameID must be at least 1"))?;

    let players = req
        .game_players
        .unwrap_or_default()
        .into_iter()
        .map(player)
        .collect::<Result<Vec<_>, _>>()?;
    let debts = req
        .game_debts
        .unwrap_or_default()
        .into_iter()
        .map(debt)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewGame {
        id,
        owner,
        user_game_id,
        game_type: GameLabel::new(required(req.game_type, "type")?)?,
        location: GameLabel::new(required(req.location, "location")?)?,
        user_note: req.game_user_note,
        game_string: req.game_string,
        players,
        debts,
    })
}

pub fn player(input: PlayerInput) -> Result<GamePlayer, ApiError> {
    let name = PlayerName::new(required(input.player_name, "playerName")?)?;
    let buy_in = Money::new(required(input.buy_in, "buyIn")?)?;
    let mut player = GamePlayer::new(name, buy_in);
    if let Some(cash_out) = input.cash_out {
        player = player.with_cash_out(Money::new(cash_out)?);
    }
    Ok(player)
}

pub fn player_update(changes: PlayerChanges) -> Result<PlayerUpdate, ApiError> {
    Ok(PlayerUpdate {
        name: changes.player_name.map(PlayerName::new).transpose()?,
        buy_in: changes.buy_in.map(Money::new).transpose()?,
        cash_out: changes.cash_out.map(Money::new).transpose()?,
    })
}

pub fn debt(input: DebtInput) -> Result<GameDebt, ApiError> {
    let debtor = PlayerName::new(required(input.debtor, "debtor")?)?;
    let creditor = PlayerName::new(required(input.creditor, "creditor")?)?;
    let amount = Money::new(required(input.amount, "amount")?)?;
    let payment_type = match input.payment_type {
        Some(tag) => PaymentType::new(tag)?,
        None => PaymentType::default(),
    };
    Ok(GameDebt::new(debtor, creditor, amount, payment_type)?)
}

pub fn debt_update(changes: DebtChanges) -> Result<DebtUpdate, ApiError> {
    Ok(DebtUpdate {
        amount: changes.amount.map(Money::positive).transpose()?,
        payment_type: changes.payment_type.map(PaymentType::new).transpose()?,
    })
}

pub fn debt_parties(
    debtor: Option<String>,
    creditor: Option<String>,
) -> Result<(PlayerName, PlayerName), ApiError> {
    Ok((
        PlayerName::new(required(debtor, "debtor")?)?,
        PlayerName::new(required(creditor, "creditor")?)?,
    ))
}

pub fn game_changes(req: UpdateGameRequest) -> Result<GameChanges, ApiError> {
    Ok(GameChanges {
        game_type: req.game_type.map(GameLabel::new).transpose()?,
        location: req.location.map(GameLabel::new).transpose()?,
        user_note: req.game_user_note,
        game_string: req.game_string,
        resolved: req.resolved,
        resolved_string: req.resolved_string,
        players: req
            .game_players
            .map(|list| list.into_iter().map(player).collect::<Result<Vec<_>, _>>())
            .transpose()?,
        debts: req
            .game_debts
            .map(|list| list.into_iter().map(debt).collect::<Result<Vec<_>, _>>())
            .transpose()?,
    })
}

pub fn game_dto(game: &Game) -> GameDto {
    GameDto {
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
            .map(|p| GamePlayerDto {
                player_name: p.name().to_string(),
                buy_in: p.buy_in().amount(),
                cash_out: p.cash_out().amount(),
                profit_loss: p.profit_loss(),
            })
            .collect(),
        game_debts: game
            .debts()
            .iter()
            .map(|d| GameDebtDto {
                debtor: d.debtor().to_string(),
                creditor: d.creditor().to_string(),
                amount: d.amount().amount(),
                payment_type: d.payment_type().to_string(),
            })
            .collect(),
        revision: game.revision(),
    }
}

// =============================================================================
// Users
// =============================================================================

pub fn new_user(req: CreateUserRequest) -> Result<NewUser, ApiError> {
    Ok(NewUser {
        id: UserId::new(required(req.id, "id")?)?,
        email: Email::new(required(req.email, "email")?)?,
        password: required(req.pass, "pass")?,
        username: Username::new(required(req.username, "username")?)?,
    })
}

pub fn admin_update(req: AdminUpdateUserRequest) -> Result<AdminUserUpdate, ApiError> {
    let statistics = req
        .user_statistics
        .map(serde_json::from_value::<UserStatistics>)
        .transpose()
        .map_err(|e| ApiError::Validation(format!("Invalid userStatistics: {}", e)))?;

    Ok(AdminUserUpdate {
        username: Username::new(required(req.username, "username")?)?,
        email: Email::new(required(req.email, "email")?)?,
        role: required(req.role, "role")?.parse::<UserRole>()?,
        statistics,
    })
}

pub fn new_fav_player(req: AddFavPlayerRequest) -> Result<NewFavPlayer, ApiError> {
    Ok(NewFavPlayer {
        name: PlayerName::new(required(req.player_name, "playerName")?)?,
        phone: required(req.phone, "phone")?,
        email: Email::new(required(req.email, "email")?)?,
        group: required(req.group, "group")?,
    })
}

pub fn fav_player_update(changes: FavPlayerChanges) -> Result<FavPlayerUpdate, ApiError> {
    Ok(FavPlayerUpdate {
        phone: changes.phone,
        email: changes.email.map(Email::new).transpose()?,
        group: changes.group,
        profit_loss: changes.profit_loss,
    })
}

pub fn user_dto(user: &User) -> Result<UserDto, ApiError> {
    let user_statistics = serde_json::to_value(user.statistics())
        .map_err(|e| ApiError::Internal(format!("Failed to encode user statistics: {}", e)))?;

    Ok(UserDto {
        id: user.id().to_string(),
        email: user.email().to_string(),
        username: user.username().to_string(),
        role: user.role().to_string(),
        created_at: user.created_at(),
        is_deleted: user.is_deleted(),
        user_statistics,
        fav_players: user.fav_players().iter().map(fav_player_dto).collect(),
    })
}

fn fav_player_dto(player: &FavPlayer) -> FavPlayerDto {
    FavPlayerDto {
        player_name: player.name().to_string(),
        phone: player.phone().to_string(),
        email: player.email().to_string(),
        group: player.group().to_string(),
        profit_loss: player.profit_loss(),
        created: player.created(),
        updated: player.updated(),
    }
}

pub fn principal_dto(principal: &Principal, email: &str) -> PrincipalDto {
    PrincipalDto {
        id: principal.id.to_string(),
        email: email.trim().to_lowercase(),
        role: principal.role.to_string(),
    }
}

pub fn stats_dto(stats: GlobalStats) -> GlobalStatsDto {
    GlobalStatsDto {
        total_games_recorded: stats.total_games_recorded,
        total_problems_solved: stats.total_problems_solved,
        total_users: stats.total_users,
    }
}
