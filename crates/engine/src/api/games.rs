//! `/api/v1/games` handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use pokerledger_domain::{Game, GameId, PlayerName, UserId};
use pokerledger_shared::{
    ApiResponse, CreateGameRequest, DebtInput, GameDto, PlayerInput, RemoveDebtRequest,
    RemovePlayerRequest, ResolveGameRequest, UpdateDebtRequest, UpdateGameRequest,
    UpdatePlayerRequest,
};

use super::convert::{self, required};
use super::error::ApiError;
use crate::app::App;
use crate::use_cases::Principal;

type GameResponse = Result<Json<ApiResponse<GameDto>>, ApiError>;

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(list_games).post(create_game))
        .route("/{id}", get(get_game).put(update_game).delete(delete_game))
        .route("/user/{user_id}", get(list_games_for_user))
        .route(
            "/player/{id}",
            post(add_player).put(update_player).delete(remove_player),
        )
        .route(
            "/debt/{id}",
            post(add_debt).put(update_debt).delete(remove_debt),
        )
        .route("/resolve/{id}", put(resolve_game))
}

fn game_id(raw: String) -> Result<GameId, ApiError> {
    Ok(GameId::new(raw)?)
}

fn respond(message: &str, game: &Game) -> GameResponse {
    Ok(Json(ApiResponse::new(message, convert::game_dto(game))))
}

// =============================================================================
// Queries
// =============================================================================

async fn list_games(
    State(app): State<Arc<App>>,
    principal: Principal,
) -> Result<Json<ApiResponse<Vec<GameDto>>>, ApiError> {
    let games = app.use_cases.games.query.list_visible(&principal).await?;
    Ok(Json(ApiResponse::new(
        "Here are the games",
        games.iter().map(convert::game_dto).collect(),
    )))
}

async fn get_game(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
) -> GameResponse {
    let id = game_id(id)?;
    let game = app.use_cases.games.query.get(&principal, &id).await?;
    respond(&format!("Here is game with ID {}", id), &game)
}

async fn list_games_for_user(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<GameDto>>>, ApiError> {
    let owner = UserId::new(user_id)?;
    let games = app
        .use_cases
        .games
        .query
        .list_by_owner(&principal, &owner)
        .await?;
    Ok(Json(ApiResponse::new(
        format!("Here are games for user {}", owner),
        games.iter().map(convert::game_dto).collect(),
    )))
}

// =============================================================================
// Create / update / resolve / delete
// =============================================================================

async fn create_game(
    State(app): State<Arc<App>>,
    principal: Principal,
    body: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<GameDto>>), ApiError> {
    let Json(req) = body?;
    let input = convert::new_game(req)?;
    let game = app.use_cases.games.create.execute(&principal, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Game created successfully!",
            convert::game_dto(&game),
        )),
    ))
}

async fn update_game(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<UpdateGameRequest>, JsonRejection>,
) -> GameResponse {
    let Json(req) = body?;
    let id = game_id(id)?;
    let changes = convert::game_changes(req)?;
    let game = app
        .use_cases
        .games
        .update
        .execute(&principal, &id, changes)
        .await?;
    respond("Game updated successfully!", &game)
}

async fn resolve_game(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<ResolveGameRequest>, JsonRejection>,
) -> GameResponse {
    let Json(req) = body?;
    let id = game_id(id)?;
    let narrative = required(req.resolved_string, "resolvedString")?;
    let game = app
        .use_cases
        .games
        .resolve
        .execute(&principal, &id, narrative)
        .await?;
    respond("Game resolved successfully!", &game)
}

async fn delete_game(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = game_id(id)?;
    app.use_cases.games.delete.execute(&principal, &id).await?;
    Ok(Json(ApiResponse::message("Game deleted successfully!")))
}

// =============================================================================
// Players
// =============================================================================

async fn add_player(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<PlayerInput>, JsonRejection>,
) -> GameResponse {
    let Json(req) = body?;
    let id = game_id(id)?;
    let player = convert::player(req)?;
    let game = app
        .use_cases
        .games
        .ledger
        .add_player(&principal, &id, player)
        .await?;
    respond("Player added successfully!", &game)
}

async fn update_player(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<UpdatePlayerRequest>, JsonRejection>,
) -> GameResponse {
    let Json(req) = body?;
    let id = game_id(id)?;
    let name = PlayerName::new(required(req.player_name, "playerName")?)?;
    let update = convert::player_update(required(req.updates, "updates")?)?;
    let game = app
        .use_cases
        .games
        .ledger
        .update_player(&principal, &id, &name, update)
        .await?;
    respond("Player updated successfully!", &game)
}

async fn remove_player(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<RemovePlayerRequest>, JsonRejection>,
) -> GameResponse {
    let Json(req) = body?;
    let id = game_id(id)?;
    let name = PlayerName::new(required(req.player_name, "playerName")?)?;
    let game = app
        .use_cases
        .games
        .ledger
        .remove_player(&principal, &id, &name)
        .await?;
    respond("Player removed successfully!", &game)
}

// =============================================================================
// Debts
// =============================================================================

async fn add_debt(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<DebtInput>, JsonRejection>,
) -> GameResponse {
    let Json(req) = body?;
    let id = game_id(id)?;
    let debt = convert::debt(req)?;
    let game = app
        .use_cases
        .games
        .ledger
        .add_debt(&principal, &id, debt)
        .await?;
    respond("Debt added successfully!", &game)
}

async fn update_debt(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<UpdateDebtRequest>, JsonRejection>,
) -> GameResponse {
    let Json(req) = body?;
    let id = game_id(id)?;
    let (debtor, creditor) = convert::debt_parties(req.debtor, req.creditor)?;
    let update = convert::debt_update(required(req.updates, "updates")?)?;
    let game = app
        .use_cases
        .games
        .ledger
        .update_debt(&principal, &id, &debtor, &creditor, update)
        .await?;
    respond("Debt updated successfully!", &game)
}

async fn remove_debt(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<RemoveDebtRequest>, JsonRejection>,
) -> GameResponse {
    let Json(req) = body?;
    let id = game_id(id)?;
    let (debtor, creditor) = convert::debt_parties(req.debtor, req.creditor)?;
    let game = app
        .use_cases
        .games
        .ledger
        .remove_debt(&principal, &id, &debtor, &creditor)
        .await?;
    respond("Debt removed successfully!", &game)
}
