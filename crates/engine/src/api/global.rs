//! `/api/v1/global` handlers.
//!
//! Reading is open to any authenticated caller; every write is admin-only.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use pokerledger_shared::{ApiResponse, GlobalStatsDto, IncrementStatRequest, ReplaceStatsRequest};

use super::convert;
use super::error::ApiError;
use crate::app::App;
use crate::use_cases::Principal;

type StatsResponse = Result<Json<ApiResponse<GlobalStatsDto>>, ApiError>;

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(get_stats).put(replace_stats))
        .route("/increment/{field}", put(increment_stat))
        .route("/reset", put(reset_stats))
}

fn require_admin(principal: &Principal) -> Result<(), ApiError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admin access required".into()))
    }
}

async fn get_stats(State(app): State<Arc<App>>, _principal: Principal) -> StatsResponse {
    let stats = app.use_cases.stats.get().await?;
    Ok(Json(ApiResponse::new(
        "Global statistics retrieved successfully",
        convert::stats_dto(stats),
    )))
}

async fn replace_stats(
    State(app): State<Arc<App>>,
    principal: Principal,
    body: Result<Json<ReplaceStatsRequest>, JsonRejection>,
) -> StatsResponse {
    require_admin(&principal)?;
    let Json(req) = body?;
    let stats = app
        .use_cases
        .stats
        .replace(
            req.id.as_deref(),
            req.total_games_recorded,
            req.total_problems_solved,
            req.total_users,
        )
        .await?;
    tracing::info!(admin = %principal.id, "Global statistics replaced");
    Ok(Json(ApiResponse::new(
        "Global statistics updated successfully",
        convert::stats_dto(stats),
    )))
}

async fn increment_stat(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(field): Path<String>,
    body: Option<Json<IncrementStatRequest>>,
) -> StatsResponse {
    require_admin(&principal)?;
    let delta = body.map(|Json(req)| req.delta()).unwrap_or(1);
    let stats = app.use_cases.stats.increment_field(&field, delta).await?;
    let verb = if delta >= 0 { "incremented" } else { "decremented" };
    Ok(Json(ApiResponse::new(
        format!("{} {} by {}", field, verb, delta.unsigned_abs()),
        convert::stats_dto(stats),
    )))
}

async fn reset_stats(State(app): State<Arc<App>>, principal: Principal) -> StatsResponse {
    require_admin(&principal)?;
    let stats = app.use_cases.stats.reset().await?;
    tracing::info!(admin = %principal.id, "Global statistics reset");
    Ok(Json(ApiResponse::new(
        "Global statistics reset successfully",
        convert::stats_dto(stats),
    )))
}
