//! HTTP routes.

use std::sync::Arc;

use axum::{routing::get, Router};

use super::{games, global, users};
use crate::app::App;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .nest("/api/v1/games", games::routes())
        .nest("/api/v1/users", users::routes())
        .nest("/api/v1/global", global::routes())
}

async fn health() -> &'static str {
    "OK"
}
