//! `/api/v1/users` handlers.
//!
//! Sign-up and login are public; everything else needs a principal.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use pokerledger_domain::{Email, PlayerName, UserId, Username};
use pokerledger_shared::{
    AddFavPlayerRequest, AdminUpdateUserRequest, ApiResponse, CreateUserRequest, LoginRequest,
    PrincipalDto, RemoveFavPlayerRequest, UpdateEmailRequest, UpdateFavPlayerRequest,
    UpdatePasswordRequest, UpdateUsernameRequest, UserDto,
};

use super::convert::{self, required};
use super::error::ApiError;
use crate::app::App;
use crate::use_cases::Principal;

type UserResponse = Result<Json<ApiResponse<UserDto>>, ApiError>;

pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/login", post(login))
        .route("/{id}", get(get_user).put(admin_update_user))
        .route("/email/{id}", put(update_email))
        .route("/password/{id}", put(update_password))
        .route("/username/{id}", put(update_username))
        .route("/physical/{id}", delete(delete_user_physically))
        .route("/logical/{id}", delete(delete_user_logically))
        .route(
            "/favPlayer/{id}",
            post(add_fav_player)
                .put(update_fav_player)
                .delete(remove_fav_player),
        )
}

fn user_id(raw: String) -> Result<UserId, ApiError> {
    Ok(UserId::new(raw)?)
}

// =============================================================================
// Accounts
// =============================================================================

async fn create_user(
    State(app): State<Arc<App>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let Json(req) = body?;
    let input = convert::new_user(req)?;
    let user = app.use_cases.users.create.execute(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "User added successfully!",
            convert::user_dto(&user)?,
        )),
    ))
}

async fn login(
    State(app): State<Arc<App>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PrincipalDto>>, ApiError> {
    let Json(req) = body?;
    let email = required(req.email, "email")?;
    let password = required(req.pass, "pass")?;
    let principal = app.use_cases.users.login.execute(&email, &password).await?;
    tracing::info!(user_id = %principal.id, "Login succeeded");
    Ok(Json(ApiResponse::new(
        "Login Successful!",
        convert::principal_dto(&principal, &email),
    )))
}

// =============================================================================
// Profile
// =============================================================================

async fn list_users(
    State(app): State<Arc<App>>,
    principal: Principal,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = app.use_cases.users.profile.list(&principal).await?;
    let users = users
        .iter()
        .map(convert::user_dto)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(ApiResponse::new("Here are the users", users)))
}

async fn get_user(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
) -> UserResponse {
    let id = user_id(id)?;
    let user = app.use_cases.users.profile.get(&principal, &id).await?;
    Ok(Json(ApiResponse::new(
        format!("Here is user with ID {}", id),
        convert::user_dto(&user)?,
    )))
}

async fn admin_update_user(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<AdminUpdateUserRequest>, JsonRejection>,
) -> UserResponse {
    let Json(req) = body?;
    let id = user_id(id)?;
    let update = convert::admin_update(req)?;
    let user = app
        .use_cases
        .users
        .profile
        .admin_update(&principal, &id, update)
        .await?;
    Ok(Json(ApiResponse::new(
        "User updated successfully!",
        convert::user_dto(&user)?,
    )))
}

async fn update_email(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<UpdateEmailRequest>, JsonRejection>,
) -> UserResponse {
    let Json(req) = body?;
    let id = user_id(id)?;
    let new_email = Email::new(required(req.new_email, "newEmail")?)?;
    let old_email = Email::new(required(req.old_email, "oldEmail")?)?;
    let user = app
        .use_cases
        .users
        .profile
        .change_email(&principal, &id, &old_email, new_email)
        .await?;
    Ok(Json(ApiResponse::new(
        "User email updated successfully!",
        convert::user_dto(&user)?,
    )))
}

async fn update_password(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<UpdatePasswordRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Json(req) = body?;
    let id = user_id(id)?;
    let new_password = required(req.new_password, "newPassword")?;
    let old_password = required(req.old_password, "oldPassword")?;
    app.use_cases
        .users
        .profile
        .change_password(&principal, &id, &old_password, &new_password)
        .await?;
    Ok(Json(ApiResponse::message("User password updated successfully!")))
}

async fn update_username(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<UpdateUsernameRequest>, JsonRejection>,
) -> UserResponse {
    let Json(req) = body?;
    let id = user_id(id)?;
    let username = Username::new(required(req.new_username, "newUsername")?)?;
    let user = app
        .use_cases
        .users
        .profile
        .change_username(&principal, &id, username)
        .await?;
    Ok(Json(ApiResponse::new(
        "User username updated successfully!",
        convert::user_dto(&user)?,
    )))
}

// =============================================================================
// Deletion
// =============================================================================

async fn delete_user_physically(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = user_id(id)?;
    app.use_cases.users.delete.hard_delete(&principal, &id).await?;
    Ok(Json(ApiResponse::message("User physically deleted successfully!")))
}

async fn delete_user_logically(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = user_id(id)?;
    app.use_cases.users.delete.soft_delete(&principal, &id).await?;
    Ok(Json(ApiResponse::message("User logically deleted successfully!")))
}

// =============================================================================
// Favourite players
// =============================================================================

async fn add_fav_player(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<AddFavPlayerRequest>, JsonRejection>,
) -> UserResponse {
    let Json(req) = body?;
    let id = user_id(id)?;
    let input = convert::new_fav_player(req)?;
    let user = app
        .use_cases
        .users
        .favorites
        .add(&principal, &id, input)
        .await?;
    Ok(Json(ApiResponse::new(
        "Favorite Player added successfully!",
        convert::user_dto(&user)?,
    )))
}

async fn update_fav_player(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<UpdateFavPlayerRequest>, JsonRejection>,
) -> UserResponse {
    let Json(req) = body?;
    let id = user_id(id)?;
    let name = PlayerName::new(required(req.fav_player_name, "favPlayerName")?)?;
    let update = convert::fav_player_update(required(req.updates, "updates")?)?;
    let user = app
        .use_cases
        .users
        .favorites
        .update(&principal, &id, &name, update)
        .await?;
    Ok(Json(ApiResponse::new(
        "Favorite player updated successfully!",
        convert::user_dto(&user)?,
    )))
}

async fn remove_fav_player(
    State(app): State<Arc<App>>,
    principal: Principal,
    Path(id): Path<String>,
    body: Result<Json<RemoveFavPlayerRequest>, JsonRejection>,
) -> UserResponse {
    let Json(req) = body?;
    let id = user_id(id)?;
    let name = PlayerName::new(required(req.fav_player_name, "favPlayerName")?)?;
    let user = app
        .use_cases
        .users
        .favorites
        .remove(&principal, &id, &name)
        .await?;
    Ok(Json(ApiResponse::new(
        "Favorite player deleted successfully!",
        convert::user_dto(&user)?,
    )))
}
