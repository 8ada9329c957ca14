use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::AppError,
    routes::diagnostics::DIAGNOSTIC_MESSAGE,
    state::AppState,
    users::{dto::UpdateUserRequest, repo_types::User},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create_table", get(create_table))
        .route("/user/create", post(create_user))
        .route("/user/get/:id", get(get_user))
        .route("/user/update/:id", put(update_user))
        .route("/user/delete/:id", delete(delete_user))
}

/// GET /create_table: drops and recreates the users table.
#[instrument(skip(state))]
pub async fn create_table(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.users.bootstrap_schema().await?;
    warn!("users table recreated, previous rows dropped");
    Ok(DIAGNOSTIC_MESSAGE)
}

#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<(StatusCode, Json<u64>), AppError> {
    let Json(user) = payload?;
    let affected = state.users.create(&user).await?;
    info!(user_id = user.id, affected, "user created");
    Ok((StatusCode::CREATED, Json(affected)))
}

#[instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Path(id) = id?;
    let user = state.users.get_by_id(id).await?;
    Ok(Json(user))
}

#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<u64>, AppError> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let affected = state
        .users
        .update_by_id(id, &body.email, &body.password)
        .await?;
    info!(user_id = id, affected, "user updated");
    Ok(Json(affected))
}

#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<u64>, AppError> {
    let Path(id) = id?;
    let affected = state.users.delete_by_id(id).await?;
    info!(user_id = id, affected, "user deleted");
    Ok(Json(affected))
}
