//! Console API handlers.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use roster_core::{ConsoleSnapshot, Effect, Intent, Role, User};
use tracing::instrument;

use crate::{error::AppError, state::AppState};

/// Build the console API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/roles", get(list_roles))
        .route("/api/console", get(snapshot))
        .route("/api/intents", post(apply_intent))
        .route("/api/intents/batch", post(apply_batch))
}

/// List users in display order.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    match state.console().apply(Intent::ListUsers).await? {
        Effect::Users { users } => Ok(Json(users)),
        other => Err(unexpected(&other)),
    }
}

/// List roles in display order.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<Role>>, AppError> {
    match state.console().apply(Intent::ListRoles).await? {
        Effect::Roles { roles } => Ok(Json(roles)),
        other => Err(unexpected(&other)),
    }
}

/// Whole console state, including the open draft and orphaned role references.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
pub async fn snapshot(State(state): State<AppState>) -> Result<Json<ConsoleSnapshot>, AppError> {
    Ok(Json(state.console().snapshot().await?))
}

/// Apply one intent.
///
/// # Errors
///
/// Returns the console's rejection mapped to an HTTP status.
#[instrument(skip_all, fields(intent = intent.name()))]
pub async fn apply_intent(
    State(state): State<AppState>,
    Json(intent): Json<Intent>,
) -> Result<Json<Effect>, AppError> {
    Ok(Json(state.console().apply(intent).await?))
}

/// Apply a list of intents as one unit.
///
/// # Errors
///
/// Returns the first rejection. Nothing from the batch is applied in that case.
#[instrument(skip_all, fields(count = intents.len()))]
pub async fn apply_batch(
    State(state): State<AppState>,
    Json(intents): Json<Vec<Intent>>,
) -> Result<Json<Vec<Effect>>, AppError> {
    if intents.is_empty() {
        return Err(AppError::BadRequest("batch is empty".to_string()));
    }
    Ok(Json(state.console().apply_all(intents).await?))
}

fn unexpected(effect: &Effect) -> AppError {
    AppError::Internal(format!("unexpected console effect: {effect:?}"))
}
