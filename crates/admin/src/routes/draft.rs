//! Draft form submission handlers.

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::post,
};
use roster_core::{ConsoleError, DraftKind, Effect, FieldValue, Intent};
use tracing::instrument;

use crate::{error::AppError, state::AppState};

use super::render_screen;

/// Build the draft router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/draft", post(submit))
        .route("/draft/cancel", post(cancel))
}

/// Decoded body of a draft form post.
///
/// The body is read as raw pairs so repeated `roles` keys survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSubmission {
    pub kind: DraftKind,
    pub fields: Vec<(String, FieldValue)>,
}

impl DraftSubmission {
    /// Decode urlencoded pairs.
    ///
    /// Keys other than the draft fields (the submit button, for one) are
    /// ignored. A user form without `roles` clears the role list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] for a missing or unknown `kind`, or a
    /// role form without `permissions`.
    pub fn parse(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        let mut kind = None;
        let mut fields = Vec::new();
        let mut roles: Option<Vec<String>> = None;

        for (key, value) in pairs {
            match key.as_str() {
                "kind" => kind = Some(parse_kind(&value)?),
                "roles" => roles.get_or_insert_with(Vec::new).push(value),
                "name" | "email" | "status" | "permissions" => {
                    fields.push((key, FieldValue::Text(value)));
                }
                _ => {}
            }
        }

        let kind = kind.ok_or_else(|| AppError::BadRequest("missing form kind".to_string()))?;

        match kind {
            DraftKind::User => {
                fields.push(("roles".to_string(), FieldValue::List(roles.unwrap_or_default())));
            }
            DraftKind::Role => {
                if !fields.iter().any(|(key, _)| key == "permissions") {
                    return Err(AppError::BadRequest(
                        "role form is missing permissions".to_string(),
                    ));
                }
                if let Some(roles) = roles {
                    fields.push(("roles".to_string(), FieldValue::List(roles)));
                }
            }
        }

        Ok(Self { kind, fields })
    }

}

fn parse_kind(value: &str) -> Result<DraftKind, AppError> {
    match value {
        "user" => Ok(DraftKind::User),
        "role" => Ok(DraftKind::Role),
        other => Err(AppError::BadRequest(format!("unknown form kind '{other}'"))),
    }
}

/// Write the submitted fields into the draft and save it.
///
/// The console runs the field updates and the save as a single command.
/// A rejected update or save re-renders the screen with the message and
/// status 422.
///
/// # Errors
///
/// Returns 400 for a malformed body, 409 when no draft is open or the open
/// draft is not the kind the form was rendered for.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let DraftSubmission { kind, fields } = DraftSubmission::parse(pairs)?;
    let console = state.console();

    match console.submit(kind, fields).await {
        Ok(effect) => {
            match effect {
                Effect::UserSaved { id, created } => {
                    tracing::info!(user_id = %id, created, "User saved");
                }
                Effect::RoleSaved { id, created } => {
                    tracing::info!(role_id = %id, created, "Role saved");
                }
                _ => {}
            }
            Ok(Redirect::to(kind.tab().path()).into_response())
        }
        Err(AppError::Console(ConsoleError::Validation(e))) => {
            let snapshot = console.snapshot().await?;
            let page = render_screen(&snapshot, Some(e.to_string()));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Discard the draft. Cancelling with nothing open is a no-op.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
#[instrument(skip_all)]
pub async fn cancel(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.console().apply(Intent::CancelDraft).await?;
    let snapshot = state.console().snapshot().await?;
    Ok(Redirect::to(snapshot.tab.path()))
}
