//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to the active screen
//!
//! # Users
//! GET  /users                  - Users screen
//! POST /users                  - Switch to the users tab
//! POST /users/new              - Open an empty user draft
//! POST /users/{id}/edit        - Open a copy of a user
//! POST /users/{id}/delete      - Delete a user
//!
//! # Roles
//! GET  /roles                  - Roles screen
//! POST /roles                  - Switch to the roles tab
//! POST /roles/new              - Open an empty role draft
//! POST /roles/{id}/edit        - Open a copy of a role
//! POST /roles/{id}/delete      - Delete a role
//!
//! # Draft
//! POST /draft                  - Write form fields and save
//! POST /draft/cancel           - Discard the draft
//!
//! # API (JSON)
//! GET  /api/users              - Users
//! GET  /api/roles              - Roles
//! GET  /api/console            - Console snapshot
//! POST /api/intents            - Apply one intent
//! POST /api/intents/batch      - Apply intents all-or-nothing
//! ```

pub mod api;
pub mod draft;
pub mod roles;
pub mod users;

use askama::Template;
use axum::{
    Router,
    extract::State,
    response::{Html, Redirect},
    routing::get,
};
use roster_core::{ConsoleSnapshot, Tab};

use crate::{error::AppError, state::AppState};

/// Navigation state for the layout.
#[derive(Debug, Clone, Copy)]
pub struct NavView {
    pub users_active: bool,
    pub roles_active: bool,
}

impl From<Tab> for NavView {
    fn from(tab: Tab) -> Self {
        Self {
            users_active: tab == Tab::Users,
            roles_active: tab == Tab::Roles,
        }
    }
}

/// Build the full route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .merge(users::router())
        .merge(roles::router())
        .merge(draft::router())
        .merge(api::router())
}

/// Redirect to whichever screen the console is showing.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
pub async fn root(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let snapshot = state.console().snapshot().await?;
    Ok(Redirect::to(snapshot.tab.path()))
}

/// Render the screen for the console's active tab, with an optional message.
pub fn render_screen(snapshot: &ConsoleSnapshot, error: Option<String>) -> Html<String> {
    match snapshot.tab {
        Tab::Users => render(&users::page(snapshot, error)),
        Tab::Roles => render(&roles::page(snapshot, error)),
    }
}

/// Render a template, logging failures.
pub fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
