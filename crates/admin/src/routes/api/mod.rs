//! API route handlers for admin.
//!
//! JSON endpoints over the console. Intents posted here go through the same
//! console task as the HTML screens.

pub mod console;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(console::router())
}
