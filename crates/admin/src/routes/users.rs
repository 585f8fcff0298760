//! Users screen route handlers.

use std::collections::HashSet;

use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use roster_core::{ConsoleSnapshot, Draft, Effect, Intent, Tab, User, UserId, UserStatus};
use tracing::instrument;

use crate::{
    components::{DataTableConfig, users_table_config},
    error::AppError,
    filters,
    state::AppState,
};

use super::{NavView, render};

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(index).post(switch))
        .route("/users/new", post(begin_add))
        .route("/users/{id}/edit", post(begin_edit))
        .route("/users/{id}/delete", post(delete))
}

// =============================================================================
// Views
// =============================================================================

/// Role name shown on a user row.
#[derive(Debug, Clone)]
pub struct RoleTag {
    pub name: String,
    /// No role with this name exists.
    pub orphaned: bool,
}

/// User table row.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub roles: Vec<RoleTag>,
    pub status: String,
    pub editing: bool,
}

impl UserRow {
    fn new(user: &User, known_roles: &HashSet<&str>, editing: Option<UserId>) -> Self {
        Self {
            id: user.id.map(|id| id.to_string()).unwrap_or_default(),
            name: user.name.clone(),
            email: user.email.clone(),
            roles: user
                .roles
                .iter()
                .map(|name| RoleTag {
                    name: name.clone(),
                    orphaned: !known_roles.contains(name.as_str()),
                })
                .collect(),
            status: user.status.to_string(),
            editing: user.id.is_some() && user.id == editing,
        }
    }
}

/// Choice in the roles multi-select.
#[derive(Debug, Clone)]
pub struct RoleOption {
    pub name: String,
    pub selected: bool,
    pub orphaned: bool,
}

/// Open user form.
#[derive(Debug, Clone)]
pub struct UserFormView {
    pub title: String,
    pub submit_label: &'static str,
    pub name: String,
    pub email: String,
    pub status_active: bool,
    pub role_options: Vec<RoleOption>,
}

impl UserFormView {
    /// Build the form from a user draft and the current role names.
    ///
    /// Roles the draft holds that no longer exist stay selectable so saving
    /// does not silently drop them.
    #[must_use]
    pub fn new(user: &User, role_names: &[String]) -> Self {
        let mut role_options: Vec<RoleOption> = role_names
            .iter()
            .map(|name| RoleOption {
                name: name.clone(),
                selected: user.roles.contains(name),
                orphaned: false,
            })
            .collect();
        role_options.extend(
            user.roles
                .iter()
                .filter(|name| !role_names.contains(name))
                .map(|name| RoleOption {
                    name: name.clone(),
                    selected: true,
                    orphaned: true,
                }),
        );

        let (title, submit_label) = match user.id {
            Some(id) => (format!("Edit user #{id}"), "Save changes"),
            None => ("New user".to_string(), "Create user"),
        };

        Self {
            title,
            submit_label,
            name: user.name.clone(),
            email: user.email.clone(),
            status_active: user.status == UserStatus::Active,
            role_options,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Users screen template.
#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub nav: NavView,
    pub table_config: DataTableConfig,
    pub users: Vec<UserRow>,
    pub form: Option<UserFormView>,
    pub orphaned_count: usize,
    pub error: Option<String>,
}

/// Build the users screen from a snapshot.
#[must_use]
pub fn page(snapshot: &ConsoleSnapshot, error: Option<String>) -> UsersIndexTemplate {
    let known_roles: HashSet<&str> = snapshot.roles.iter().map(|r| r.name.as_str()).collect();
    let role_names: Vec<String> = snapshot.roles.iter().map(|r| r.name.clone()).collect();

    let draft = match &snapshot.draft {
        Some(Draft::User(user)) => Some(user),
        _ => None,
    };
    let editing = draft.and_then(|user| user.id);

    UsersIndexTemplate {
        nav: NavView::from(Tab::Users),
        table_config: users_table_config(),
        users: snapshot
            .users
            .iter()
            .map(|user| UserRow::new(user, &known_roles, editing))
            .collect(),
        form: draft.map(|user| UserFormView::new(user, &role_names)),
        orphaned_count: snapshot.orphaned_roles.len(),
        error,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Users screen. Read-only: the active tab and any open draft are left alone.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.console().snapshot().await?;
    Ok(render(&page(&snapshot, None)))
}

/// Make users the active tab, discarding a draft from the other screen.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
#[instrument(skip(state))]
pub async fn switch(State(state): State<AppState>) -> Result<Redirect, AppError> {
    if let Effect::TabSwitched { discarded_draft: true, .. } = state
        .console()
        .apply(Intent::SwitchTab { tab: Tab::Users })
        .await?
    {
        tracing::info!("Open draft discarded by tab switch");
    }
    Ok(Redirect::to(Tab::Users.path()))
}

/// Open an empty user draft.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
#[instrument(skip(state))]
pub async fn begin_add(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.console().apply(Intent::BeginAddUser).await?;
    Ok(Redirect::to(Tab::Users.path()))
}

/// Open a copy of an existing user.
///
/// # Errors
///
/// Returns 404 if the user does not exist.
#[instrument(skip(state))]
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Redirect, AppError> {
    state.console().apply(Intent::BeginEditUser { id }).await?;
    Ok(Redirect::to(Tab::Users.path()))
}

/// Delete a user. Deleting a user that is already gone is not an error.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Redirect, AppError> {
    if let Effect::UserDeleted { removed, .. } =
        state.console().apply(Intent::DeleteUser { id }).await?
    {
        tracing::info!(user_id = %id, removed, "User delete");
    }
    Ok(Redirect::to(Tab::Users.path()))
}
