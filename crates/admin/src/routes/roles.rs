//! Roles screen route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use roster_core::{ConsoleSnapshot, Draft, Effect, Intent, Role, RoleId, Tab};
use tracing::instrument;

use crate::{
    components::{DataTableConfig, roles_table_config},
    error::AppError,
    state::AppState,
};

use super::{NavView, render};

/// Build the roles router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roles", get(index).post(switch))
        .route("/roles/new", post(begin_add))
        .route("/roles/{id}/edit", post(begin_edit))
        .route("/roles/{id}/delete", post(delete))
}

/// Role table row.
#[derive(Debug, Clone)]
pub struct RoleRow {
    pub id: String,
    pub name: String,
    pub permissions: Vec<String>,
    /// Users still holding this role name.
    pub holders: usize,
    pub editing: bool,
}

/// Open role form.
#[derive(Debug, Clone)]
pub struct RoleFormView {
    pub title: String,
    pub submit_label: &'static str,
    pub name: String,
    pub permissions_text: String,
}

impl From<&Role> for RoleFormView {
    fn from(role: &Role) -> Self {
        let (title, submit_label) = match role.id {
            Some(id) => (format!("Edit role #{id}"), "Save changes"),
            None => ("New role".to_string(), "Create role"),
        };
        Self {
            title,
            submit_label,
            name: role.name.clone(),
            permissions_text: role.permissions_text(),
        }
    }
}

/// Roles screen template.
#[derive(Template)]
#[template(path = "roles/index.html")]
pub struct RolesIndexTemplate {
    pub nav: NavView,
    pub table_config: DataTableConfig,
    pub roles: Vec<RoleRow>,
    pub form: Option<RoleFormView>,
    pub error: Option<String>,
}

/// Build the roles screen from a snapshot.
#[must_use]
pub fn page(snapshot: &ConsoleSnapshot, error: Option<String>) -> RolesIndexTemplate {
    let draft = match &snapshot.draft {
        Some(Draft::Role(role)) => Some(role),
        _ => None,
    };
    let editing = draft.and_then(|role| role.id);

    let roles = snapshot
        .roles
        .iter()
        .map(|role| RoleRow {
            id: role.id.map(|id| id.to_string()).unwrap_or_default(),
            name: role.name.clone(),
            permissions: role.permissions.clone(),
            holders: snapshot
                .users
                .iter()
                .filter(|user| user.roles.contains(&role.name))
                .count(),
            editing: role.id.is_some() && role.id == editing,
        })
        .collect();

    RolesIndexTemplate {
        nav: NavView::from(Tab::Roles),
        table_config: roles_table_config(),
        roles,
        form: draft.map(RoleFormView::from),
        error,
    }
}

/// Roles screen. Read-only: the active tab and any open draft are left alone.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.console().snapshot().await?;
    Ok(render(&page(&snapshot, None)))
}

/// Make roles the active tab, discarding a draft from the other screen.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
#[instrument(skip(state))]
pub async fn switch(State(state): State<AppState>) -> Result<Redirect, AppError> {
    if let Effect::TabSwitched { discarded_draft: true, .. } = state
        .console()
        .apply(Intent::SwitchTab { tab: Tab::Roles })
        .await?
    {
        tracing::info!("Open draft discarded by tab switch");
    }
    Ok(Redirect::to(Tab::Roles.path()))
}

/// Open an empty role draft.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
#[instrument(skip(state))]
pub async fn begin_add(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.console().apply(Intent::BeginAddRole).await?;
    Ok(Redirect::to(Tab::Roles.path()))
}

/// Open a copy of an existing role.
///
/// # Errors
///
/// Returns 404 if the role does not exist.
#[instrument(skip(state))]
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
) -> Result<Redirect, AppError> {
    state.console().apply(Intent::BeginEditRole { id }).await?;
    Ok(Redirect::to(Tab::Roles.path()))
}

/// Delete a role. Users holding its name keep it.
///
/// # Errors
///
/// Returns an error if the console task is unavailable.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RoleId>,
) -> Result<Redirect, AppError> {
    if let Effect::RoleDeleted { removed, .. } =
        state.console().apply(Intent::DeleteRole { id }).await?
    {
        tracing::info!(role_id = %id, removed, "Role delete");
    }
    Ok(Redirect::to(Tab::Roles.path()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use roster_core::{AdminConsole, ValidationMode};

    use super::*;

    #[test]
    fn test_page_counts_holders() {
        let console = AdminConsole::with_mock_data(ValidationMode::Permissive);
        let page = page(&console.snapshot(), None);

        assert_eq!(page.roles[0].name, "Admin");
        assert_eq!(page.roles[0].holders, 1);
        assert!(page.form.is_none());
    }

    #[test]
    fn test_form_view_joins_permissions() {
        let role = Role::new("Editor", &["Read", "Write"]).with_id(RoleId::new(7));
        let form = RoleFormView::from(&role);
        assert_eq!(form.title, "Edit role #7");
        assert_eq!(form.permissions_text, "Read, Write");
    }

    #[test]
    fn test_page_renders_open_form() {
        let mut console = AdminConsole::with_mock_data(ValidationMode::Permissive);
        console.apply(Intent::BeginAddRole).unwrap();
        let html = page(&console.snapshot(), None).render().unwrap();

        assert!(html.contains("New role"));
        assert!(html.contains("name=\"permissions\""));
    }
}
