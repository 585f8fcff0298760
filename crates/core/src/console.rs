//! The state-owning console.
//!
//! [`AdminConsole`] owns both record stores, the form and the router. Every
//! user action arrives as an [`Intent`]; [`AdminConsole::apply`] performs it
//! synchronously and describes the outcome as an [`Effect`].
//!
//! A draft belongs to the screen that edits it. Opening a draft shows its
//! screen, and switching to the other screen discards the draft.

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ValidationError, ValidationMode};
use crate::form::{Draft, DraftKind, FieldValue, FormController};
use crate::models::{Role, User};
use crate::router::ViewRouter;
use crate::store::{Record, RecordStore};
use crate::types::{Email, RoleId, Tab, UserId};

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    ListUsers,
    ListRoles,
    BeginAddUser,
    BeginEditUser { id: UserId },
    BeginAddRole,
    BeginEditRole { id: RoleId },
    UpdateDraftField { field: String, value: FieldValue },
    SaveDraft,
    CancelDraft,
    DeleteUser { id: UserId },
    DeleteRole { id: RoleId },
    SwitchTab { tab: Tab },
}

impl Intent {
    /// Snake-case name, as used in the serialized form.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ListUsers => "list_users",
            Self::ListRoles => "list_roles",
            Self::BeginAddUser => "begin_add_user",
            Self::BeginEditUser { .. } => "begin_edit_user",
            Self::BeginAddRole => "begin_add_role",
            Self::BeginEditRole { .. } => "begin_edit_role",
            Self::UpdateDraftField { .. } => "update_draft_field",
            Self::SaveDraft => "save_draft",
            Self::CancelDraft => "cancel_draft",
            Self::DeleteUser { .. } => "delete_user",
            Self::DeleteRole { .. } => "delete_role",
            Self::SwitchTab { .. } => "switch_tab",
        }
    }

    /// Shorthand for a text field update.
    #[must_use]
    pub fn set(field: &str, value: &str) -> Self {
        Self::UpdateDraftField {
            field: field.to_owned(),
            value: FieldValue::text(value),
        }
    }
}

/// What an applied intent did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Users { users: Vec<User> },
    Roles { roles: Vec<Role> },
    DraftOpened { draft: Draft },
    DraftUpdated { draft: Draft },
    UserSaved { id: UserId, created: bool },
    RoleSaved { id: RoleId, created: bool },
    DraftCancelled { discarded: bool },
    UserDeleted { id: UserId, removed: bool },
    RoleDeleted { id: RoleId, removed: bool },
    TabSwitched { tab: Tab, discarded_draft: bool },
}

/// A user referring to a role name that no role currently has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanedRole {
    pub user_id: UserId,
    pub user_name: String,
    pub role: String,
}

/// Owned copy of everything the presentation layer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSnapshot {
    pub tab: Tab,
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub draft: Option<Draft>,
    pub orphaned_roles: Vec<OrphanedRole>,
    pub validation: ValidationMode,
}

/// Users and roles console state.
#[derive(Debug, Clone, Default)]
pub struct AdminConsole {
    users: RecordStore<User>,
    roles: RecordStore<Role>,
    form: FormController,
    router: ViewRouter,
    validation: ValidationMode,
}

impl AdminConsole {
    /// Empty console.
    #[must_use]
    pub fn new(validation: ValidationMode) -> Self {
        Self {
            validation,
            ..Self::default()
        }
    }

    /// Console seeded with the given records, in order.
    #[must_use]
    pub fn with_records(users: Vec<User>, roles: Vec<Role>, validation: ValidationMode) -> Self {
        Self {
            users: RecordStore::from_records(users),
            roles: RecordStore::from_records(roles),
            validation,
            ..Self::default()
        }
    }

    /// Console seeded with [`crate::seed::mock_users`] and [`crate::seed::mock_roles`].
    #[must_use]
    pub fn with_mock_data(validation: ValidationMode) -> Self {
        Self::with_records(crate::seed::mock_users(), crate::seed::mock_roles(), validation)
    }

    /// Apply one intent.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::NotFound`] when editing an unknown record
    /// - [`ConsoleError::NoOpenDraft`] when updating or saving without a draft
    /// - [`ConsoleError::Validation`] for rejected field input, and in strict
    ///   mode for a draft that fails validation on save (the draft stays open)
    pub fn apply(&mut self, intent: Intent) -> Result<Effect, ConsoleError> {
        match intent {
            Intent::ListUsers => Ok(Effect::Users {
                users: self.users.list().to_vec(),
            }),
            Intent::ListRoles => Ok(Effect::Roles {
                roles: self.roles.list().to_vec(),
            }),
            Intent::BeginAddUser => Ok(self.open_draft(Draft::User(User::default()))),
            Intent::BeginEditUser { id } => {
                let user = find(&self.users, id)?.clone();
                Ok(self.open_draft(Draft::User(user)))
            }
            Intent::BeginAddRole => Ok(self.open_draft(Draft::Role(Role::default()))),
            Intent::BeginEditRole { id } => {
                let role = find(&self.roles, id)?.clone();
                Ok(self.open_draft(Draft::Role(role)))
            }
            Intent::UpdateDraftField { field, value } => {
                let draft = self.form.update_field(&field, value)?;
                Ok(Effect::DraftUpdated {
                    draft: draft.clone(),
                })
            }
            Intent::SaveDraft => self.save_draft(),
            Intent::CancelDraft => Ok(Effect::DraftCancelled {
                discarded: self.form.cancel().is_some(),
            }),
            Intent::DeleteUser { id } => Ok(Effect::UserDeleted {
                id,
                removed: self.users.delete(id),
            }),
            Intent::DeleteRole { id } => Ok(Effect::RoleDeleted {
                id,
                removed: self.roles.delete(id),
            }),
            Intent::SwitchTab { tab } => Ok(self.switch_tab(tab)),
        }
    }

    /// Write a submitted form into the open draft and save it, as one step.
    ///
    /// Fields are written in order. A value equal to what the form input
    /// already displays is skipped (see [`Draft::displays`]), so saving an
    /// untouched form leaves the record as it was. The field updates are
    /// all-or-nothing. Once they all apply they stay in the draft even if the
    /// strict save check then rejects it.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::NoOpenDraft`] when the form is closed
    /// - [`ConsoleError::DraftKindMismatch`] when the open draft is of another kind
    /// - [`ConsoleError::Validation`] for a rejected field (nothing is written)
    ///   or a strict save failure (the updated draft stays open)
    pub fn submit_form(
        &mut self,
        kind: DraftKind,
        fields: Vec<(String, FieldValue)>,
    ) -> Result<Effect, ConsoleError> {
        let mut draft = self.form.draft().cloned().ok_or(ConsoleError::NoOpenDraft)?;
        if draft.kind() != kind {
            return Err(ConsoleError::DraftKindMismatch {
                submitted: kind,
                open: draft.kind(),
            });
        }

        for (field, value) in fields {
            if !draft.displays(&field, &value) {
                draft.set_field(&field, value)?;
            }
        }

        self.form.open(draft);
        self.save_draft()
    }

    /// Users in display order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        self.users.list()
    }

    /// Roles in display order.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        self.roles.list()
    }

    /// The open draft, if any.
    #[must_use]
    pub const fn draft(&self) -> Option<&Draft> {
        self.form.draft()
    }

    /// Screen currently shown.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.router.current()
    }

    /// Validation applied on save.
    #[must_use]
    pub const fn validation(&self) -> ValidationMode {
        self.validation
    }

    /// Owned copy of the whole console state.
    #[must_use]
    pub fn snapshot(&self) -> ConsoleSnapshot {
        ConsoleSnapshot {
            tab: self.tab(),
            users: self.users.list().to_vec(),
            roles: self.roles.list().to_vec(),
            draft: self.form.draft().cloned(),
            orphaned_roles: self.orphaned_role_references(),
            validation: self.validation,
        }
    }

    /// Role names held by users that match no current role.
    ///
    /// Roles are referenced by name and never cascaded, so deleting or
    /// renaming a role leaves these behind.
    #[must_use]
    pub fn orphaned_role_references(&self) -> Vec<OrphanedRole> {
        let names: std::collections::HashSet<&str> =
            self.roles.list().iter().map(|r| r.name.as_str()).collect();
        let known = &names;

        self.users
            .list()
            .iter()
            .filter_map(|user| user.id.map(|id| (id, user)))
            .flat_map(|(user_id, user)| {
                user.roles
                    .iter()
                    .filter(move |role| !known.contains(role.as_str()))
                    .map(move |role| OrphanedRole {
                        user_id,
                        user_name: user.name.clone(),
                        role: role.clone(),
                    })
            })
            .collect()
    }

    fn open_draft(&mut self, draft: Draft) -> Effect {
        self.router.switch(draft.kind().tab());
        self.form.open(draft.clone());
        Effect::DraftOpened { draft }
    }

    fn save_draft(&mut self) -> Result<Effect, ConsoleError> {
        if self.validation == ValidationMode::Strict
            && let Some(draft) = self.form.draft()
        {
            validate_strict(draft)?;
        }

        let effect = match self.form.submit()? {
            Draft::User(user) => {
                let saved = self.users.upsert(user);
                Effect::UserSaved {
                    id: saved.id,
                    created: saved.created,
                }
            }
            Draft::Role(role) => {
                let saved = self.roles.upsert(role);
                Effect::RoleSaved {
                    id: saved.id,
                    created: saved.created,
                }
            }
        };
        Ok(effect)
    }

    fn switch_tab(&mut self, tab: Tab) -> Effect {
        self.router.switch(tab);
        let stale = self.form.draft().is_some_and(|draft| draft.kind().tab() != tab);
        if stale {
            self.form.cancel();
        }
        Effect::TabSwitched {
            tab,
            discarded_draft: stale,
        }
    }
}

fn find<R: Record>(store: &RecordStore<R>, id: R::Id) -> Result<&R, ConsoleError> {
    store.get(id).ok_or_else(|| ConsoleError::NotFound {
        entity: R::ENTITY,
        id: id.into(),
    })
}

fn validate_strict(draft: &Draft) -> Result<(), ValidationError> {
    match draft {
        Draft::User(user) => {
            if user.name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
            Email::parse(&user.email)?;
        }
        Draft::Role(role) => {
            if role.name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
            if let Some(index) = role.permissions.iter().position(String::is_empty) {
                return Err(ValidationError::EmptyPermission {
                    position: index + 1,
                });
            }
        }
    }
    Ok(())
}
