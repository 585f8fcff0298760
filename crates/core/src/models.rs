//! User and role records.
//!
//! Both carry an optional ID: a record without one has never been saved and
//! receives an ID from its store on upsert.

use serde::{Deserialize, Serialize};

use crate::store::Record;
use crate::types::{RoleId, UserId, UserStatus};

/// A managed user account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    /// Role names, not role IDs. Renaming or deleting a role leaves these untouched.
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub status: UserStatus,
}

impl User {
    /// Build an unsaved user.
    #[must_use]
    pub fn new(name: &str, email: &str, roles: &[&str], status: UserStatus) -> Self {
        Self {
            id: None,
            name: name.to_owned(),
            email: email.to_owned(),
            roles: roles.iter().map(ToString::to_string).collect(),
            status,
        }
    }

    /// Attach an ID, for seeding known records.
    #[must_use]
    pub const fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Record for User {
    type Id = UserId;
    const ENTITY: &'static str = "user";

    fn id(&self) -> Option<UserId> {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = Some(id);
    }
}

/// A named set of permission labels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Role {
    pub id: Option<RoleId>,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Role {
    /// Build an unsaved role.
    #[must_use]
    pub fn new(name: &str, permissions: &[&str]) -> Self {
        Self {
            id: None,
            name: name.to_owned(),
            permissions: permissions.iter().map(ToString::to_string).collect(),
        }
    }

    /// Attach an ID, for seeding known records.
    #[must_use]
    pub const fn with_id(mut self, id: RoleId) -> Self {
        self.id = Some(id);
        self
    }

    /// Permissions as shown in the comma-separated input.
    #[must_use]
    pub fn permissions_text(&self) -> String {
        self.permissions.join(", ")
    }
}

impl Record for Role {
    type Id = RoleId;
    const ENTITY: &'static str = "role";

    fn id(&self) -> Option<RoleId> {
        self.id
    }

    fn set_id(&mut self, id: RoleId) {
        self.id = Some(id);
    }
}

/// Split a comma-separated permission input into labels.
///
/// Each piece is trimmed. Nothing is deduplicated or dropped, so a trailing
/// comma yields a trailing empty label and an empty input yields `[""]`.
#[must_use]
pub fn parse_permissions(input: &str) -> Vec<String> {
    input.split(',').map(|p| p.trim().to_owned()).collect()
}
