//! Mock records the console starts with.

use crate::models::{Role, User};
use crate::types::{RoleId, UserId, UserStatus};

/// Alice (Admin, active) and Bob (Viewer, inactive).
#[must_use]
pub fn mock_users() -> Vec<User> {
    vec![
        User::new("Alice", "alice@example.com", &["Admin"], UserStatus::Active)
            .with_id(UserId::new(1)),
        User::new("Bob", "bob@example.com", &["Viewer"], UserStatus::Inactive)
            .with_id(UserId::new(2)),
    ]
}

/// Admin (read, write, delete) and Viewer (read).
#[must_use]
pub fn mock_roles() -> Vec<Role> {
    vec![
        Role::new("Admin", &["Read", "Write", "Delete"]).with_id(RoleId::new(1)),
        Role::new("Viewer", &["Read"]).with_id(RoleId::new(2)),
    ]
}
