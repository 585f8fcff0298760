//! Error kinds reported by the console.
//!
//! Deleting a record that does not exist is deliberately absent: it is a
//! no-op, not a failure.

use thiserror::Error;

use crate::form::DraftKind;
use crate::types::EmailError;

/// Error returned by [`crate::AdminConsole::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Record to edit does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// Draft input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The intent needs an open draft and the form is closed.
    #[error("no draft is open")]
    NoOpenDraft,

    /// A form was submitted for a different kind of draft than the one open.
    #[error("a {open} draft is open, not a {submitted} draft")]
    DraftKindMismatch {
        submitted: DraftKind,
        open: DraftKind,
    },
}

/// Reasons draft input is rejected.
///
/// The first group applies in every mode. The second group is only raised by
/// strict validation at save time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} drafts have no field named '{field}'")]
    UnknownField { kind: DraftKind, field: String },

    #[error("field '{field}' takes a single text value")]
    ExpectedText { field: String },

    #[error("invalid status '{0}', expected Active or Inactive")]
    InvalidStatus(String),

    #[error("name cannot be empty")]
    EmptyName,

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("permission {position} is empty")]
    EmptyPermission { position: usize },
}

/// How much checking happens when a draft is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Accept whatever the form holds.
    #[default]
    Permissive,
    /// Reject empty names, malformed emails and empty permissions.
    Strict,
}

impl std::str::FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            _ => Err(format!("invalid validation mode: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConsoleError::NotFound { entity: "user", id: 9 };
        assert_eq!(err.to_string(), "user 9 not found");

        let err = ConsoleError::from(ValidationError::UnknownField {
            kind: DraftKind::Role,
            field: "email".to_string(),
        });
        assert_eq!(err.to_string(), "role drafts have no field named 'email'");

        let err = ConsoleError::DraftKindMismatch {
            submitted: DraftKind::User,
            open: DraftKind::Role,
        };
        assert_eq!(err.to_string(), "a role draft is open, not a user draft");
    }

    #[test]
    fn test_validation_mode_parse() {
        assert_eq!("strict".parse(), Ok(ValidationMode::Strict));
        assert_eq!("permissive".parse(), Ok(ValidationMode::Permissive));
        assert!("lenient".parse::<ValidationMode>().is_err());
    }
}
