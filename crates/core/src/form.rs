//! Form state controller.
//!
//! Holds at most one draft record. The form is either `Closed` or `Editing`
//! a draft, which was copied from an existing record or started empty.
//!
//! ```text
//! Closed --open--> Editing --submit/cancel--> Closed
//!                  Editing --update_field--> Editing
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ValidationError};
use crate::models::{Role, User, parse_permissions};
use crate::types::Tab;

/// Which kind of record a draft holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftKind {
    User,
    Role,
}

impl DraftKind {
    /// Screen on which drafts of this kind are edited.
    #[must_use]
    pub const fn tab(self) -> Tab {
        match self {
            Self::User => Tab::Users,
            Self::Role => Tab::Roles,
        }
    }
}

impl std::fmt::Display for DraftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Role => write!(f, "role"),
        }
    }
}

/// Value written into a draft field.
///
/// Form inputs send text. Multi-value fields also accept a list, which
/// replaces the whole sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Shorthand for a text value.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_owned())
    }

    fn into_text(self, field: &str) -> Result<String, ValidationError> {
        match self {
            Self::Text(text) => Ok(text),
            Self::List(_) => Err(ValidationError::ExpectedText {
                field: field.to_owned(),
            }),
        }
    }

    fn into_list(self) -> Vec<String> {
        match self {
            Self::Text(text) => parse_permissions(&text),
            Self::List(items) => items,
        }
    }
}

/// The record being created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Draft {
    User(User),
    Role(Role),
}

impl Draft {
    /// Kind of record held.
    #[must_use]
    pub const fn kind(&self) -> DraftKind {
        match self {
            Self::User(_) => DraftKind::User,
            Self::Role(_) => DraftKind::Role,
        }
    }

    /// Whether `value` is exactly what the form input for `field` displays.
    ///
    /// The permissions input shows [`Role::permissions_text`], and splitting
    /// that text again does not give back an empty list, so an untouched
    /// input must not be written into the draft.
    #[must_use]
    pub fn displays(&self, field: &str, value: &FieldValue) -> bool {
        match (self, field, value) {
            (Self::Role(role), "permissions", FieldValue::Text(text)) => {
                *text == role.permissions_text()
            }
            _ => false,
        }
    }

    /// Overwrite one field.
    ///
    /// User fields: `name`, `email`, `roles`, `status`.
    /// Role fields: `name`, `permissions`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown field, a list given to a
    /// text field, or an unrecognised status.
    pub fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), ValidationError> {
        match self {
            Self::User(user) => match field {
                "name" => user.name = value.into_text(field)?,
                "email" => user.email = value.into_text(field)?,
                "roles" => user.roles = value.into_list(),
                "status" => {
                    let text = value.into_text(field)?;
                    match text.parse() {
                        Ok(status) => user.status = status,
                        Err(_) => return Err(ValidationError::InvalidStatus(text)),
                    }
                }
                _ => return Err(unknown_field(DraftKind::User, field)),
            },
            Self::Role(role) => match field {
                "name" => role.name = value.into_text(field)?,
                "permissions" => role.permissions = value.into_list(),
                _ => return Err(unknown_field(DraftKind::Role, field)),
            },
        }
        Ok(())
    }
}

fn unknown_field(kind: DraftKind, field: &str) -> ValidationError {
    ValidationError::UnknownField {
        kind,
        field: field.to_owned(),
    }
}

/// State of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Closed,
    Editing(Draft),
}

/// Owns the single in-progress draft.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    state: FormState,
}

impl FormController {
    /// Create a closed form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `draft`, returning any draft it replaces.
    pub fn open(&mut self, draft: Draft) -> Option<Draft> {
        match std::mem::replace(&mut self.state, FormState::Editing(draft)) {
            FormState::Closed => None,
            FormState::Editing(previous) => Some(previous),
        }
    }

    /// Overwrite one field of the open draft.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NoOpenDraft`] when closed, or a validation
    /// error from [`Draft::set_field`]. A rejected update leaves the draft as it was.
    pub fn update_field(&mut self, field: &str, value: FieldValue) -> Result<&Draft, ConsoleError> {
        let FormState::Editing(draft) = &mut self.state else {
            return Err(ConsoleError::NoOpenDraft);
        };
        draft.set_field(field, value)?;
        Ok(draft)
    }

    /// Close the form and hand back the draft for saving.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NoOpenDraft`] when the form is already closed.
    pub fn submit(&mut self) -> Result<Draft, ConsoleError> {
        match std::mem::take(&mut self.state) {
            FormState::Editing(draft) => Ok(draft),
            FormState::Closed => Err(ConsoleError::NoOpenDraft),
        }
    }

    /// Close the form, discarding the draft. Closing a closed form does nothing.
    pub fn cancel(&mut self) -> Option<Draft> {
        match std::mem::take(&mut self.state) {
            FormState::Editing(draft) => Some(draft),
            FormState::Closed => None,
        }
    }

    /// The open draft, if any.
    #[must_use]
    pub const fn draft(&self) -> Option<&Draft> {
        match &self.state {
            FormState::Editing(draft) => Some(draft),
            FormState::Closed => None,
        }
    }

    /// Whether a draft is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, FormState::Editing(_))
    }
}
