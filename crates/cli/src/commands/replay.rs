//! Replay an intent script against an in-process console.
//!
//! A script is a YAML list of intents in their serialized form:
//!
//! ```yaml
//! - intent: begin_add_user
//! - intent: update_draft_field
//!   field: name
//!   value: Carol
//! - intent: update_draft_field
//!   field: roles
//!   value: [Admin, Viewer]
//! - intent: save_draft
//! ```
//!
//! Rejected intents are logged and skipped; the rest of the script still runs.

use std::path::Path;

use roster_core::{AdminConsole, ConsoleError, ConsoleSnapshot, Effect, Intent, ValidationMode};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that stop a replay before it starts or after it ends.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid script: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// An intent the console refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// 1-based position in the script.
    pub step: usize,
    pub intent: &'static str,
    pub error: ConsoleError,
}

/// Outcome of a replay.
#[derive(Debug)]
pub struct ReplayReport {
    pub effects: Vec<Effect>,
    pub rejections: Vec<Rejection>,
    pub snapshot: ConsoleSnapshot,
}

/// Parse a YAML intent list.
///
/// # Errors
///
/// Returns [`ReplayError::Parse`] if the document is not a list of intents.
pub fn parse_script(source: &str) -> Result<Vec<Intent>, ReplayError> {
    Ok(serde_yaml::from_str(source)?)
}

/// Apply every intent in order, collecting effects and rejections.
pub fn replay(mut console: AdminConsole, intents: Vec<Intent>) -> ReplayReport {
    let mut effects = Vec::with_capacity(intents.len());
    let mut rejections = Vec::new();

    for (index, intent) in intents.into_iter().enumerate() {
        let step = index + 1;
        let name = intent.name();
        match console.apply(intent) {
            Ok(effect) => {
                info!(step, intent = name, ?effect, "Applied");
                effects.push(effect);
            }
            Err(error) => {
                warn!(step, intent = name, %error, "Rejected");
                rejections.push(Rejection {
                    step,
                    intent: name,
                    error,
                });
            }
        }
    }

    ReplayReport {
        effects,
        rejections,
        snapshot: console.snapshot(),
    }
}

/// Run a script file and print the final snapshot as YAML.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed.
#[allow(clippy::print_stdout)]
pub fn run(script: &Path, empty: bool, strict: bool) -> Result<(), ReplayError> {
    let source = std::fs::read_to_string(script).map_err(|source| ReplayError::Read {
        path: script.display().to_string(),
        source,
    })?;
    let intents = parse_script(&source)?;

    let validation = if strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Permissive
    };
    let console = if empty {
        AdminConsole::new(validation)
    } else {
        AdminConsole::with_mock_data(validation)
    };

    info!(path = %script.display(), intents = intents.len(), ?validation, "Replaying script");
    let report = replay(console, intents);
    info!(
        applied = report.effects.len(),
        rejected = report.rejections.len(),
        "Replay finished"
    );

    let output = serde_yaml::to_string(&report.snapshot)?;
    println!("{}", output.trim_end());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::io::Write;

    use roster_core::{FieldValue, RoleId, Tab, UserId, UserStatus};

    use super::*;

    const ADD_CAROL: &str = "
- intent: begin_add_user
- intent: update_draft_field
  field: name
  value: Carol
- intent: update_draft_field
  field: roles
  value: [Admin, Viewer]
- intent: save_draft
";

    #[test]
    fn test_parse_script_shapes() {
        let intents = parse_script(ADD_CAROL).unwrap();
        assert_eq!(intents.len(), 4);
        assert_eq!(intents[1], Intent::set("name", "Carol"));
        assert_eq!(
            intents[2],
            Intent::UpdateDraftField {
                field: "roles".to_string(),
                value: FieldValue::List(vec!["Admin".to_string(), "Viewer".to_string()]),
            }
        );

        let intents = parse_script("- intent: switch_tab\n  tab: roles\n- intent: delete_role\n  id: 2\n").unwrap();
        assert_eq!(intents[0], Intent::SwitchTab { tab: Tab::Roles });
        assert_eq!(intents[1], Intent::DeleteRole { id: RoleId::new(2) });
    }

    #[test]
    fn test_parse_script_rejects_unknown_intent() {
        assert!(matches!(
            parse_script("- intent: rename_everything\n"),
            Err(ReplayError::Parse(_))
        ));
    }

    #[test]
    fn test_replay_adds_user() {
        let console = AdminConsole::with_mock_data(ValidationMode::Permissive);
        let report = replay(console, parse_script(ADD_CAROL).unwrap());

        assert!(report.rejections.is_empty());
        assert_eq!(report.effects.len(), 4);
        let carol = report.snapshot.users.last().unwrap();
        assert_eq!(carol.id, Some(UserId::new(3)));
        assert_eq!(carol.roles, vec!["Admin", "Viewer"]);
        assert_eq!(carol.status, UserStatus::Active);
    }

    #[test]
    fn test_replay_continues_past_rejections() {
        let console = AdminConsole::with_mock_data(ValidationMode::Permissive);
        let intents = vec![
            Intent::SaveDraft,
            Intent::BeginEditUser { id: UserId::new(9) },
            Intent::DeleteUser { id: UserId::new(2) },
        ];

        let report = replay(console, intents);

        assert_eq!(report.rejections.len(), 2);
        assert_eq!(report.rejections[0].step, 1);
        assert_eq!(report.rejections[0].error, ConsoleError::NoOpenDraft);
        assert_eq!(report.rejections[1].intent, "begin_edit_user");
        assert_eq!(report.snapshot.users.len(), 1);
    }

    #[test]
    fn test_run_reads_script_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ADD_CAROL.as_bytes()).unwrap();

        assert!(run(file.path(), true, false).is_ok());
        assert!(matches!(
            run(Path::new("/nonexistent/script.yaml"), false, false),
            Err(ReplayError::Read { .. })
        ));
    }
}
