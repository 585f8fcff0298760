//! Dump the mock records.

use clap::ValueEnum;
use roster_core::{Role, User, seed};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while dumping seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for `seed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeedFormat {
    Yaml,
    Json,
}

/// The records the admin panel starts with.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedData {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
}

impl SeedData {
    /// The mock users and roles.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            users: seed::mock_users(),
            roles: seed::mock_roles(),
        }
    }
}

/// Encode the mock records.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn render(format: SeedFormat) -> Result<String, SeedError> {
    let data = SeedData::mock();
    Ok(match format {
        SeedFormat::Yaml => serde_yaml::to_string(&data)?,
        SeedFormat::Json => serde_json::to_string_pretty(&data)?,
    })
}

/// Print the mock records to stdout.
///
/// # Errors
///
/// Returns an error if encoding fails.
#[allow(clippy::print_stdout)]
pub fn print(format: SeedFormat) -> Result<(), SeedError> {
    let output = render(format)?;
    println!("{}", output.trim_end());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_dump_lists_mock_records() {
        let json: serde_json::Value = serde_json::from_str(&render(SeedFormat::Json).unwrap()).unwrap();
        assert_eq!(json["users"][0]["name"], "Alice");
        assert_eq!(json["users"][1]["status"], "Inactive");
        assert_eq!(json["roles"][0]["permissions"][2], "Delete");
    }

    #[test]
    fn test_yaml_dump_reads_back() {
        let data: SeedData = serde_yaml::from_str(&render(SeedFormat::Yaml).unwrap()).unwrap();
        assert_eq!(data.users, seed::mock_users());
        assert_eq!(data.roles, seed::mock_roles());
    }
}
