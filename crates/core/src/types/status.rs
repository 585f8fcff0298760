//! Status and screen enums.

use serde::{Deserialize, Serialize};

/// Whether a user account is in use.
///
/// Serialized with the same labels the console displays (`Active`,
/// `Inactive`). New drafts start out `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("active") {
            Ok(Self::Active)
        } else if s.eq_ignore_ascii_case("inactive") {
            Ok(Self::Inactive)
        } else {
            Err(format!("invalid user status: {s}"))
        }
    }
}

/// Management screen shown by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Users,
    Roles,
}

impl Tab {
    /// URL path of the screen.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Users => "/users",
            Self::Roles => "/roles",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Users => write!(f, "users"),
            Self::Roles => write!(f, "roles"),
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(Self::Users),
            "roles" => Ok(Self::Roles),
            _ => Err(format!("invalid tab: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_status_parse_is_case_insensitive() {
        assert_eq!("Inactive".parse::<UserStatus>().unwrap(), UserStatus::Inactive);
        assert_eq!("active".parse::<UserStatus>().unwrap(), UserStatus::Active);
        assert!("Locked".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_user_status_serde_uses_labels() {
        let json = serde_json::to_string(&UserStatus::Inactive).unwrap();
        assert_eq!(json, "\"Inactive\"");
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }

    #[test]
    fn test_tab_roundtrip_through_text() {
        for tab in [Tab::Users, Tab::Roles] {
            assert_eq!(tab.to_string().parse::<Tab>().unwrap(), tab);
        }
        assert_eq!(serde_json::to_string(&Tab::Roles).unwrap(), "\"roles\"");
        assert!("settings".parse::<Tab>().is_err());
    }
}
