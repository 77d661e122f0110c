//! User role carried by accounts and session credentials.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role assigned to a catalog user.
///
/// The role set is open: values other than the known three are preserved
/// verbatim as [`Role::Other`] so that round-tripping a stored user never
/// loses information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Store manager. The only role allowed on the dashboard.
    Manager,
    /// Administrator.
    Admin,
    /// Regular staff member.
    #[default]
    User,
    /// Any other role string.
    Other(String),
}

impl Role {
    /// Returns the wire representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::User => "user",
            Self::Other(role) => role,
        }
    }

    /// Whether this role may open the dashboard.
    #[must_use]
    pub const fn can_view_dashboard(&self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "manager" => Self::Manager,
            "admin" => Self::Admin,
            "user" => Self::User,
            _ => Self::Other(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Self::from(role.to_owned())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_parse() {
        assert_eq!(Role::from("manager"), Role::Manager);
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("user"), Role::User);
    }

    #[test]
    fn test_role_parsing_is_case_sensitive() {
        assert_eq!(Role::from("Manager"), Role::Other("Manager".to_string()));
    }

    #[test]
    fn test_unknown_role_round_trips() {
        let role: Role = serde_json::from_str("\"auditor\"").unwrap();
        assert_eq!(role, Role::Other("auditor".to_string()));
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"auditor\"");
    }

    #[test]
    fn test_only_manager_sees_dashboard() {
        assert!(Role::Manager.can_view_dashboard());
        assert!(!Role::Admin.can_view_dashboard());
        assert!(!Role::User.can_view_dashboard());
        assert!(!Role::Other("owner".to_string()).can_view_dashboard());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Role::Admin), "admin");
    }
}
