//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Deserializer, Serialize};

use slooze_core::Role;

fn default_name() -> String {
    "User".to_string()
}

/// Null or empty text, as if the field were missing.
fn present_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.filter(|text| !text.is_empty()))
}

fn name_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(present_text(deserializer)?.unwrap_or_else(default_name))
}

fn role_or_default<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(present_text(deserializer)?.map(Role::from).unwrap_or_default())
}

/// Session-stored identity of the signed-in user.
///
/// Derived from a [`User`](super::User) with the password stripped. Missing,
/// null or empty fields decode to the display defaults (`"User"`, `user`)
/// and unknown fields are ignored, so older tokens that carried the email
/// still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name.
    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,
    /// Permission role.
    #[serde(default, deserialize_with = "role_or_default")]
    pub role: Role,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key holding the encoded session credential.
    pub const CURRENT_USER: &str = "user";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Identity {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let identity = decode("{}");
        assert_eq!(identity.name, "User");
        assert_eq!(identity.role, Role::User);
    }

    #[test]
    fn test_null_or_empty_fields_use_defaults() {
        for json in [
            r#"{"name":null,"role":null}"#,
            r#"{"name":"","role":""}"#,
        ] {
            let identity = decode(json);
            assert_eq!(identity.name, "User", "{json}");
            assert_eq!(identity.role, Role::User, "{json}");
        }
    }

    #[test]
    fn test_present_fields_and_extras() {
        let identity = decode(r#"{"name":"Maya Manager","role":"manager","email":"x"}"#);
        assert_eq!(identity.name, "Maya Manager");
        assert_eq!(identity.role, Role::Manager);
    }
}
