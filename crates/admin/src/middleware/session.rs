//! Session credential handling.
//!
//! The signed-in identity is kept as an opaque token under the `user` key of
//! a session-scoped [`Store`]. The token is the identity's JSON encoded with
//! standard base64. It is not signed: it only carries display state for the
//! shell, never authority over the catalog.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

use crate::db::{Store, StoreError};
use crate::models::{Identity, session_keys};

/// Errors that can occur while writing session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The identity could not be encoded.
    #[error("credential encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Session storage failed.
    #[error("session storage error: {0}")]
    Store(#[from] StoreError),
}

/// Reversible text encoding of an [`Identity`].
pub trait SessionCredentialCodec: Send + Sync {
    /// Encode `identity` as a text-safe token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Encode` if the identity cannot be serialized.
    fn encode(&self, identity: &Identity) -> Result<String, SessionError>;

    /// Decode a token, or `None` if it is not a valid credential.
    fn decode(&self, token: &str) -> Option<Identity>;
}

/// JSON, then standard base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64JsonCodec;

impl SessionCredentialCodec for Base64JsonCodec {
    fn encode(&self, identity: &Identity) -> Result<String, SessionError> {
        let json = serde_json::to_vec(identity)?;
        Ok(STANDARD.encode(json))
    }

    fn decode(&self, token: &str) -> Option<Identity> {
        let bytes = STANDARD.decode(token.trim()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// Session-scoped credential storage.
///
/// Reads are fail-safe: anything other than a decodable credential means
/// "not signed in".
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn Store>,
    codec: Arc<dyn SessionCredentialCodec>,
}

impl SessionStore {
    /// Session storage over `store` using [`Base64JsonCodec`].
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            codec: Arc::new(Base64JsonCodec),
        }
    }

    /// Replace the credential codec.
    #[must_use]
    pub fn with_codec(mut self, codec: Arc<dyn SessionCredentialCodec>) -> Self {
        self.codec = codec;
        self
    }

    /// The codec in use.
    #[must_use]
    pub fn codec(&self) -> &dyn SessionCredentialCodec {
        self.codec.as_ref()
    }

    /// Store the credential for `identity` and return its token.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if encoding or storage fails.
    pub fn sign_in(&self, identity: &Identity) -> Result<String, SessionError> {
        let token = self.codec.encode(identity)?;
        self.store.set(session_keys::CURRENT_USER, &token)?;
        tracing::info!(name = %identity.name, role = %identity.role, "session started");
        Ok(token)
    }

    /// Put a previously issued token back into the session.
    ///
    /// The token is stored as given; a malformed one simply reads back as
    /// signed out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if storage fails.
    pub fn restore(&self, token: &str) -> Result<(), SessionError> {
        self.store.set(session_keys::CURRENT_USER, token)?;
        Ok(())
    }

    /// The raw token, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if storage fails.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.store.get(session_keys::CURRENT_USER)?)
    }

    /// The signed-in identity, or `None` when signed out.
    ///
    /// An undecodable token or unreadable storage also yields `None`.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        let token = match self.store.get(session_keys::CURRENT_USER) {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "session storage unreadable, treating as signed out");
                return None;
            }
        };

        let identity = self.codec.decode(&token);
        if identity.is_none() {
            tracing::warn!("invalid session token, treating as signed out");
        }
        identity
    }

    /// Drop all session state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if storage fails.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        tracing::info!("session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use slooze_core::Role;

    use super::*;
    use crate::db::MemoryStore;

    fn identity() -> Identity {
        Identity {
            name: "Maya Manager".to_string(),
            role: Role::Manager,
        }
    }

    fn session() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_codec_round_trip() {
        let codec = Base64JsonCodec;
        let token = codec.encode(&identity()).unwrap();
        assert_eq!(codec.decode(&token), Some(identity()));
    }

    #[test]
    fn test_token_is_base64_of_json() {
        let token = Base64JsonCodec.encode(&identity()).unwrap();
        let json = STANDARD.decode(&token).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["name"], "Maya Manager");
        assert_eq!(value["role"], "manager");
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let codec = Base64JsonCodec;
        assert_eq!(codec.decode("%%%not base64%%%"), None);
        assert_eq!(codec.decode(&STANDARD.encode("not json")), None);
        assert_eq!(codec.decode(""), None);
    }

    #[test]
    fn test_decode_fills_defaults_and_ignores_extra_fields() {
        let token = STANDARD.encode(r#"{"email":"keeper@slooze.xyz"}"#);
        let identity = Base64JsonCodec.decode(&token).unwrap();
        assert_eq!(identity.name, "User");
        assert_eq!(identity.role, Role::User);
    }

    #[test]
    fn test_sign_in_then_current() {
        let session = session();
        assert_eq!(session.current(), None);

        let token = session.sign_in(&identity()).unwrap();
        assert_eq!(session.token().unwrap(), Some(token));
        assert_eq!(session.current(), Some(identity()));
    }

    #[test]
    fn test_malformed_token_is_signed_out() {
        let session = session();
        session.restore("definitely-not-a-token").unwrap();
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_sign_out_clears() {
        let session = session();
        session.sign_in(&identity()).unwrap();
        session.sign_out().unwrap();
        assert_eq!(session.current(), None);
        assert_eq!(session.token().unwrap(), None);
    }
}
