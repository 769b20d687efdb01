//! Session token and authentication state
//!
//! `SessionToken` is shared between the App layer (which logs in and out)
//! and the HTTP client (which attaches the bearer token). `AuthState` is the
//! view-facing snapshot handed to the views that need it.

use std::sync::{Arc, RwLock};

use crate::models::UserDto;
use crate::storage::TokenStore;

/// Supplies the bearer token for outgoing requests
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Current session token backed by a persistent store
pub struct SessionToken {
    store: Box<dyn TokenStore>,
    current: RwLock<Option<String>>,
}

impl SessionToken {
    /// Create a session, restoring any token the store holds
    pub fn new(store: Box<dyn TokenStore>) -> Arc<Self> {
        let current = store.load();
        Arc::new(SessionToken {
            store,
            current: RwLock::new(current),
        })
    }

    /// Replace the token and persist it
    pub fn set(&self, token: &str) {
        if let Err(e) = self.store.save(token) {
            tracing::warn!(error = %e, "Failed to persist session token");
        }
        if let Ok(mut current) = self.current.write() {
            *current = Some(token.to_string());
        }
    }

    /// Forget the token, in memory and on disk
    pub fn clear(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to remove stored session token");
        }
        if let Ok(mut current) = self.current.write() {
            *current = None;
        }
    }

    pub fn is_present(&self) -> bool {
        self.token().is_some()
    }
}

impl TokenProvider for SessionToken {
    fn token(&self) -> Option<String> {
        self.current.read().ok().and_then(|t| t.clone())
    }
}

/// Authentication state as seen by the views
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserDto>,
    pub has_token: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.has_token && self.user.is_some()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStore;

    #[test]
    fn test_session_restores_and_clears() {
        let session = SessionToken::new(Box::new(MemoryTokenStore::with_token("stored")));
        assert_eq!(session.token().as_deref(), Some("stored"));

        session.set("fresh");
        assert_eq!(session.token().as_deref(), Some("fresh"));

        session.clear();
        assert!(!session.is_present());
    }

    #[test]
    fn test_auth_state_needs_user_and_token() {
        let mut auth = AuthState {
            user: None,
            has_token: true,
        };
        assert!(!auth.is_authenticated());
        auth.user = Some(UserDto {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
        });
        assert!(auth.is_authenticated());
        assert_eq!(auth.user_name(), Some("Ada"));
    }
}
