//! Authenticated session shared by every request.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Deserialize;
use tracing::info;

/// Token pair issued by the API's login endpoint.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

impl AuthTokens {
    pub fn new(access: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: None,
        }
    }
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access", &"<redacted>")
            .field("refresh", &self.refresh.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Handle to the current session. Clones share the same state.
///
/// Obtaining tokens (login, refresh) happens elsewhere; this only holds them
/// between `initialize` and `teardown`.
#[derive(Clone, Default)]
pub struct SessionContext {
    tokens: Arc<RwLock<Option<AuthTokens>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that is already initialised.
    pub fn with_tokens(tokens: AuthTokens) -> Self {
        let session = Self::new();
        session.initialize(tokens);
        session
    }

    /// Starts (or replaces) the session.
    pub fn initialize(&self, tokens: AuthTokens) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Some(tokens);
        info!("session initialized");
    }

    /// Ends the session. Requests made afterwards fail without touching the network.
    pub fn teardown(&self) {
        let previous = self
            .tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            info!("session torn down");
        }
    }

    pub fn is_active(&self) -> bool {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub(crate) fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|t| t.access.clone())
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let session = SessionContext::new();
        let handle = session.clone();
        assert!(!handle.is_active());

        session.initialize(AuthTokens::new("abc"));
        assert!(handle.is_active());
        assert_eq!(handle.access_token().as_deref(), Some("abc"));

        handle.teardown();
        assert!(!session.is_active());
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn debug_output_hides_tokens() {
        let tokens = AuthTokens {
            access: "secret-access".into(),
            refresh: Some("secret-refresh".into()),
        };
        let rendered = format!("{tokens:?} {:?}", SessionContext::with_tokens(tokens.clone()));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("active: true"));
    }

    #[test]
    fn decodes_login_response() {
        let tokens: AuthTokens =
            serde_json::from_str(r#"{"access":"a","refresh":"r"}"#).unwrap();
        assert_eq!(tokens.access, "a");
        assert_eq!(tokens.refresh.as_deref(), Some("r"));
    }
}
