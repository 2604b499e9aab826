//! Session state.
//!
//! ```text
//! Unauthenticated ──login(user)──▶ Authenticated
//!        ▲                              │
//!        └───────────logout─────────────┘
//! ```
//!
//! Credentials are never checked here; the session only records which side
//! of the guard the user is on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Already signed in as {0}")]
    AlreadyAuthenticated(String),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("User name must not be empty")]
    EmptyUser,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Authentication state passed to the router guard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated {
        user: String,
        /// RFC 3339 sign-in timestamp
        since: String,
    },
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn user(&self) -> Option<&str> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Unauthenticated => None,
        }
    }

    /// Enter the authenticated state.
    pub fn login(&mut self, user: &str) -> SessionResult<()> {
        if let Session::Authenticated { user: current, .. } = self {
            return Err(SessionError::AlreadyAuthenticated(current.clone()));
        }
        let user = user.trim();
        if user.is_empty() {
            return Err(SessionError::EmptyUser);
        }
        *self = Session::Authenticated {
            user: user.to_string(),
            since: chrono::Utc::now().to_rfc3339(),
        };
        tracing::info!(user = %user, "signed in");
        Ok(())
    }

    /// Leave the authenticated state.
    pub fn logout(&mut self) -> SessionResult<()> {
        match std::mem::take(self) {
            Session::Authenticated { user, .. } => {
                tracing::info!(user = %user, "signed out");
                Ok(())
            }
            Session::Unauthenticated => Err(SessionError::NotAuthenticated),
        }
    }
}
