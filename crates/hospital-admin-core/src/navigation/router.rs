//! Session-guarded router.

use serde::{Deserialize, Serialize};

use super::Destination;
use crate::session::Session;

/// What the host should do with a navigation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "target", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Show the requested view
    Render(Destination),
    /// Replace the location with another view
    Redirect(Destination),
    /// No view is registered at this path
    NotFound(String),
}

/// Maps paths to destinations, guarding protected views with the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    home: Destination,
    sign_in: Destination,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            home: Destination::Dashboard,
            sign_in: Destination::Login,
        }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a path for the given session.
    pub fn resolve(&self, session: &Session, path: &str) -> RouteOutcome {
        match Destination::from_path(path) {
            Some(dest) => self.guard(session, dest),
            None => {
                tracing::warn!(path = %path, "no route for path");
                RouteOutcome::NotFound(path.to_string())
            }
        }
    }

    /// Apply the session guard to a known destination.
    pub fn guard(&self, session: &Session, dest: Destination) -> RouteOutcome {
        match (session.is_authenticated(), dest.is_public()) {
            (false, false) => RouteOutcome::Redirect(self.sign_in),
            (true, true) => RouteOutcome::Redirect(self.home),
            _ => RouteOutcome::Render(dest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> Session {
        let mut session = Session::new();
        session.login("admin").unwrap();
        session
    }

    #[test]
    fn test_protected_redirects_to_login() {
        let router = Router::new();
        let session = Session::new();

        assert_eq!(
            router.resolve(&session, "/pharmacy"),
            RouteOutcome::Redirect(Destination::Login)
        );
        assert_eq!(
            router.resolve(&session, "/signup"),
            RouteOutcome::Render(Destination::Signup)
        );
    }

    #[test]
    fn test_authenticated_renders() {
        let router = Router::new();
        let session = signed_in();

        assert_eq!(
            router.resolve(&session, "/schedule"),
            RouteOutcome::Render(Destination::Schedule)
        );
        assert_eq!(
            router.resolve(&session, "/login"),
            RouteOutcome::Redirect(Destination::Dashboard)
        );
    }

    #[test]
    fn test_unknown_path() {
        let router = Router::new();
        assert_eq!(
            router.resolve(&signed_in(), "/nowhere"),
            RouteOutcome::NotFound("/nowhere".into())
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&RouteOutcome::Redirect(Destination::Login)).unwrap();
        assert_eq!(json, r#"{"action":"redirect","target":"login"}"#);
    }
}
