use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            created_at: Utc::now(),
        }
    }
}

/// In-memory session. Authenticated exactly when a non-empty token is held.
#[derive(Debug, Default)]
pub struct Session {
    data: Option<SessionData>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session with freshly issued data
    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// Get the bearer token if one is held
    pub fn token(&self) -> Option<&str> {
        self.data
            .as_ref()
            .map(|d| d.token.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn username(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.username.as_str())
    }

    pub fn data(&self) -> Option<&SessionData> {
        self.data.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unauthenticated() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.username().is_none());
    }

    #[test]
    fn test_update_sets_token() {
        let mut session = Session::new();
        session.update(SessionData::new("tok", "alice"));
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.username(), Some("alice"));
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let mut session = Session::new();
        session.update(SessionData::new("", "alice"));
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }
}
