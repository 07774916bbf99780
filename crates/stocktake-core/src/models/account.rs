use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Username and password as typed into the auth form.
/// Only ever used as a request payload.
#[derive(Clone, Default, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields must contain something other than whitespace
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ClientError::Validation(
                "Please enter both username and password".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body returned by `POST /login`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_both_fields() {
        assert!(Credentials::new("alice", "secret").validate().is_ok());

        for (user, pass) in [("", "secret"), ("alice", ""), ("", ""), ("   ", "secret"), ("alice", "\t\n")] {
            let err = Credentials::new(user, pass).validate().unwrap_err();
            assert!(matches!(err, ClientError::Validation(_)), "{user:?}/{pass:?}");
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_parse_token_response() {
        let json = r#"{"access_token": "abc.def.ghi", "token_type": "bearer"}"#;
        let token: TokenResponse = serde_json::from_str(json).expect("token json");
        assert_eq!(token.access_token, "abc.def.ghi");
        assert_eq!(token.token_type.as_deref(), Some("bearer"));

        let bare: TokenResponse = serde_json::from_str(r#"{"access_token": "t"}"#).expect("bare token");
        assert!(bare.token_type.is_none());
    }
}
