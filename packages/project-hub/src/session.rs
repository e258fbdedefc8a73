//! Identity of the signed-in user, passed explicitly to the views that need it.

use serde::{Deserialize, Serialize};

/// Current user session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display identity (usually an email address)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Bearer token forwarded to the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            token: Some(token.into()),
        }
    }

    /// Session with no identity; requests go out without credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Value of the `Authorization` header, if the session carries a token
    pub fn authorization(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {}", t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        let session = Session::new("ada@example.com", "abc123");
        assert_eq!(session.authorization().as_deref(), Some("Bearer abc123"));
    }

    #[test]
    fn test_anonymous_has_no_header() {
        assert_eq!(Session::anonymous().authorization(), None);

        let blank = Session {
            user: None,
            token: Some(String::new()),
        };
        assert_eq!(blank.authorization(), None);
    }
}
