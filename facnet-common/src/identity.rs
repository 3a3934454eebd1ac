//! Client identity tokens
//!
//! A client identity token is a pseudonymous handle for "this browser". It is
//! generated once, persisted on the client side and reused for every comment
//! the client posts. It is not tied to an account and is never rotated.
//!
//! Comment ownership is decided by comparing tokens only, so the check stays a
//! pure function of the comment and the caller's token.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::{Error, Result};

/// Name under which the token is persisted on the client (cookie name)
pub const CLIENT_TOKEN_KEY: &str = "browser_session_id";

/// Longest token accepted from a client
const MAX_TOKEN_LEN: usize = 128;

/// Client identity token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientToken(String);

impl ClientToken {
    /// Generate a new random token (UUIDv4 text form)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept a token presented by a client
    ///
    /// Tokens are opaque, but they travel in cookies and query filters, so only
    /// non-empty ASCII alphanumerics and `-` / `_` are accepted.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidInput("Client token is empty".to_string()));
        }
        if raw.len() > MAX_TOKEN_LEN {
            return Err(Error::InvalidInput(format!(
                "Client token longer than {} characters",
                MAX_TOKEN_LEN
            )));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::InvalidInput(
                "Client token contains invalid characters".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ownership check: a comment stored with `owner` may be deleted by `caller`
/// only when both tokens are identical.
pub fn is_owner(owner: Option<&ClientToken>, caller: &ClientToken) -> bool {
    owner.is_some_and(|owner| owner == caller)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_uuid_v4_shaped() {
        let token = ClientToken::generate();
        let parsed = Uuid::parse_str(token.as_str()).expect("token should be a UUID");
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(token.as_str().len(), 36);
    }

    #[test]
    fn test_generate_is_random() {
        assert_ne!(ClientToken::generate(), ClientToken::generate());
    }

    #[test]
    fn test_parse_round_trips_generated_token() {
        let token = ClientToken::generate();
        assert_eq!(ClientToken::parse(token.as_str()).unwrap(), token);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let token = ClientToken::parse("  abc-123  ").unwrap();
        assert_eq!(token.as_str(), "abc-123");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(ClientToken::parse("").is_err());
        assert!(ClientToken::parse("   ").is_err());
        assert!(ClientToken::parse("a;b").is_err());
        assert!(ClientToken::parse("a,b").is_err());
        assert!(ClientToken::parse(&"x".repeat(MAX_TOKEN_LEN + 1)).is_err());
    }

    #[test]
    fn test_is_owner() {
        let mine = ClientToken::generate();
        let theirs = ClientToken::generate();
        assert!(is_owner(Some(&mine), &mine));
        assert!(!is_owner(Some(&mine), &theirs));
        assert!(!is_owner(None, &mine));
    }
}
