use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claim carried inside a signed token.
///
/// `sub` holds the user identifier; `iat`/`exp` are Unix timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject that expire `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with sub, iat, and exp set
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
