// Authentication models: bearer token claims

use serde::{Deserialize, Serialize};

/// Access token claims structure
/// Carries the user's public identity so protected handlers never re-fetch it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// User ID (subject)
    pub sub: String,

    /// JWT ID (UUID format)
    pub jti: String,

    /// Display name
    pub name: String,

    /// User email address
    pub email: String,

    /// Stored profile image filename, if any
    pub profile: Option<String>,

    /// Audience (aud)
    pub aud: String,

    /// Issuer (iss)
    pub iss: String,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: u64,

    /// Expires at timestamp (Unix epoch seconds)
    pub exp: u64,
}

impl AccessTokenClaims {
    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        self.exp < now
    }
}
