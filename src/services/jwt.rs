// JWT token service
// HS256 signing with audience/issuer validation; claims carry the public
// user identity that protected handlers consume

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

use crate::models::auth::AccessTokenClaims;

// Error types for JWT operations
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("JWT encoding error: {0}")]
    EncodingError(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Clock error: {0}")]
    ClockError(String),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            ErrorKind::InvalidToken => JwtError::InvalidToken,
            _ => JwtError::EncodingError(err.to_string()),
        }
    }
}

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Access token validity window in seconds
    pub access_token_expiry: u64,
    pub algorithm: Algorithm,

    /// Expected audience for tokens
    pub audience: String,
    /// Token issuer identifier
    pub issuer: String,

    pub access_encoding_key: EncodingKey,
    pub access_decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("algorithm", &self.algorithm)
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("access_encoding_key", &"<redacted>")
            .field("access_decoding_key", &"<redacted>")
            .finish()
    }
}

impl JwtConfig {
    fn build_from_params(secret: &str, expiry: u64, audience: String, issuer: String) -> Self {
        JwtConfig {
            access_token_expiry: expiry,
            algorithm: Algorithm::HS256,
            audience,
            issuer,
            access_encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Create JWT config from centralized app configuration
    pub fn from_env() -> Result<Self, JwtError> {
        let crate::app_config::JwtSettings {
            access_secret,
            access_expiry,
            audience,
            issuer,
        } = &crate::app_config::config().jwt;

        Ok(Self::build_from_params(
            access_secret,
            *access_expiry,
            audience.clone(),
            issuer.clone(),
        ))
    }

    /// Deterministic config for tests, no environment involved
    pub fn for_test() -> Self {
        Self::build_from_params(
            "test-access-secret-hs256-minimum-32-characters-long",
            3600,
            "test.newsdesk".to_string(),
            "test.newsdesk".to_string(),
        )
    }
}

/// JWT service
pub struct JwtService {
    config: JwtConfig,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self, JwtError> {
        Ok(Self::new(JwtConfig::from_env()?))
    }

    /// Generate an access token carrying the user's public identity
    pub fn generate_access_token(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        profile: Option<&str>,
    ) -> Result<String, JwtError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| JwtError::ClockError(e.to_string()))?
            .as_secs();

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            profile: profile.map(String::from),
            aud: self.config.audience.clone(),
            iss: self.config.issuer.clone(),
            iat: now,
            exp: now + self.config.access_token_expiry,
        };

        let header = Header::new(self.config.algorithm);
        encode(&header, &claims, &self.config.access_encoding_key).map_err(Into::into)
    }

    /// Validate an access token and return its claims
    pub fn validate_access_token(&self, token: &str) -> Result<AccessTokenClaims, JwtError> {
        let mut validation = Validation::new(self.config.algorithm);
        validation.set_audience(&[self.config.audience.clone()]);
        validation.set_issuer(&[self.config.issuer.clone()]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let token_data =
            decode::<AccessTokenClaims>(token, &self.config.access_decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_round_trip() {
        let service = JwtService::new(JwtConfig::for_test());

        let token = service
            .generate_access_token(
                "user-123",
                "Test User",
                "test@example.com",
                Some("42.png"),
            )
            .expect("Failed to generate access token");

        let claims = service
            .validate_access_token(&token)
            .expect("Failed to validate access token");

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.name, "Test User");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.profile.as_deref(), Some("42.png"));
        assert_eq!(claims.aud, "test.newsdesk");
        assert_eq!(claims.iss, "test.newsdesk");
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = JwtService::new(JwtConfig::for_test());
        assert!(service.validate_access_token("invalid.jwt.token").is_err());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let service = JwtService::new(JwtConfig::for_test());

        let other = JwtService::new(JwtConfig::build_from_params(
            "another-secret-entirely-also-32-characters!!",
            3600,
            "test.newsdesk".to_string(),
            "test.newsdesk".to_string(),
        ));
        let token = other
            .generate_access_token("user-123", "Test", "t@example.com", None)
            .unwrap();

        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let config = JwtConfig::build_from_params(
            "test-access-secret-hs256-minimum-32-characters-long",
            3600,
            "someone-else".to_string(),
            "test.newsdesk".to_string(),
        );
        let other = JwtService::new(config);
        let token = other
            .generate_access_token("user-123", "Test", "t@example.com", None)
            .unwrap();

        let service = JwtService::new(JwtConfig::for_test());
        assert!(service.validate_access_token(&token).is_err());
    }
}
