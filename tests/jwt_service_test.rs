// Basic JWT tests without database dependencies
// Token generation and validation against the public service API

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use newsdesk_backend::{JwtConfig, JwtError, JwtService};

/// Helper to create test JWT config without relying on environment
fn create_test_jwt_config() -> JwtConfig {
    let access_secret = b"test-access-secret-hs256-minimum-32-characters-long";

    JwtConfig {
        access_token_expiry: 3600, // 1 hour
        algorithm: Algorithm::HS256,
        audience: "test.newsdesk".to_string(),
        issuer: "test.newsdesk".to_string(),
        access_encoding_key: EncodingKey::from_secret(access_secret),
        access_decoding_key: DecodingKey::from_secret(access_secret),
    }
}

#[test]
fn test_access_token_generation_and_validation() {
    let jwt_service = JwtService::new(create_test_jwt_config());

    let access_token = jwt_service
        .generate_access_token(
            "1f0f26cc-7f60-4f92-9e6a-8c9a5a3b7d10",
            "Test Reporter",
            "reporter@example.com",
            Some("8123456789012.png"),
        )
        .expect("Failed to generate access token");

    let claims = jwt_service
        .validate_access_token(&access_token)
        .expect("Failed to validate access token");

    assert_eq!(claims.sub, "1f0f26cc-7f60-4f92-9e6a-8c9a5a3b7d10");
    assert_eq!(claims.name, "Test Reporter");
    assert_eq!(claims.email, "reporter@example.com");
    assert_eq!(claims.profile.as_deref(), Some("8123456789012.png"));
    assert_eq!(claims.aud, "test.newsdesk");
    assert_eq!(claims.iss, "test.newsdesk");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_token_without_profile_round_trips_none() {
    let jwt_service = JwtService::new(create_test_jwt_config());

    let token = jwt_service
        .generate_access_token("user-1", "Fresh User", "fresh@example.com", None)
        .expect("Failed to generate token");

    let claims = jwt_service
        .validate_access_token(&token)
        .expect("Failed to validate token");

    assert_eq!(claims.profile, None);
}

#[tokio::test]
async fn test_token_expiry_validation() {
    let access_secret = b"test-access-secret-hs256-minimum-32-characters-long";

    let jwt_config = JwtConfig {
        access_token_expiry: 1, // 1 second expiry
        algorithm: Algorithm::HS256,
        audience: "test.newsdesk".to_string(),
        issuer: "test.newsdesk".to_string(),
        access_encoding_key: EncodingKey::from_secret(access_secret),
        access_decoding_key: DecodingKey::from_secret(access_secret),
    };
    let jwt_service = JwtService::new(jwt_config);

    let token = jwt_service
        .generate_access_token("user-456", "Expiring", "expired@example.com", None)
        .expect("Failed to generate token");

    // Verify token is initially valid
    assert!(jwt_service.validate_access_token(&token).is_ok());

    // Wait for token to expire (buffer for clock skew)
    tokio::time::sleep(tokio::time::Duration::from_secs(3)).await;

    match jwt_service.validate_access_token(&token) {
        Err(JwtError::TokenExpired) => {},
        Err(e) => panic!("Expected TokenExpired error, got: {:?}", e),
        Ok(_) => panic!("Expected token to be expired, but validation succeeded"),
    }
}

#[test]
fn test_invalid_token_validation() {
    let jwt_service = JwtService::new(create_test_jwt_config());

    assert!(jwt_service.validate_access_token("invalid.jwt.token").is_err());
    assert!(jwt_service.validate_access_token("").is_err());
}

#[test]
fn test_tampered_token_is_rejected() {
    let jwt_service = JwtService::new(create_test_jwt_config());

    let token = jwt_service
        .generate_access_token("user-789", "Honest User", "honest@example.com", None)
        .expect("Failed to generate token");

    // Flip the payload segment; the signature no longer matches
    let mut parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);
    let tampered_payload = parts[1].to_string().to_uppercase();
    parts[1] = &tampered_payload;
    let tampered = parts.join(".");

    assert!(jwt_service.validate_access_token(&tampered).is_err());
}

#[test]
fn test_wrong_secret_is_rejected() {
    let jwt_service = JwtService::new(create_test_jwt_config());

    let other_secret = b"a-completely-different-secret-32-characters!";
    let other_config = JwtConfig {
        access_token_expiry: 3600,
        algorithm: Algorithm::HS256,
        audience: "test.newsdesk".to_string(),
        issuer: "test.newsdesk".to_string(),
        access_encoding_key: EncodingKey::from_secret(other_secret),
        access_decoding_key: DecodingKey::from_secret(other_secret),
    };
    let other_service = JwtService::new(other_config);

    let token = other_service
        .generate_access_token("user-1", "Imposter", "imposter@example.com", None)
        .expect("Failed to generate token");

    assert!(jwt_service.validate_access_token(&token).is_err());
}
