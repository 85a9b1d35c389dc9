// Authentication handlers: registration and login

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::{
    app::AppState,
    models::user::{NewUser, User, UserError, UserResponse},
    utils::{hash_password, trim_and_validate_field, verify_password, ApiError, FieldErrors},
};

// =============================================================================
// REQUEST TYPES
// =============================================================================

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name Field Is Required"))]
    pub name: String,

    #[validate(email(message = "Email Must Be A Valid Email Address"))]
    #[validate(length(max = 320, message = "Email Must Be Less Than 320 Characters"))]
    pub email: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password Must Be Between 8 And 128 Characters"
    ))]
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email Must Be A Valid Email Address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password Field Is Required"))]
    pub password: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// POST /api/auth/register - Create a new user account
pub async fn register(
    State(state): State<AppState>,
    Json(register_req): Json<RegisterRequest>,
) -> impl IntoResponse {
    // Normalize before validating; emails are matched case-insensitively
    let register_req = RegisterRequest {
        name: register_req.name,
        email: register_req.email.trim().to_lowercase(),
        password: register_req.password,
    };

    if let Err(validation_errors) = register_req.validate() {
        return ApiError::from(validation_errors).into_response();
    }

    // Validate and trim name
    let name = match trim_and_validate_field(&register_req.name, true) {
        Ok(name) => name,
        Err(_) => {
            let mut fields = FieldErrors::new();
            fields.insert("name".to_string(), "Name Field Is Required".to_string());
            return ApiError::Validation(fields).into_response();
        },
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    };

    // Email uniqueness check
    match User::find_by_email(&mut conn, &register_req.email).await {
        Ok(_existing_user) => {
            return ApiError::EmailTaken.into_response();
        },
        Err(UserError::NotFound) => {
            // Good, email doesn't exist
        },
        Err(e) => {
            tracing::error!("Error checking email uniqueness: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    }

    let password_hash = match hash_password(&register_req.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return ApiError::Internal.into_response();
        },
    };

    let user = match User::create(
        &mut conn,
        NewUser {
            name,
            email: register_req.email,
            password_hash,
        },
    )
    .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    };

    tracing::info!(user_id = %user.id, "User registered");

    (
        StatusCode::OK,
        Json(json!({
            "status": 200,
            "message": "User Created Successfully",
            "user": UserResponse::from(user),
        })),
    )
        .into_response()
}

/// POST /api/auth/login - Verify credentials and issue a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(login_req): Json<LoginRequest>,
) -> impl IntoResponse {
    let login_req = LoginRequest {
        email: login_req.email.trim().to_lowercase(),
        password: login_req.password,
    };

    if let Err(validation_errors) = login_req.validate() {
        return ApiError::from(validation_errors).into_response();
    }

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    };

    let user = match User::find_by_email(&mut conn, &login_req.email).await {
        Ok(user) => user,
        Err(UserError::NotFound) => {
            tracing::warn!(email = %login_req.email, "Login attempt for unknown email");
            return ApiError::UserNotFound.into_response();
        },
        Err(e) => {
            tracing::error!("Database error during login: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    };

    match verify_password(&login_req.password, &user.password_hash) {
        Ok(true) => {
            // Password is correct
        },
        Ok(false) => {
            tracing::warn!(user_id = %user.id, "Login attempt with wrong password");
            return ApiError::InvalidCredentials.into_response();
        },
        Err(e) => {
            tracing::error!("Password verification error: {}", e);
            return ApiError::Internal.into_response();
        },
    }

    let token = match state.jwt_service.generate_access_token(
        &user.id.to_string(),
        &user.name,
        &user.email,
        user.profile.as_deref(),
    ) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to generate access token: {}", e);
            return ApiError::Internal.into_response();
        },
    };

    tracing::info!(user_id = %user.id, "Login successful");

    (
        StatusCode::OK,
        Json(json!({
            "message": "Log In Successfully",
            "access_token": format!("Bearer {}", token),
        })),
    )
        .into_response()
}
