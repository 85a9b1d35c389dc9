// API error handling
// Maps the request-handling error taxonomy onto HTTP responses with the
// field-keyed JSON bodies the clients consume

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field name -> human-readable message, serialized as `{"errors": {...}}`
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Email already taken")]
    EmailTaken,

    #[error("No user found with this email")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Required image missing: {field}")]
    MissingImage {
        field: &'static str,
        message: &'static str,
    },

    #[error("Invalid image for {field}: {message}")]
    InvalidImage {
        field: &'static str,
        message: String,
    },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Not the owner of this resource")]
    Forbidden,

    #[error("News not found")]
    NewsNotFound,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Convert to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::EmailTaken
            | ApiError::UserNotFound
            | ApiError::InvalidCredentials
            | ApiError::MissingImage { .. }
            | ApiError::InvalidImage { .. }
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,

            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NewsNotFound => StatusCode::NOT_FOUND,

            ApiError::Database(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Single-field helper for errors keyed to one payload field
    fn field_errors(field: &str, message: &str) -> serde_json::Value {
        json!({ "errors": { field: message } })
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::EmailTaken => Self::field_errors("email", "Email Already Taken"),
            ApiError::UserNotFound => {
                Self::field_errors("email", "No User Found With This Email.")
            },
            ApiError::InvalidCredentials => {
                Self::field_errors("email", "Invalid Credentials...")
            },
            ApiError::MissingImage { field, message } => Self::field_errors(field, message),
            ApiError::InvalidImage { field, message } => Self::field_errors(field, message),
            ApiError::Unauthorized => json!({
                "status": 401,
                "message": "Authentication Required"
            }),
            ApiError::Forbidden => json!({ "message": "Unauthorized" }),
            ApiError::NewsNotFound => json!({
                "status": 404,
                "message": "News Not Found"
            }),
            ApiError::BadRequest(message) => json!({
                "status": 400,
                "message": message
            }),
            ApiError::Database(_) | ApiError::Internal => json!({
                "status": 500,
                "message": "Something Went Wrong! Please Try Again..."
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal detail is logged server-side, never sent to the client
        if let ApiError::Database(detail) = &self {
            tracing::error!("Database failure surfaced to handler: {}", detail);
        }

        (self.status_code(), Json(self.body())).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                fields.insert(field.to_string(), message);
            }
        }
        ApiError::Validation(fields)
    }
}

impl From<crate::models::news::NewsError> for ApiError {
    fn from(err: crate::models::news::NewsError) -> Self {
        match err {
            crate::models::news::NewsError::NotFound => ApiError::NewsNotFound,
            crate::models::news::NewsError::Database(e) => ApiError::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(FieldErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::EmailTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NewsNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_email_taken_body_is_field_keyed() {
        let body = ApiError::EmailTaken.body();
        assert_eq!(body["errors"]["email"], "Email Already Taken");
    }

    #[test]
    fn test_internal_body_is_generic() {
        let body = ApiError::Database("connection refused to 10.0.0.5".to_string()).body();
        let rendered = body.to_string();
        assert!(rendered.contains("Something Went Wrong! Please Try Again..."));
        // No internal detail leaks to the client
        assert!(!rendered.contains("10.0.0.5"));
    }

    #[test]
    fn test_missing_image_body() {
        let err = ApiError::MissingImage {
            field: "image",
            message: "Image Field Is Required",
        };
        assert_eq!(err.body()["errors"]["image"], "Image Field Is Required");
    }

    #[test]
    fn test_validation_errors_map_to_field_messages() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "Name Field Is Required"))]
            name: String,
            #[validate(email(message = "Email Must Be A Valid Email Address"))]
            email: String,
        }

        let probe = Probe {
            name: String::new(),
            email: "nope".to_string(),
        };
        let err = ApiError::from(probe.validate().unwrap_err());

        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields["name"], "Name Field Is Required");
                assert_eq!(fields["email"], "Email Must Be A Valid Email Address");
            },
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
