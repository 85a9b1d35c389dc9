// Profile handlers: own-profile view and profile image update

use axum::{
    extract::{Extension, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::user::{User, UserError},
    services::media::collect_form,
    utils::ApiError,
};

/// GET /api/profile - The caller's own identity, straight from the token
pub async fn show(Extension(auth_user): Extension<AuthenticatedUser>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": 200,
            "user": {
                "id": auth_user.user_id,
                "name": auth_user.name,
                "email": auth_user.email,
                "profile": auth_user.profile,
            },
        })),
    )
}

/// PUT /api/profile/{id} - Replace the profile image for the caller's account
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let auth_uuid = match Uuid::parse_str(&auth_user.user_id) {
        Ok(id) => id,
        Err(_) => return ApiError::Unauthorized.into_response(),
    };

    // The path id must belong to the caller
    if auth_uuid != user_id {
        return ApiError::Forbidden.into_response();
    }

    let form = match collect_form(&mut multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Rejecting unreadable multipart body: {}", e);
            return ApiError::BadRequest("Invalid multipart body".to_string()).into_response();
        },
    };

    let Some(image) = form.files.get("profile") else {
        return ApiError::MissingImage {
            field: "profile",
            message: "Profile Image Is Required",
        }
        .into_response();
    };

    if let Some(message) = state
        .media_service
        .validate_image(image.size(), image.content_type.as_deref())
    {
        return ApiError::InvalidImage {
            field: "profile",
            message,
        }
        .into_response();
    }

    let image_name = match state.media_service.store(image).await {
        Ok(name) => name,
        Err(e) => {
            tracing::error!("Failed to store profile image: {}", e);
            return ApiError::Internal.into_response();
        },
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    };

    match User::update_profile(&mut conn, user_id, &image_name).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, image = %image_name, "Profile image updated");
            (
                StatusCode::OK,
                Json(json!({
                    "status": 200,
                    "message": "Profile Updated Successfully!",
                })),
            )
                .into_response()
        },
        Err(UserError::NotFound) => {
            // Token subject no longer resolves to a row; treat as stale auth
            tracing::warn!(user_id = %user_id, "Profile update for missing user");
            ApiError::Unauthorized.into_response()
        },
        Err(e) => {
            tracing::error!("Failed to update profile: {}", e);
            ApiError::Database(e.to_string()).into_response()
        },
    }
}
