// News CRUD handlers

use axum::{
    extract::{Extension, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    middleware::auth::AuthenticatedUser,
    models::news::{NewNews, News, NewsAuthor, NewsChangeset, NewsPagination, NewsResponse},
    services::media::{collect_form, UploadForm},
    utils::{trim_optional_field, ApiError},
};

// =============================================================================
// PAYLOAD TYPES
// =============================================================================

/// Text portion of the multipart article form, same schema for create and
/// update
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct NewsPayload {
    #[validate(length(min = 1, max = 255, message = "Title Field Is Required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description Field Is Required"))]
    pub description: String,
}

impl NewsPayload {
    fn from_form(form: &UploadForm) -> Self {
        Self {
            title: trim_optional_field(form.fields.get("title")).unwrap_or_default(),
            description: trim_optional_field(form.fields.get("description")).unwrap_or_default(),
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// GET /api/news?page&limit - Paginated article listing, public
pub async fn index(
    State(state): State<AppState>,
    Query(pagination): Query<NewsPagination>,
) -> impl IntoResponse {
    let pagination = pagination.normalized();

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    };

    let rows = match News::find_page(&mut conn, &pagination).await {
        Ok(rows) => rows,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let total = match News::count_all(&mut conn).await {
        Ok(total) => total,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let news: Vec<NewsResponse> = rows
        .into_iter()
        .map(|(article, writer)| NewsResponse::from_parts(article, writer))
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "status": 200,
            "news": news,
            "metadata": pagination.metadata(total),
        })),
    )
        .into_response()
}

/// POST /api/news - Create an article with its image, owner = caller
pub async fn store(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let form = match collect_form(&mut multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Rejecting unreadable multipart body: {}", e);
            return ApiError::BadRequest("Invalid multipart body".to_string()).into_response();
        },
    };

    let payload = NewsPayload::from_form(&form);
    if let Err(validation_errors) = payload.validate() {
        return ApiError::from(validation_errors).into_response();
    }

    let Some(image) = form.files.get("image") else {
        return ApiError::MissingImage {
            field: "image",
            message: "Image Field Is Required",
        }
        .into_response();
    };

    if let Some(message) = state
        .media_service
        .validate_image(image.size(), image.content_type.as_deref())
    {
        return ApiError::InvalidImage {
            field: "image",
            message,
        }
        .into_response();
    }

    let user_uuid = match Uuid::parse_str(&auth_user.user_id) {
        Ok(id) => id,
        Err(_) => return ApiError::Unauthorized.into_response(),
    };

    let image_name = match state.media_service.store(image).await {
        Ok(name) => name,
        Err(e) => {
            tracing::error!("Failed to store uploaded image: {}", e);
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

    let article = match News::create(
        &mut conn,
        NewNews {
            title: payload.title,
            description: payload.description,
            image: image_name,
            user_id: user_uuid,
        },
    )
    .await
    {
        Ok(article) => article,
        Err(e) => return ApiError::from(e).into_response(),
    };

    tracing::info!(news_id = %article.id, user_id = %user_uuid, "News created");

    let writer = NewsAuthor {
        id: user_uuid,
        name: auth_user.name.clone(),
        profile: auth_user.profile.clone(),
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": 200,
            "message": "News Created Successfully!",
            "news": NewsResponse::from_parts(article, writer),
        })),
    )
        .into_response()
}

/// GET /api/news/{id} - Single article with its writer, public
pub async fn show(State(state): State<AppState>, Path(news_id): Path<Uuid>) -> impl IntoResponse {
    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    };

    match News::find_by_id_with_writer(&mut conn, news_id).await {
        Ok((article, writer)) => (
            StatusCode::OK,
            Json(json!({
                "status": 200,
                "news": NewsResponse::from_parts(article, writer),
            })),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// PUT /api/news/{id} - Update an owned article; image replacement optional
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(news_id): Path<Uuid>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let form = match collect_form(&mut multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Rejecting unreadable multipart body: {}", e);
            return ApiError::BadRequest("Invalid multipart body".to_string()).into_response();
        },
    };

    let user_uuid = match Uuid::parse_str(&auth_user.user_id) {
        Ok(id) => id,
        Err(_) => return ApiError::Unauthorized.into_response(),
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    };

    let existing = match News::find_by_id(&mut conn, news_id).await {
        Ok(article) => article,
        Err(e) => return ApiError::from(e).into_response(),
    };

    // Only the owning user may touch the article
    if existing.user_id != user_uuid {
        return ApiError::Forbidden.into_response();
    }

    let payload = NewsPayload::from_form(&form);
    if let Err(validation_errors) = payload.validate() {
        return ApiError::from(validation_errors).into_response();
    }

    let mut new_image: Option<String> = None;
    if let Some(image) = form.files.get("image") {
        if let Some(message) = state
            .media_service
            .validate_image(image.size(), image.content_type.as_deref())
        {
            return ApiError::InvalidImage {
                field: "image",
                message,
            }
            .into_response();
        }

        match state.media_service.store(image).await {
            Ok(name) => new_image = Some(name),
            Err(e) => {
                tracing::error!("Failed to store uploaded image: {}", e);
                return ApiError::Internal.into_response();
            },
        }
    }

    let changeset = NewsChangeset {
        title: Some(payload.title),
        description: Some(payload.description),
        image: new_image.clone(),
        updated_at: Utc::now(),
    };

    if let Err(e) = News::update(&mut conn, news_id, changeset).await {
        return ApiError::from(e).into_response();
    }

    // The replaced file is cleaned up fire-and-forget; a failed delete must
    // never fail the update
    if new_image.is_some() {
        let media = state.media_service.clone();
        let old_image = existing.image.clone();
        tokio::spawn(async move {
            media.remove(&old_image).await;
        });
    }

    tracing::info!(news_id = %news_id, user_id = %user_uuid, "News updated");

    (
        StatusCode::OK,
        Json(json!({ "message": "News Updated Successfully!" })),
    )
        .into_response()
}

/// DELETE /api/news/{id} - Delete an owned article and its stored image
pub async fn destroy(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(news_id): Path<Uuid>,
) -> impl IntoResponse {
    let user_uuid = match Uuid::parse_str(&auth_user.user_id) {
        Ok(id) => id,
        Err(_) => return ApiError::Unauthorized.into_response(),
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return ApiError::Database(e.to_string()).into_response();
        },
    };

    let existing = match News::find_by_id(&mut conn, news_id).await {
        Ok(article) => article,
        Err(e) => return ApiError::from(e).into_response(),
    };

    if existing.user_id != user_uuid {
        return ApiError::Forbidden.into_response();
    }

    // Best-effort: a missing file is a no-op, a failed delete is only logged
    state.media_service.remove(&existing.image).await;

    if let Err(e) = News::delete(&mut conn, news_id).await {
        return ApiError::from(e).into_response();
    }

    tracing::info!(news_id = %news_id, user_id = %user_uuid, "News deleted");

    (
        StatusCode::OK,
        Json(json!({ "message": "News Deleted Successfully!" })),
    )
        .into_response()
}
