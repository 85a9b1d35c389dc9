// News database model and API projections

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{news, users};

/// News database model - queryable from database
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = news)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New article for insertion
#[derive(Debug, Insertable)]
#[diesel(table_name = news)]
pub struct NewNews {
    pub title: String,
    pub description: String,
    pub image: String,
    pub user_id: Uuid,
}

/// Changeset for article updates; `image` stays untouched when None
#[derive(Debug, AsChangeset)]
#[diesel(table_name = news)]
pub struct NewsChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Owning-user projection joined onto article listings
#[derive(Debug, Clone, Serialize, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewsAuthor {
    pub id: Uuid,
    pub name: String,
    pub profile: Option<String>,
}

/// Client-facing article shape: row fields flattened with the writer attached.
/// The mapping is part of the API contract and must stay stable.
#[derive(Debug, Clone, Serialize)]
pub struct NewsResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub writer: NewsAuthor,
}

impl NewsResponse {
    pub fn from_parts(article: News, writer: NewsAuthor) -> Self {
        Self {
            id: article.id,
            title: article.title,
            description: article.description,
            image: article.image,
            created_at: article.created_at,
            updated_at: article.updated_at,
            writer,
        }
    }
}

/// Listing metadata returned alongside every page
#[derive(Debug, Clone, Serialize)]
pub struct PageMetadata {
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    #[serde(rename = "currentPage")]
    pub current_page: i64,
    #[serde(rename = "currentLimit")]
    pub current_limit: i64,
}

/// Query-string pagination parameters
#[derive(Debug, Clone, Deserialize)]
pub struct NewsPagination {
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}

impl Default for NewsPagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl NewsPagination {
    /// Coerce parameters to valid bounds: page >= 1, 1 <= limit <= 100.
    /// Out-of-range limits fall back to the default of 10.
    pub fn normalized(&self) -> Self {
        let page = if self.page <= 0 { 1 } else { self.page };
        let limit = if self.limit <= 0 || self.limit > 100 {
            default_limit()
        } else {
            self.limit
        };
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn metadata(&self, total: i64) -> PageMetadata {
        PageMetadata {
            total_pages: (total + self.limit - 1) / self.limit,
            current_page: self.page,
            current_limit: self.limit,
        }
    }
}

/// Errors for news operations
#[derive(thiserror::Error, Debug)]
pub enum NewsError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("News not found")]
    NotFound,
}

impl News {
    /// Load a page of articles joined with their writers, oldest first
    pub async fn find_page(
        conn: &mut AsyncPgConnection,
        pagination: &NewsPagination,
    ) -> Result<Vec<(News, NewsAuthor)>, NewsError> {
        news::table
            .inner_join(users::table)
            .select((News::as_select(), NewsAuthor::as_select()))
            .order(news::created_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset())
            .load::<(News, NewsAuthor)>(conn)
            .await
            .map_err(NewsError::Database)
    }

    /// Total article count, for page metadata
    pub async fn count_all(conn: &mut AsyncPgConnection) -> Result<i64, NewsError> {
        news::table
            .count()
            .get_result::<i64>(conn)
            .await
            .map_err(NewsError::Database)
    }

    /// Fetch one article by id
    pub async fn find_by_id(conn: &mut AsyncPgConnection, news_id: Uuid) -> Result<Self, NewsError> {
        news::table
            .filter(news::id.eq(news_id))
            .first::<News>(conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => NewsError::NotFound,
                _ => NewsError::Database(e),
            })
    }

    /// Fetch one article by id joined with its writer
    pub async fn find_by_id_with_writer(
        conn: &mut AsyncPgConnection,
        news_id: Uuid,
    ) -> Result<(News, NewsAuthor), NewsError> {
        news::table
            .inner_join(users::table)
            .filter(news::id.eq(news_id))
            .select((News::as_select(), NewsAuthor::as_select()))
            .first::<(News, NewsAuthor)>(conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => NewsError::NotFound,
                _ => NewsError::Database(e),
            })
    }

    /// Insert a new article
    pub async fn create(conn: &mut AsyncPgConnection, new_news: NewNews) -> Result<Self, NewsError> {
        diesel::insert_into(news::table)
            .values(&new_news)
            .get_result::<News>(conn)
            .await
            .map_err(NewsError::Database)
    }

    /// Apply a changeset to an existing article
    pub async fn update(
        conn: &mut AsyncPgConnection,
        news_id: Uuid,
        changeset: NewsChangeset,
    ) -> Result<Self, NewsError> {
        diesel::update(news::table.filter(news::id.eq(news_id)))
            .set(&changeset)
            .get_result::<News>(conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => NewsError::NotFound,
                _ => NewsError::Database(e),
            })
    }

    /// Delete an article row
    pub async fn delete(conn: &mut AsyncPgConnection, news_id: Uuid) -> Result<(), NewsError> {
        diesel::delete(news::table.filter(news::id.eq(news_id)))
            .execute(conn)
            .await
            .map_err(NewsError::Database)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = NewsPagination::default();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 10);
    }

    #[test]
    fn test_pagination_clamps_page() {
        assert_eq!(NewsPagination { page: 0, limit: 10 }.normalized().page, 1);
        assert_eq!(NewsPagination { page: -5, limit: 10 }.normalized().page, 1);
        assert_eq!(NewsPagination { page: 7, limit: 10 }.normalized().page, 7);
    }

    #[test]
    fn test_pagination_clamps_limit() {
        assert_eq!(NewsPagination { page: 1, limit: 0 }.normalized().limit, 10);
        assert_eq!(NewsPagination { page: 1, limit: -1 }.normalized().limit, 10);
        assert_eq!(NewsPagination { page: 1, limit: 500 }.normalized().limit, 10);
        assert_eq!(NewsPagination { page: 1, limit: 100 }.normalized().limit, 100);
        assert_eq!(NewsPagination { page: 1, limit: 25 }.normalized().limit, 25);
    }

    #[test]
    fn test_pagination_offset() {
        let pagination = NewsPagination { page: 3, limit: 10 }.normalized();
        assert_eq!(pagination.offset(), 20);
    }

    #[test]
    fn test_page_metadata_rounds_up() {
        let pagination = NewsPagination { page: 1, limit: 10 }.normalized();
        assert_eq!(pagination.metadata(0).total_pages, 0);
        assert_eq!(pagination.metadata(10).total_pages, 1);
        assert_eq!(pagination.metadata(11).total_pages, 2);
        assert_eq!(pagination.metadata(95).total_pages, 10);
    }

    #[test]
    fn test_news_response_shape_is_stable() {
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        let article = News {
            id: Uuid::new_v4(),
            title: "Launch Day".to_string(),
            description: "We shipped.".to_string(),
            image: "1234567890.png".to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        let writer = NewsAuthor {
            id: user_id,
            name: "Reporter".to_string(),
            profile: None,
        };

        let response = NewsResponse::from_parts(article, writer);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["title"], "Launch Day");
        assert_eq!(json["image"], "1234567890.png");
        assert_eq!(json["writer"]["name"], "Reporter");
        // The owning user's hash or email never leak through listings
        assert!(json["writer"].get("email").is_none());
        assert!(json["writer"].get("password_hash").is_none());
    }
}
