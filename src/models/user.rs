// User database model

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::users;

/// User database model - queryable from database
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub profile: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user for insertion
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Client-facing projection of a user; the password hash is never serialized
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            profile: user.profile,
            created_at: user.created_at,
        }
    }
}

/// Errors for user operations
#[derive(thiserror::Error, Debug)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("User not found")]
    NotFound,

    #[error("Connection pool error")]
    Pool(String),
}

impl User {
    /// Find user by ID
    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> Result<Self, UserError> {
        use crate::schema::users::dsl::*;

        users
            .filter(id.eq(user_id))
            .first::<User>(conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => UserError::NotFound,
                _ => UserError::Database(e),
            })
    }

    /// Find user by email (case-insensitive)
    pub async fn find_by_email(
        conn: &mut AsyncPgConnection,
        email_str: &str,
    ) -> Result<Self, UserError> {
        use crate::schema::users::dsl::*;
        use diesel::PgTextExpressionMethods;

        users
            .filter(email.ilike(email_str))
            .first::<User>(conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => UserError::NotFound,
                _ => UserError::Database(e),
            })
    }

    /// Create a new user
    pub async fn create(conn: &mut AsyncPgConnection, new_user: NewUser) -> Result<Self, UserError> {
        use crate::schema::users::dsl::*;

        diesel::insert_into(users)
            .values(&new_user)
            .get_result::<User>(conn)
            .await
            .map_err(UserError::Database)
    }

    /// Replace the stored profile image filename
    pub async fn update_profile(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        image_name: &str,
    ) -> Result<Self, UserError> {
        use crate::schema::users::dsl::*;

        diesel::update(users.filter(id.eq(user_id)))
            .set((profile.eq(Some(image_name)), updated_at.eq(Utc::now())))
            .get_result::<User>(conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => UserError::NotFound,
                _ => UserError::Database(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_redacts_password_hash() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            profile: None,
            created_at: now,
            updated_at: now,
        };

        let response = UserResponse::from(user.clone());
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("test@example.com"));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
        assert_eq!(response.id, user.id);
    }
}
