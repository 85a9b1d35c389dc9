// Authenticated identity attached to requests by the auth middleware

use serde::{Deserialize, Serialize};

/// Authenticated user information extracted from JWT claims.
/// Resolved from the token only; handlers that need the full row fetch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub token_id: String,
    pub name: String,
    pub email: String,
    pub profile: Option<String>,
    pub exp: u64,
}
