// Utility modules for the Newsdesk backend

pub mod api_errors;
pub mod password;
pub mod validation;

pub use api_errors::{ApiError, FieldErrors};
pub use password::{hash_password, verify_password, PasswordError};
pub use validation::{trim_and_validate_field, trim_optional_field};
