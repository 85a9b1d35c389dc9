// Service layer for the Newsdesk backend

pub mod jwt;
pub mod media;

pub use jwt::{JwtConfig, JwtError, JwtService};
pub use media::{collect_form, MediaConfig, MediaError, MediaService, UploadForm, UploadedFile};
