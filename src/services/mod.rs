pub mod auth_service;
pub mod error;
pub mod post_service;

pub use auth_service::{AuthService, RepoAuthService, MIN_PASSWORD_LENGTH};
pub use error::ServiceError;
pub use post_service::{PostService, RepoPostService};
