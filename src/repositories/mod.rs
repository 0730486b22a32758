pub mod auth;
pub mod post;

pub use auth::{AuthRepository, PbAuthRepository};
pub use post::{PbPostRepository, PostRepository};
