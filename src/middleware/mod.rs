pub mod auth;
pub mod csrf;
pub mod flash;
pub mod form;
pub mod htmx;
pub mod method_override;

pub use auth::{auth_cookie, expired_auth_cookie, optional_client, require_auth, CurrentClient, AUTH_COOKIE};
pub use csrf::{csrf_middleware, CsrfToken};
pub use flash::{flash_middleware, set_flash, Flash, FlashKind};
pub use htmx::{hx_redirect, HxRequest};
pub use method_override::method_override;
