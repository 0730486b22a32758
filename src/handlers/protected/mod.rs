// handlers/protected/mod.rs - routes behind the auth gate
//
// Every handler here extracts `CurrentClient`, which `require_auth` installs.

pub mod dashboard;
pub mod posts;
pub mod toggle;

pub use dashboard::dashboard;
pub use toggle::toggle_post;
