// handlers/public/mod.rs - routes that work without an auth cookie

pub mod auth;
pub mod home;

pub use auth::{login_get, login_post, logout, register_get, register_post};
pub use home::{health, home};
