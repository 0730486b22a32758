// pb/mod.rs - PocketBase-compatible backend client
//
// Client (shared pool) → ScopedClient (one request's token) → REST calls.

pub mod claims;
pub mod client;
pub mod error;
pub mod models;

pub use claims::unverified_user_id;
pub use client::{Client, ScopedClient};
pub use error::ClientError;
pub use models::{NewUser, Post, PostPatch, User};
