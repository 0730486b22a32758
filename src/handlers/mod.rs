// handlers/mod.rs - route handlers, split by access tier
//
// public:    no auth cookie needed (landing, login, register, health)
// protected: behind `require_auth` (dashboard pages and the JSON API)

pub mod protected;
pub mod public;
pub mod render;

pub use render::PageContext;
