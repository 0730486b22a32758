pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pb;
pub mod repositories;
pub mod services;
pub mod state;
pub mod views;

#[cfg(test)]
pub mod testing;

pub use app::app;
pub use state::AppState;
