use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, MemoryStore, SessionManagerLayer};

use crate::handlers::{protected, public};
use crate::middleware::{csrf_middleware, flash_middleware, method_override, require_auth};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "mission_log.sid";

/// Full application service.
///
/// Method override wraps the routed app from outside so the rewritten
/// method is what routing sees.
pub fn app(state: AppState) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_secure(state.config.secure_cookies())
        .with_same_site(SameSite::Lax)
        .with_http_only(true);

    let routes = Router::new()
        .merge(public_routes())
        .merge(dashboard_routes(state.clone()))
        .merge(api_routes(state.clone()))
        // Global middleware, innermost first
        .layer(from_fn_with_state(state.clone(), csrf_middleware))
        .layer(from_fn(flash_middleware))
        .layer(sessions)
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    Router::new()
        .fallback_service(routes)
        .layer(from_fn_with_state(state, method_override))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home))
        .route("/health", get(public::health))
        .route("/login", get(public::login_get).post(public::login_post))
        .route("/register", get(public::register_get).post(public::register_post))
        .route("/logout", get(public::logout))
}

fn dashboard_routes(state: AppState) -> Router<AppState> {
    use protected::posts;

    Router::new()
        .route("/dashboard", get(protected::dashboard))
        .route("/dashboard/posts", get(posts::list).post(posts::create))
        .route(
            "/dashboard/posts/:id",
            get(posts::show).put(posts::update).delete(posts::delete),
        )
        .route("/dashboard/posts/:id/edit", get(posts::edit))
        .route_layer(from_fn_with_state(state, require_auth))
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/posts/:id/toggle", post(protected::toggle_post))
        .route_layer(from_fn_with_state(state, require_auth))
}
