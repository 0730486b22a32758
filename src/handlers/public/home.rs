// handlers/public/home.rs - GET / and GET /health

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;
use serde_json::{json, Value};

use crate::handlers::PageContext;
use crate::middleware::optional_client;
use crate::state::AppState;
use crate::views;

/// Landing page. The auth cookie only decides which nav and CTA to show.
pub async fn home(State(state): State<AppState>, jar: CookieJar, ctx: PageContext) -> Markup {
    let client = optional_client(&state, &jar);
    let authenticated = client.is_authenticated();
    ctx.render("Mission Log", authenticated, views::index(authenticated))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": { "status": "ok" }
    }))
}
