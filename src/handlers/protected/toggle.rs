// handlers/protected/toggle.rs - POST /api/posts/:id/toggle

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use maud::html;

use crate::error::{AppError, JsonError};
use crate::handlers::PageContext;
use crate::middleware::{CurrentClient, FlashKind, HxRequest};
use crate::state::AppState;
use crate::views;

/// Flips a post's visibility.
///
/// HTMX gets the refreshed card plus an out-of-band flash, always with 200
/// so the swap happens. Other callers get JSON errors or a redirect.
pub async fn toggle_post(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    ctx: PageContext,
    client: Option<CurrentClient>,
    Path(id): Path<String>,
) -> Response {
    let Some(CurrentClient(client)) = client else {
        return JsonError::from(AppError::unauthorized("Unauthorized")).into_response();
    };

    let toggled = state.posts.toggle_public(&client, &id).await;
    if let Err(e) = &toggled {
        tracing::warn!(error = %e, %id, "failed to toggle post visibility");
    }

    if !hx {
        return match toggled {
            Ok(()) => Redirect::to("/dashboard/posts").into_response(),
            Err(e) if e.is_auth_rejection() => JsonError::from(e).into_response(),
            Err(_) => {
                JsonError(AppError::internal_server_error("Failed to toggle visibility"))
                    .into_response()
            }
        };
    }

    if toggled.is_err() {
        return views::flash_message("Failed to toggle visibility", FlashKind::Error).into_response();
    }

    match state.posts.get(&client, &id).await {
        Ok(post) => html! {
            (views::post_item(&post, ctx.csrf()))
            (views::flash_message("Visibility matrix updated", FlashKind::Success))
        }
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, %id, "post vanished after toggle");
            views::flash_message("Log disappeared during transmission", FlashKind::Error)
                .into_response()
        }
    }
}
