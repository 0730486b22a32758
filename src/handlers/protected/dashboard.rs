// handlers/protected/dashboard.rs - GET /dashboard

use axum::extract::State;
use maud::Markup;

use crate::handlers::PageContext;
use crate::middleware::CurrentClient;
use crate::state::AppState;
use crate::views;

/// Profile summary and post count. Neither lookup failing stops the page:
/// the name falls back to "User" and the count to zero.
pub async fn dashboard(
    State(state): State<AppState>,
    ctx: PageContext,
    CurrentClient(mut client): CurrentClient,
) -> Markup {
    match state.auth.current_user(&client).await {
        Ok(Some(user)) => client.set_user(user),
        Ok(None) => {}
        Err(e) => tracing::debug!(error = %e, "could not load current user"),
    }

    let post_count = match state.posts.list(&client, "").await {
        Ok(posts) => posts.len(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to count posts for dashboard");
            0
        }
    };

    ctx.render(
        "Dashboard",
        true,
        views::dashboard(
            client.current_user_name(),
            client.current_user_email(),
            post_count,
            ctx.csrf(),
        ),
    )
}
