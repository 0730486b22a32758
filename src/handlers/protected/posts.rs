// handlers/protected/posts.rs - /dashboard/posts pages and fragments

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use maud::Markup;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::handlers::render::{page_failure, PostForm};
use crate::handlers::PageContext;
use crate::middleware::{hx_redirect, set_flash, CurrentClient, Flash, FlashKind, HxRequest};
use crate::services::ServiceError;
use crate::state::AppState;
use crate::views;

const POSTS_PATH: &str = "/dashboard/posts";

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    q: String,
}

/// GET /dashboard/posts?q=
///
/// HTMX search requests only get the list fragment back.
pub async fn list(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    ctx: PageContext,
    CurrentClient(client): CurrentClient,
    Query(query): Query<ListQuery>,
) -> Response {
    let posts = match state.posts.list(&client, &query.q).await {
        Ok(posts) => posts,
        Err(e) if hx && e.is_auth_rejection() => {
            tracing::debug!(error = %e, "backend refused token during search");
            return hx_redirect("/login");
        }
        Err(e) => {
            let fallback = AppError::internal_server_error("Failed to load posts");
            return page_failure(e, fallback).into_response();
        }
    };

    if hx {
        return views::post_list(&posts, ctx.csrf()).into_response();
    }
    ctx.render("Posts", true, views::posts_page(&posts, &query.q, ctx.csrf()))
        .into_response()
}

pub async fn create(
    State(state): State<AppState>,
    session: Session,
    CurrentClient(client): CurrentClient,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    if form.title.trim().is_empty() {
        return Err(AppError::bad_request("Title is required"));
    }

    let flash = match state
        .posts
        .create(&client, &form.title, &form.content, form.is_public())
        .await
    {
        Ok(()) => Flash::success("Mission log recorded successfully"),
        Err(e) => {
            tracing::warn!(error = %e, "failed to create post");
            Flash::error("Failed to create post")
        }
    };
    set_flash(&session, flash).await;

    Ok(Redirect::to(POSTS_PATH))
}

/// GET /dashboard/posts/:id, a single post card.
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    CurrentClient(client): CurrentClient,
    Path(id): Path<String>,
) -> Result<Markup, AppError> {
    let post = state.posts.get(&client, &id).await.map_err(|e| lookup_failure(e, &id))?;
    Ok(views::post_item(&post, ctx.csrf()))
}

pub async fn edit(
    State(state): State<AppState>,
    ctx: PageContext,
    CurrentClient(client): CurrentClient,
    Path(id): Path<String>,
) -> Result<Markup, AppError> {
    let post = state.posts.get(&client, &id).await.map_err(|e| lookup_failure(e, &id))?;
    Ok(ctx.render("Edit Log", true, views::edit_post_form(&post, ctx.csrf())))
}

/// A missing post is a 404; auth rejections send the browser to `/login`;
/// other backend refusals are a 502 and transport failures a 500.
fn lookup_failure(err: ServiceError, id: &str) -> AppError {
    if err.is_not_found() {
        tracing::debug!(error = %err, %id, "post not found");
        return AppError::not_found("Post not found");
    }
    AppError::from(err)
}

/// PUT /dashboard/posts/:id, reached from the edit form via `_method`.
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    CurrentClient(client): CurrentClient,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Redirect {
    let flash = match state
        .posts
        .update(&client, &id, &form.title, &form.content, form.is_public())
        .await
    {
        Ok(()) => Flash::success("Mission log updated successfully"),
        Err(e) => {
            tracing::warn!(error = %e, %id, "failed to update post");
            Flash::error("Failed to update log")
        }
    };
    set_flash(&session, flash).await;

    Redirect::to(POSTS_PATH)
}

/// DELETE /dashboard/posts/:id
///
/// HTMX callers swap the card out with the (empty) response body and get
/// the flash out of band. Plain form posts are redirected.
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    HxRequest(hx): HxRequest,
    CurrentClient(client): CurrentClient,
    Path(id): Path<String>,
) -> Response {
    let (message, kind) = match state.posts.delete(&client, &id).await {
        Ok(()) => ("Mission log purged successfully", FlashKind::Success),
        Err(e) => {
            tracing::warn!(error = %e, %id, "failed to delete post");
            ("Failed to purge log", FlashKind::Error)
        }
    };

    if hx {
        return views::flash_message(message, kind).into_response();
    }

    set_flash(
        &session,
        Flash {
            message: message.to_string(),
            kind,
        },
    )
    .await;
    Redirect::to(POSTS_PATH).into_response()
}
