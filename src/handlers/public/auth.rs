// handlers/public/auth.rs - login, registration and logout

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use maud::Markup;
use serde::Deserialize;

use crate::handlers::{render::form_message, PageContext};
use crate::middleware::{auth_cookie, expired_auth_cookie};
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    registered: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default, rename = "passwordConfirm")]
    password_confirm: String,
    #[serde(default)]
    name: String,
}

pub async fn login_get(ctx: PageContext, Query(query): Query<LoginQuery>) -> Markup {
    let registered = query.registered.as_deref() == Some("true");
    ctx.render("Login", false, views::login("", "", registered, ctx.csrf()))
}

/// POST /login
///
/// Failures re-render the form with the entered email kept. On success the
/// backend token goes into the `pb_auth` cookie.
pub async fn login_post(
    State(state): State<AppState>,
    jar: CookieJar,
    ctx: PageContext,
    Form(form): Form<LoginForm>,
) -> Response {
    let client = state.client.anonymous();
    match state.auth.login(&client, &form.email, &form.password).await {
        Ok(token) => {
            let cookie = auth_cookie(token, state.config.secure_cookies());
            (jar.add(cookie), Redirect::to("/dashboard")).into_response()
        }
        Err(e) => {
            let message = form_message(&e, "authentication failed");
            ctx.render("Login", false, views::login(&message, &form.email, false, ctx.csrf()))
                .into_response()
        }
    }
}

pub async fn register_get(ctx: PageContext) -> Markup {
    ctx.render("Register", false, views::register("", "", "", ctx.csrf()))
}

pub async fn register_post(
    State(state): State<AppState>,
    ctx: PageContext,
    Form(form): Form<RegisterForm>,
) -> Response {
    let rerender = |message: &str| {
        ctx.render(
            "Register",
            false,
            views::register(message, &form.email, &form.name, ctx.csrf()),
        )
        .into_response()
    };

    if form.password != form.password_confirm {
        return rerender("Passwords do not match");
    }

    let client = state.client.anonymous();
    match state
        .auth
        .register(&client, &form.email, &form.password, &form.name)
        .await
    {
        Ok(()) => Redirect::to("/login?registered=true").into_response(),
        Err(e) => rerender(&form_message(&e, "registration failed")),
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(expired_auth_cookie()), Redirect::to("/"))
}
