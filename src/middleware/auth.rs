use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::pb::ScopedClient;
use crate::state::AppState;

/// Cookie holding the backend bearer token.
pub const AUTH_COOKIE: &str = "pb_auth";

/// Gate for protected route groups.
///
/// No cookie (or an empty one) redirects to `/login` without touching the
/// backend. Otherwise a request-scoped client carrying the token is put in
/// the request extensions. The token is not verified here; the backend
/// rejects bad tokens on the first call that uses it.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match jar.get(AUTH_COOKIE).map(Cookie::value) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => {
            tracing::debug!(path = %request.uri().path(), "no auth cookie, redirecting to login");
            return Redirect::to("/login").into_response();
        }
    };

    let client = state.client.with_token(token);
    if client.user_id().is_none() {
        tracing::debug!("auth token payload did not yield a user id");
    }
    request.extensions_mut().insert(client);

    next.run(request).await
}

/// Extractor for the client installed by [`require_auth`].
///
/// Rejects with a redirect to `/login`. Take `Option<CurrentClient>` where a
/// different rejection is wanted.
#[derive(Debug, Clone)]
pub struct CurrentClient(pub ScopedClient);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentClient
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ScopedClient>()
            .cloned()
            .map(CurrentClient)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Client for pages that work either way: scoped to the cookie token when
/// present, anonymous otherwise.
pub fn optional_client(state: &AppState, jar: &CookieJar) -> ScopedClient {
    match jar.get(AUTH_COOKIE).map(Cookie::value) {
        Some(token) if !token.is_empty() => state.client.with_token(token),
        _ => state.client.anonymous(),
    }
}

pub fn auth_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Removal cookie; the path has to match the one used when setting it.
pub fn expired_auth_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, "")).path("/").build()
}
