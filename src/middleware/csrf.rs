use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use super::form::{field, peek_form};
use crate::error::AppError;
use crate::state::AppState;

pub const CSRF_COOKIE: &str = "csrf_";
pub const CSRF_FIELD: &str = "_csrf";
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Token for the current request, embedded in forms and `hx-headers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfToken(pub String);

impl CsrfToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CsrfToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<CsrfToken>().cloned().unwrap_or_default())
    }
}

/// Double-submit cookie check.
///
/// Every response to a client without a token cookie issues one. When the
/// check is enabled, unsafe methods must echo the cookie value in the
/// `_csrf` form field or the `X-CSRF-Token` header.
pub async fn csrf_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = jar
        .get(CSRF_COOKIE)
        .map(Cookie::value)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    if state.config.security.csrf_enabled && !is_safe(request.method()) {
        let (buffered, fields) =
            match peek_form(request, state.config.api.max_request_size_bytes).await {
                Ok(pair) => pair,
                Err(response) => return response,
            };
        request = buffered;

        let submitted = field(&fields, CSRF_FIELD).map(str::to_string).or_else(|| {
            request
                .headers()
                .get(CSRF_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        });

        let valid = matches!((&existing, &submitted), (Some(expected), Some(got)) if expected == got);
        if !valid {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "rejected request with missing or mismatched CSRF token"
            );
            return AppError::forbidden("Invalid CSRF token").into_response();
        }
    }

    let token = existing
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
    request.extensions_mut().insert(CsrfToken(token.clone()));

    let response = next.run(request).await;

    if existing.is_none() {
        let cookie = Cookie::build((CSRF_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(state.config.secure_cookies())
            .build();
        (jar.add(cookie), response).into_response()
    } else {
        response
    }
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE)
}
