use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use super::form::{field, peek_form};
use crate::state::AppState;

pub const METHOD_FIELD: &str = "_method";
pub const METHOD_HEADER: &str = "x-http-method-override";

/// Lets HTML forms reach PUT, PATCH and DELETE routes.
///
/// Only POST requests are rewritten, from the `_method` form field or else
/// the `X-HTTP-Method-Override` header. Anything other than PUT, PATCH or
/// DELETE is ignored. Must run before routing, so it wraps the router
/// rather than being added as a route layer.
pub async fn method_override(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    if request.method() != Method::POST {
        return Ok(next.run(request).await);
    }

    let (mut request, fields) = peek_form(request, state.config.api.max_request_size_bytes).await?;

    let requested = field(&fields, METHOD_FIELD).map(str::to_string).or_else(|| {
        request
            .headers()
            .get(METHOD_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    });

    if let Some(method) = requested.as_deref().and_then(overridable) {
        tracing::debug!(path = %request.uri().path(), %method, "method override");
        *request.method_mut() = method;
    }

    Ok(next.run(request).await)
}

fn overridable(value: &str) -> Option<Method> {
    match value.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
