use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};

pub const HX_REQUEST: &str = "hx-request";
pub const HX_REDIRECT: &str = "hx-redirect";

/// Full-page navigation for an HTMX caller. A plain 303 would be followed
/// by the XHR and its body swapped into the target.
pub fn hx_redirect(location: &'static str) -> Response {
    [(HX_REDIRECT, location)].into_response()
}

/// Whether the request came from HTMX (`HX-Request: true`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HxRequest(pub bool);

#[async_trait]
impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flag = parts
            .headers
            .get(HX_REQUEST)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "true")
            .unwrap_or(false);
        Ok(HxRequest(flag))
    }
}
