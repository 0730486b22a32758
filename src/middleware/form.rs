use axum::{
    body::{self, Body},
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Fields of an urlencoded body, read without consuming the request.
///
/// The body is buffered up to `limit` bytes and put back, so the handler can
/// still extract it. Requests with any other content type come back
/// untouched with no fields.
pub async fn peek_form(
    request: Request,
    limit: usize,
) -> Result<(Request, Vec<(String, String)>), Response> {
    if !is_urlencoded(&request) {
        return Ok((request, Vec::new()));
    }

    let (parts, body) = request.into_parts();
    let bytes = body::to_bytes(body, limit).await.map_err(|e| {
        tracing::debug!("failed to buffer form body: {}", e);
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response()
    })?;

    let fields = url::form_urlencoded::parse(&bytes).into_owned().collect();
    Ok((Request::from_parts(parts, Body::from(bytes)), fields))
}

pub fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn is_urlencoded(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}
