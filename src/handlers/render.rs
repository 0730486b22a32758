// handlers/render.rs - glue between handlers and the layout

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use maud::Markup;
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::{CsrfToken, Flash};
use crate::services::ServiceError;
use crate::views::{self, Page};

/// Request data every full page needs: the CSRF token and any pending flash.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub csrf: CsrfToken,
    pub flash: Option<Flash>,
}

#[async_trait]
impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(PageContext {
            csrf: parts.extensions.get::<CsrfToken>().cloned().unwrap_or_default(),
            flash: parts.extensions.get::<Flash>().cloned(),
        })
    }
}

impl PageContext {
    pub fn csrf(&self) -> &str {
        self.csrf.as_str()
    }

    /// Wraps `content` in the site layout.
    pub fn render(&self, title: &str, is_authenticated: bool, content: Markup) -> Markup {
        let page = Page {
            title: title.to_string(),
            is_authenticated,
            csrf: self.csrf.0.clone(),
            flash: self.flash.clone(),
        };
        views::layout(&page, content)
    }
}

/// Post form shared by create and update. Checkboxes only submit when ticked.
#[derive(Debug, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub public: Option<String>,
}

impl PostForm {
    pub fn is_public(&self) -> bool {
        self.public.as_deref() == Some("on")
    }
}

/// Page-level failure: backend token rejections go back to the login page,
/// everything else becomes `fallback`.
pub fn page_failure(err: ServiceError, fallback: AppError) -> AppError {
    if err.is_auth_rejection() {
        return AppError::unauthorized("Unauthorized");
    }
    tracing::warn!(error = %err, "{}", fallback.message());
    fallback
}

/// Message for a form re-render. Validation text is shown verbatim; other
/// failures are logged and replaced by `fallback`.
pub fn form_message(err: &ServiceError, fallback: &str) -> String {
    match err {
        ServiceError::Validation(msg) => msg.clone(),
        ServiceError::AuthenticationFailed(_) => err.to_string(),
        ServiceError::Client(e) => {
            tracing::warn!(error = %e, "{}", fallback);
            fallback.to_string()
        }
    }
}
