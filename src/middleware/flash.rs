use axum::{extract::Request, middleware::Next, response::Response};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const FLASH_KEY: &str = "flash";
const FLASH_TYPE_KEY: &str = "flash_type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    #[default]
    Info,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
            FlashKind::Info => "info",
        }
    }
}

/// One-shot message carried across a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub message: String,
    pub kind: FlashKind,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FlashKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FlashKind::Error,
        }
    }
}

/// Stores a flash for the next page this session renders.
///
/// Session store failures only lose the message, so they are logged and
/// swallowed.
pub async fn set_flash(session: &Session, flash: Flash) {
    if let Err(e) = session.insert(FLASH_KEY, flash.message).await {
        tracing::warn!("failed to store flash message: {}", e);
        return;
    }
    if let Err(e) = session.insert(FLASH_TYPE_KEY, flash.kind).await {
        tracing::warn!("failed to store flash type: {}", e);
    }
}

/// Moves a pending flash out of the session and into the request
/// extensions, so it is shown exactly once.
pub async fn flash_middleware(session: Session, mut request: Request, next: Next) -> Response {
    match take_flash(&session).await {
        Ok(Some(flash)) => {
            request.extensions_mut().insert(flash);
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("failed to read flash message: {}", e),
    }

    next.run(request).await
}

async fn take_flash(session: &Session) -> Result<Option<Flash>, tower_sessions::session::Error> {
    let message: Option<String> = session.remove(FLASH_KEY).await?;
    let kind: Option<FlashKind> = session.remove(FLASH_TYPE_KEY).await?;

    Ok(message.filter(|m| !m.is_empty()).map(|message| Flash {
        message,
        kind: kind.unwrap_or_default(),
    }))
}
