use crate::pb::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// User-correctable input problem; the message is shown as-is.
    #[error("{0}")]
    Validation(String),

    #[error("authentication failed")]
    AuthenticationFailed(#[source] ClientError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    /// The backend refused the caller's token (or there was none).
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, ServiceError::Client(e) if e.is_auth_rejection())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Client(e) if e.is_not_found())
    }
}
