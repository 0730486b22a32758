use reqwest::StatusCode;

/// Failures surfaced by the backend client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Raised before any network I/O when the operation needs a bearer token.
    #[error("unauthorized")]
    Unauthorized,

    #[error("backend transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend rejected {operation} with status {status}: {body}")]
    Rejected {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// True when the backend refused the caller's credentials.
    pub fn is_auth_rejection(&self) -> bool {
        match self {
            ClientError::Unauthorized => true,
            ClientError::Rejected { status, .. } => {
                *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
            }
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Rejected { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}
