use reqwest::StatusCode;

use crate::session::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Request failed ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// Message the server put in the response body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized(msg) | ClientError::Api { message: msg, .. }
                if !msg.is_empty() =>
            {
                Some(msg)
            }
            _ => None,
        }
    }

    /// Text for an inline error: the server's message, else `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Invalid(msg) => msg.clone(),
            _ => self
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Pull a human-readable message out of an error response body.
///
/// The server answers failures either with plain text or with a JSON object
/// carrying an `error` field; a bare JSON string is accepted as well.
pub fn read_error_body(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => map
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        _ => trimmed.to_string(),
    }
}
