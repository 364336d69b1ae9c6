use thiserror::Error;

/// Failure reported by an AI collaborator.
///
/// These carry internal detail and are meant for logs. The session layer
/// rewrites them into user-facing messages.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API credential provided")]
    MissingCredential,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model returned no text")]
    EmptyResponse,

    #[error("malformed extraction response: {0}")]
    Malformed(String),
}

/// Failure preparing an uploaded file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("reading upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a base64 data URL")]
    InvalidDataUrl,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
