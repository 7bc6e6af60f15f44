use thiserror::Error;

/// Top-level error type for the `parkwatch-api` crate.
///
/// The backend communicates failures purely through HTTP status codes plus
/// a plain-text body, so the taxonomy is small: the request never reached
/// the backend, the backend said no, or the payload didn't parse.
/// `parkwatch-core` converts these into component-local error values.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-2xx response. The body is carried verbatim -- it is the
    /// backend's diagnostic text and is what operators see.
    #[error("Server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The text a status line should display for this error.
    ///
    /// Server errors surface the response body verbatim; everything else
    /// falls back to the `Display` rendering. A 404 on acknowledge, for
    /// example, shows exactly what the backend wrote.
    pub fn detail(&self) -> String {
        match self {
            Self::Server { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` if the request never reached the backend.
    pub fn is_network(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// The HTTP status, if the backend responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
