use thiserror::Error;

/// Rejection of an inbound lookup before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("City parameter is required")]
    MissingCity,
}

/// Why a call to the upstream weather provider failed.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request URL is stripped; it carries the API key.
    #[error("failed to reach weather provider: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("weather provider responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected weather provider payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather provider payload contained no weather conditions")]
    NoConditions,
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

impl UpstreamError {
    /// Build a `Status` error, keeping only the head of the response body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status { status, body: truncate_body(body) }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
