use thiserror::Error;

pub type Result<T> = anyhow::Result<T>;

/// Failure of a single model tier in the chat response chain.
///
/// The orchestrator never surfaces these to the caller; it records them for
/// diagnostics and advances to the next tier. `Timeout` is distinguished so
/// the fallback responder can loosen its fuzzy-match threshold.
#[derive(Debug, Error)]
pub enum TierError {
    #[error("no API key configured")]
    MissingCredentials,
    #[error("request timed out")]
    Timeout,
    #[error("endpoint returned status {0}")]
    Status(u16),
    #[error("response payload missing `{0}`")]
    MalformedPayload(&'static str),
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
}

impl TierError {
    /// Maps a reqwest failure onto the tier taxonomy, keeping timeouts apart.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TierError::Timeout
        } else {
            TierError::Transport(err)
        }
    }
}

/// Caller-input failure of the chat pipeline, reported before any tier runs.
#[derive(Debug, Error)]
pub enum RespondError {
    #[error("no message provided")]
    EmptyMessage,
}
