use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between receiving tool arguments and handing
/// back an upstream payload. All variants end up in the dispatcher's error
/// envelope; none of them are retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed a locally checked constraint. Raised before any network call.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The HTTP call itself failed, or returned a non-2xx status without a
    /// structured error body.
    #[error("HTTP error: {0}")]
    Transport(String),

    /// The upstream service answered with a structured `error` object.
    #[error("{operation} failed: {message}")]
    Generation {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    /// A request body could not be serialized. Upstream payloads are never
    /// decoded into fixed shapes, so this only fires on the way out.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
