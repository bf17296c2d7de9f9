use thiserror::Error;

/// Failures from the books / Toggl proxy, each carrying the message shown to the user
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid search query")]
    InvalidQuery,

    #[error("Server error. Please try again later.")]
    Server(reqwest::StatusCode),

    #[error("Request timeout. Please try again.")]
    Timeout,

    #[error("Unable to connect to server. Please check if the API is running.")]
    Unreachable,

    #[error("No Toggl Track entries found for this book.")]
    NoTimeEntries,

    #[error("Could not authenticate with Toggl Track.")]
    Unauthorized,

    #[error("Invalid response from {0}")]
    InvalidResponse(&'static str),

    #[error("{0}")]
    Other(&'static str),
}

impl ApiError {
    /// Classify a transport-level reqwest error
    pub fn from_transport(err: &reqwest::Error, generic: &'static str) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unreachable
        } else {
            ApiError::Other(generic)
        }
    }
}
