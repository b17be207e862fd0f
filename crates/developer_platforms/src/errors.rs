#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types for developer platform operations.
///
/// Every call made against a developer platform is a single request/response
/// exchange. A call either succeeds with the exact status code the platform
/// documents for the operation, or fails with one of these variants. None of
/// them are retried by this crate.
///
/// # Examples
///
/// ```rust
/// use auto_merge_developer_platforms::errors::Error;
///
/// let error = Error::RequestFailure {
///     status: 422,
///     body: r#"{"message":"Validation Failed"}"#.to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     r#"Request failed with status 422: {"message":"Validation Failed"}"#
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform could not be configured for use.
    ///
    /// Raised when the HTTP client cannot be built or the base URL of the
    /// platform API is not a valid URL.
    #[error("Failed to set up the platform client: {0}")]
    ClientSetup(String),

    /// The platform answered with a response body that could not be interpreted.
    ///
    /// The status code was the expected one but the body did not contain the
    /// fields the operation needs, for example a created pull request without
    /// a head commit.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// The platform answered with a status code other than the one the
    /// operation expects.
    ///
    /// Carries the raw status code and the raw response body so that callers
    /// can report exactly what the platform said.
    #[error("Request failed with status {status}: {body}")]
    RequestFailure {
        /// HTTP status code returned by the platform
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The request never produced a response.
    ///
    /// Connection failures, timeouts and TLS errors end up here.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Returns the HTTP status code for request failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}
