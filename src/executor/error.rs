//! Step execution error types.
//!
//! [`RequestError`] covers the transport: the request could not be sent or
//! its response could not be read. [`StepError`] is everything that can make
//! a single step fail, transport errors included. Neither ever aborts a run on
//! its own; the executor records them and moves on.

use thiserror::Error;

/// Errors raised by the HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out before completion.
    #[error("Request timed out")]
    Timeout,

    /// Errors that occur when constructing the client or the request.
    #[error("Request build error: {0}")]
    BuildError(String),

    /// The response arrived but its body could not be read.
    #[error("Failed to read response body (status {status}): {message}")]
    BodyRead { status: u16, message: String },
}

/// Convert reqwest errors to RequestError.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else if err.is_connect() {
            RequestError::NetworkError(format!("Connection failed: {}", err))
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

/// Reasons a single step fails.
#[derive(Debug, Error)]
pub enum StepError {
    /// The declared method is not one the executor dispatches.
    #[error("unsupported API type {0:?}")]
    UnsupportedMethod(String),

    /// The composed, substituted address is not a valid URL.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The payload could not be serialized to JSON.
    #[error("failed to serialize payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Sending the request or reading the response failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The expected status in the template is not an integer.
    #[error("expected response status {0:?} is not a number")]
    InvalidExpectedStatus(String),

    /// The server answered with a different status than expected.
    #[error("response code {actual} is not {expected}")]
    StatusMismatch { expected: u16, actual: u16 },
}

impl StepError {
    /// Whether a request went out on the wire before the step failed.
    pub fn request_sent(&self) -> bool {
        match self {
            StepError::UnsupportedMethod(_)
            | StepError::InvalidUrl { .. }
            | StepError::Payload(_) => false,
            StepError::Request(RequestError::BuildError(_)) => false,
            StepError::Request(_)
            | StepError::InvalidExpectedStatus(_)
            | StepError::StatusMismatch { .. } => true,
        }
    }
}
