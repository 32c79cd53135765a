//! HTTP response data models.
//!
//! This module defines the response a step receives: status, raw body bytes
//! and the wall-clock time the exchange took.

use std::borrow::Cow;
use std::time::Duration;

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// Response body as raw bytes.
    ///
    /// Kept as bytes so a non-UTF-8 body can still be logged lossily.
    pub body: Vec<u8>,

    /// Total request duration from send to last body byte.
    pub duration: Duration,
}

impl HttpResponse {
    /// Body as text, replacing invalid UTF-8 sequences.
    pub fn body_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
