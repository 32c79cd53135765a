//! HTTP request data models.
//!
//! This module defines the request a workflow step turns into once its
//! endpoint and payload have been resolved against the environment store.

use std::collections::HashMap;

/// HTTP method a workflow step may declare.
///
/// Only the methods the executor knows how to dispatch are listed here.
/// Anything else stays as raw text on the step and is reported as
/// unsupported at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
        }
    }

    /// Parses a string into an HttpMethod.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string names a supported method, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            _ => None,
        }
    }

    /// Whether requests with this method carry the step payload as a body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT)
    }

    /// Content-Type header sent alongside the body, if any.
    ///
    /// PUT requests name the charset explicitly.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            HttpMethod::GET => None,
            HttpMethod::POST => Some("application/json"),
            HttpMethod::PUT => Some("application/json; charset=utf-8"),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully resolved HTTP request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,

    /// Target URL with every known placeholder already substituted.
    pub url: String,

    /// Request headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Optional request body.
    ///
    /// For POST and PUT this is the serialized step payload after
    /// placeholder substitution.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a new HttpRequest without headers or body.
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds a header to the request.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Sets the request body.
    pub fn set_body(&mut self, body: String) {
        self.body = Some(body);
    }

    /// Gets the Content-Type header value if present.
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the content type, or `None` if not set.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }
}
