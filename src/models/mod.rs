//! Data models for HTTP requests and responses.
//!
//! This module contains the request and response types that pass between
//! the step executor and the HTTP transport.

pub mod request;
pub mod response;

pub use request::{HttpMethod, HttpRequest};
pub use response::HttpResponse;
