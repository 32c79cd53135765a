//! HTTP transport built on reqwest.
//!
//! One client is created per run and reused for every step. No retries; a
//! timeout is applied only when the run configuration sets one.

use crate::config::RunnerConfig;
use crate::executor::error::RequestError;
use crate::models::request::{HttpMethod, HttpRequest};
use crate::models::response::HttpResponse;
use std::time::Instant;

/// Sends resolved requests and collects their responses.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport for the given run configuration.
    pub fn new(config: &RunnerConfig) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        Ok(Self { client })
    }

    /// Sends `request` and reads the full response body.
    ///
    /// Any status code is a successful exchange at this level; status
    /// validation belongs to the executor.
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let start_time = Instant::now();

        let method = match request.method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
        };

        let mut req_builder = self.client.request(method, request.url.as_str());

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder.send().await?;

        let status_code = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::BodyRead {
                status: status_code,
                message: e.to_string(),
            })?
            .to_vec();

        Ok(HttpResponse {
            status_code,
            body,
            duration: start_time.elapsed(),
        })
    }
}
