//! Step executor.
//!
//! The executor walks a template in order and runs one protocol per step:
//!
//! 1. compose `scheme://host:port/endpoint` and substitute placeholders
//! 2. for POST/PUT, serialize the payload and substitute placeholders in the
//!    serialized text
//! 3. send the request and read the whole response body
//! 4. compare the status with the step's expected status
//! 5. on a match, run the step's response bindings against the body
//!
//! A failed step is logged and the run moves on to the next one. With
//! [`RunnerConfig::fail_fast`] set, the run stops after the first failure
//! instead.
//!
//! Steps run strictly one after another; the environment store is owned by
//! the executor and never shared.

pub mod error;
pub mod native;
pub mod report;

pub use error::{RequestError, StepError};
pub use native::HttpTransport;
pub use report::{RunReport, StepOutcome};

use crate::config::RunnerConfig;
use crate::environment::EnvironmentStore;
use crate::models::{HttpRequest, HttpResponse};
use crate::template::{Template, WorkStep};
use crate::variables::{extract_bindings, substitute, unresolved_placeholders};
use std::time::Instant;

/// Runs templates against one server, carrying variables from step to step.
#[derive(Debug)]
pub struct StepExecutor {
    config: RunnerConfig,
    transport: HttpTransport,
    store: EnvironmentStore,
}

impl StepExecutor {
    /// Creates an executor seeded with `store`.
    ///
    /// `config` is expected to be validated already.
    pub fn new(config: RunnerConfig, store: EnvironmentStore) -> Result<Self, RequestError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            config,
            transport,
            store,
        })
    }

    /// The run configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Current variables
    pub fn store(&self) -> &EnvironmentStore {
        &self.store
    }

    /// Mutable access to the variables, for seeding between runs
    pub fn store_mut(&mut self) -> &mut EnvironmentStore {
        &mut self.store
    }

    /// Consumes the executor and returns the final variables
    pub fn into_store(self) -> EnvironmentStore {
        self.store
    }

    /// Composes the step's target address and substitutes placeholders in it.
    pub fn compose_url(&self, step: &WorkStep) -> String {
        let url = format!("{}{}", self.config.base_url(), step.endpoint);
        substitute(&url, &self.store)
    }

    /// Builds the outgoing request for a step against the current store.
    pub fn build_request(&self, step: &WorkStep) -> Result<HttpRequest, StepError> {
        let method = step
            .http_method()
            .ok_or_else(|| StepError::UnsupportedMethod(step.method.clone()))?;

        let url = self.compose_url(step);
        url::Url::parse(&url).map_err(|source| StepError::InvalidUrl {
            url: url.clone(),
            source,
        })?;
        self.log_unresolved(&step.endpoint);

        let mut request = HttpRequest::new(method, url);

        if method.has_body() {
            let payload = step.serialized_payload()?;
            self.log_unresolved(&payload);

            if let Some(content_type) = method.content_type() {
                request.add_header("Content-Type".to_string(), content_type.to_string());
            }
            request.set_body(substitute(&payload, &self.store));
        }

        Ok(request)
    }

    /// Executes a single step, updating the store on success.
    ///
    /// Never returns early with an error: every failure is logged and
    /// recorded in the returned outcome.
    pub async fn execute_step(&mut self, index: usize, step: &WorkStep) -> StepOutcome {
        let started = Instant::now();
        let mut outcome = StepOutcome::new(index, step);

        let result = self.run_protocol(step, &mut outcome).await;
        outcome.result = result;
        outcome.duration = started.elapsed();

        match &outcome.result {
            Ok(()) => {}
            Err(StepError::UnsupportedMethod(method)) => {
                log::warn!(
                    "step {} ({}): API type {:?} is not supported, nothing sent",
                    index + 1,
                    step.name,
                    method
                );
            }
            Err(err) => log::error!(
                "Error !!! step {} ({}) failed: {} [{} {}]",
                index + 1,
                step.name,
                err,
                step.method,
                outcome.url.as_deref().unwrap_or("-")
            ),
        }

        outcome
    }

    async fn run_protocol(
        &mut self,
        step: &WorkStep,
        outcome: &mut StepOutcome,
    ) -> Result<(), StepError> {
        let request = self.build_request(step)?;
        outcome.url = Some(request.url.clone());

        log::info!("[{}] {}", request.method, request.url);
        if let Some(body) = &request.body {
            log::info!("[Request Body] {}", body);
        }

        let response = self.transport.send(&request).await?;
        outcome.status_code = Some(response.status_code);
        log::debug!(
            "{} answered {} in {:?}",
            request.url,
            response.status_code,
            response.duration
        );
        log::info!("[Response Body] {}", response.body_lossy());

        self.validate_and_extract(step, &request, &response)
    }

    fn validate_and_extract(
        &mut self,
        step: &WorkStep,
        request: &HttpRequest,
        response: &HttpResponse,
    ) -> Result<(), StepError> {
        let expected = step
            .expected_status_code()
            .map_err(|_| StepError::InvalidExpectedStatus(step.expected_status.clone()))?;

        if response.status_code != expected {
            return Err(StepError::StatusMismatch {
                expected,
                actual: response.status_code,
            });
        }

        log::info!(
            "received success response {} from {} API",
            response.status_code,
            request.method
        );

        if !step.response_bindings.is_empty() {
            let body = response.body_lossy();
            extract_bindings(&body, &step.response_bindings, &mut self.store);
        }

        Ok(())
    }

    /// Executes every step of `template` in order.
    pub async fn run(&mut self, template: &Template) -> RunReport {
        let total = template.len();
        let mut report = RunReport::new(total);

        for (index, step) in template.iter().enumerate() {
            log::info!("executing step {} of {}: {}", index + 1, total, step.name);

            let outcome = self.execute_step(index, step).await;
            let failed = !outcome.passed();
            report.outcomes.push(outcome);

            if failed && self.config.fail_fast {
                if index + 1 < total {
                    log::warn!(
                        "fail-fast: skipping the remaining {} step(s)",
                        total - index - 1
                    );
                    report.halted = true;
                }
                break;
            }
        }

        report
    }

    fn log_unresolved(&self, text: &str) {
        for name in unresolved_placeholders(text, &self.store) {
            log::debug!("no value for placeholder {:?}, leaving it as is", name);
        }
    }
}
