//! Template data models
//!
//! A template is an ordered list of work steps. Step order in the document is
//! execution order; the `apiIndex` field is carried for display only.

use crate::models::HttpMethod;
use crate::variables::{validate_path, ResponseBinding};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::num::ParseIntError;

/// One declared HTTP call of a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkStep {
    /// Display label used in logs
    #[serde(rename = "apiName", default)]
    pub name: String,

    /// Endpoint path relative to the server root; may contain placeholders
    #[serde(rename = "apiEndpoint", default)]
    pub endpoint: String,

    /// Declared HTTP method, kept verbatim so unknown methods still parse
    #[serde(rename = "apiType", default)]
    pub method: String,

    /// The only status code considered success, as written in the document
    #[serde(
        rename = "expectedResponseStatus",
        default,
        deserialize_with = "deserialize_status"
    )]
    pub expected_status: String,

    /// Informational index; never used for ordering
    #[serde(rename = "apiIndex", default)]
    pub index: i64,

    /// Request payload for POST and PUT
    #[serde(rename = "apiPayload", default)]
    pub payload: Option<Map<String, JsonValue>>,

    /// Values to capture from the response, in declaration order
    #[serde(rename = "respVar", default, deserialize_with = "deserialize_bindings")]
    pub response_bindings: Vec<ResponseBinding>,
}

impl WorkStep {
    /// Creates a step with the given name, method and endpoint.
    pub fn new(
        name: impl Into<String>,
        method: impl Into<String>,
        endpoint: impl Into<String>,
        expected_status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            method: method.into(),
            endpoint: endpoint.into(),
            expected_status: expected_status.into(),
            ..Self::default()
        }
    }

    /// Sets the payload, builder style.
    pub fn with_payload(mut self, payload: Map<String, JsonValue>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Appends a response binding, builder style.
    pub fn with_binding(mut self, binding: ResponseBinding) -> Self {
        self.response_bindings.push(binding);
        self
    }

    /// The declared method, if the executor supports it.
    pub fn http_method(&self) -> Option<HttpMethod> {
        HttpMethod::from_str(&self.method)
    }

    /// Parses the expected status as an integer status code.
    pub fn expected_status_code(&self) -> Result<u16, ParseIntError> {
        self.expected_status.trim().parse::<u16>()
    }

    /// Serializes the payload to compact JSON.
    ///
    /// A missing payload serializes as `null`. Keys come out in sorted order.
    pub fn serialized_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.payload)
    }
}

/// Ordered sequence of work steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(
        rename = "VersaPostStagingTemplate",
        alias = "versaPostStagingTemplate",
        default
    )]
    steps: Vec<WorkStep>,
}

impl Template {
    /// Creates a template from steps in execution order.
    pub fn new(steps: Vec<WorkStep>) -> Self {
        Self { steps }
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[WorkStep] {
        &self.steps
    }

    /// Iterates over steps in execution order
    pub fn iter(&self) -> std::slice::Iter<'_, WorkStep> {
        self.steps.iter()
    }

    /// Returns the number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Checks if the template has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Structural problems worth reporting before a run starts.
    ///
    /// None of these stop the run; each affected step fails or degrades on
    /// its own when executed.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (i, step) in self.steps.iter().enumerate() {
            let label = format!("step {} ({})", i + 1, step.name);

            match step.http_method() {
                None => warnings.push(format!(
                    "{}: unsupported API type {:?}",
                    label, step.method
                )),
                Some(method) if method.has_body() && step.payload.is_none() => warnings.push(
                    format!("{}: {} step has no apiPayload, sending null", label, method),
                ),
                Some(_) => {}
            }

            if step.expected_status_code().is_err() {
                warnings.push(format!(
                    "{}: expectedResponseStatus {:?} is not a number",
                    label, step.expected_status
                ));
            }

            for binding in &step.response_bindings {
                if binding.variable_name().is_empty() {
                    warnings.push(format!("{}: response binding without a name", label));
                }
                if !validate_path(&binding.json_path) {
                    warnings.push(format!(
                        "{}: invalid jsonPath {:?} for {:?}",
                        label, binding.json_path, binding.name
                    ));
                }
            }
        }

        warnings
    }
}

impl<'a> IntoIterator for &'a Template {
    type Item = &'a WorkStep;
    type IntoIter = std::slice::Iter<'a, WorkStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accepts the expected status as a JSON string or a bare number.
fn deserialize_status<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStatus {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawStatus>::deserialize(deserializer)? {
        Some(RawStatus::Text(text)) => text,
        Some(RawStatus::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

/// Treats an explicit `null` binding list like a missing one.
fn deserialize_bindings<'de, D>(deserializer: D) -> Result<Vec<ResponseBinding>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ResponseBinding>>::deserialize(deserializer)?.unwrap_or_default())
}
