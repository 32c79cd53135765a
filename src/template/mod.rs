//! Workflow templates
//!
//! A template is a JSON document with one array of work steps:
//!
//! ```json
//! {
//!   "VersaPostStagingTemplate": [
//!     {
//!       "apiName": "Create template",
//!       "apiEndpoint": "vnms/sdwan/workflow/templates/template",
//!       "apiType": "POST",
//!       "expectedResponseStatus": "200",
//!       "apiIndex": 1,
//!       "apiPayload": { "name": "$*templateName$" },
//!       "respVar": [ { "name": "ID", "jsonPath": "id", "apiType": "string" } ]
//!     }
//!   ]
//! }
//! ```

pub mod loader;
pub mod models;

pub use loader::{load_template, parse_template, TemplateError};
pub use models::{Template, WorkStep};
