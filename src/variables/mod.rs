//! Variables module
//!
//! This module reads and writes the environment store on behalf of the
//! executor: placeholder substitution before a request is sent, and response
//! bindings after a response comes back.

pub mod capture;
pub mod extract;
pub mod substitution;

pub use capture::{validate_path, ResponseBinding};
pub use extract::{evaluate_path, extract_bindings, extract_value, json_value_to_string};
pub use substitution::{
    find_placeholders, placeholder, substitute, unresolved_placeholders, PLACEHOLDER_CLOSE,
    PLACEHOLDER_OPEN,
};
