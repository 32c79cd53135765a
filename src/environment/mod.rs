//! Environment store for workflow runs
//!
//! This module holds the variables a run works with: the values seeded from
//! the environment file and every value captured from step responses since.
//! There is exactly one store per run, owned by the step executor and lent to
//! placeholder substitution (read) and response extraction (write).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use runflow::environment::load_env_file;
//!
//! let mut store = load_env_file(Path::new("staging.env")).unwrap();
//! store.set("deviceId", "abc123");
//!
//! if let Some(host) = store.get("host") {
//!     println!("target host: {}", host);
//! }
//! ```

pub mod loader;
pub mod models;

pub use loader::{load_env_file, parse_env_line, parse_env_source, EnvError};
pub use models::EnvironmentStore;

/// Logs every variable in the store at debug level, sorted by name.
pub fn log_store(store: &EnvironmentStore) {
    for (name, value) in store.iter() {
        log::debug!("{} : {}", name, value);
    }
}
