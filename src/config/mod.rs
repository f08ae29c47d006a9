//! Policy configuration for the Overtime Extraction Engine.
//!
//! Loads named overtime policies from YAML files.

mod loader;
mod types;

pub use loader::PolicyStore;
pub use types::PolicyFile;
