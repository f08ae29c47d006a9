//! Application state for the Overtime Extraction Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::PolicyStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers, such as
/// the loaded policy store.
#[derive(Clone)]
pub struct AppState {
    /// The loaded policy store.
    policies: Arc<PolicyStore>,
}

impl AppState {
    /// Creates a new application state with the given policy store.
    pub fn new(policies: PolicyStore) -> Self {
        Self {
            policies: Arc::new(policies),
        }
    }

    /// Returns a reference to the policy store.
    pub fn policies(&self) -> &PolicyStore {
        &self.policies
    }
}
