//! Policy store loading functionality.
//!
//! This module provides the [`PolicyStore`] type for loading named
//! overtime policies from a directory of YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::OvertimePolicy;

use super::types::PolicyFile;

/// Loads and provides access to named overtime policies.
///
/// The store reads every `.yaml`/`.yml` file in a directory; each file
/// defines one policy, keyed by its `name` field. Policies are validated
/// eagerly at load time so a malformed file surfaces immediately rather
/// than at the first extraction.
///
/// # Directory Structure
///
/// ```text
/// config/policies/
/// ├── standard.yaml
/// └── night_shift.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use overtime_engine::config::PolicyStore;
///
/// let store = PolicyStore::load("./config/policies").unwrap();
/// let policy = store.get("standard").unwrap();
/// println!("threshold: {} hours", policy.threshold_hours);
/// ```
#[derive(Debug, Clone)]
pub struct PolicyStore {
    policies: HashMap<String, OvertimePolicy>,
}

impl PolicyStore {
    /// Loads all policy files from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] when the directory is missing,
    ///   unreadable, or contains no policy files.
    /// - [`EngineError::ConfigParseError`] when a file is not valid YAML
    ///   for the policy shape.
    /// - [`EngineError::InvalidPolicy`] when a loaded policy violates its
    ///   field invariants.
    pub fn load<P: AsRef<Path>>(dir: P) -> EngineResult<Self> {
        let dir = dir.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut policies = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if !is_yaml {
                continue;
            }

            let file = Self::load_yaml(&path)?;
            let policy: OvertimePolicy = file.into();
            policy.validate()?;
            policies.insert(policy.name.clone(), policy);
        }

        if policies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no policy files found)", dir_str),
            });
        }

        Ok(Self { policies })
    }

    /// Loads and parses one policy YAML file.
    fn load_yaml(path: &Path) -> EngineResult<PolicyFile> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Looks up a policy by name.
    pub fn get(&self, name: &str) -> EngineResult<&OvertimePolicy> {
        self.policies
            .get(name)
            .ok_or_else(|| EngineError::PolicyNotFound {
                name: name.to_string(),
            })
    }

    /// Returns the names of all loaded policies.
    pub fn names(&self) -> Vec<&str> {
        self.policies.keys().map(String::as_str).collect()
    }

    /// Returns the number of loaded policies.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Returns true when the store holds no policies.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
