//! Configuration for layergate
//!
//! Values are resolved in the following order (highest priority wins):
//!
//! 1. **Code** (builder methods)
//! 2. **Environment Variables** (`LAYERGATE_*`)
//! 3. **Config File** (layergate.toml)
//! 4. **Defaults**
//!
//! The resolved configuration is handed to
//! [`PermissionEvaluator::new`](crate::PermissionEvaluator::new) and never
//! changes afterwards.
//!
//! # Example
//!
//! ```no_run
//! use layergate_core::config::EvaluatorConfig;
//!
//! let config = EvaluatorConfig::load()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod evaluator;
pub mod roles;

pub use evaluator::EvaluatorSettings;
pub use roles::RoleNames;

use crate::error::AccessResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete evaluator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub roles: RoleNames,
    pub evaluator: EvaluatorSettings,
}

impl EvaluatorConfig {
    /// Load configuration with full supersedence chain from `layergate.toml`
    pub fn load() -> Result<Self> {
        Self::load_from("layergate.toml")
    }

    /// Load configuration from a specific file, falling back to defaults when it is absent
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        }

        config.apply_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.roles.merge(other.roles);
        self.evaluator.merge(other.evaluator);
    }

    pub fn apply_env_vars(&mut self) {
        self.roles.apply_env_vars();
        self.evaluator.apply_env_vars();
    }

    pub fn validate(&self) -> AccessResult<()> {
        self.roles.validate()?;
        self.evaluator.validate()?;
        Ok(())
    }

    pub fn with_roles(mut self, roles: RoleNames) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_owner_full_access(mut self, enabled: bool) -> Self {
        self.evaluator.owner_full_access = enabled;
        self
    }

    pub fn with_super_admin_full_access(mut self, enabled: bool) -> Self {
        self.evaluator.super_admin_full_access = enabled;
        self
    }

    pub fn with_oracle_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.evaluator.oracle_timeout_ms = timeout_ms;
        self
    }
}
