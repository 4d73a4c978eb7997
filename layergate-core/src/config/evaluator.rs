//! Evaluator behaviour switches

use crate::error::{AccessError, AccessResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorSettings {
    /// Owners get every action on their own resources
    pub owner_full_access: bool,
    /// Super-admins get every action on every resource
    pub super_admin_full_access: bool,
    /// Deadline for each collaborator call, 0 disables it
    pub oracle_timeout_ms: u64,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self { owner_full_access: true, super_admin_full_access: false, oracle_timeout_ms: 5000 }
    }
}

impl EvaluatorSettings {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(enabled) = env::var("LAYERGATE_OWNER_FULL_ACCESS") {
            match parse_flag(&enabled) {
                Some(enabled) => self.owner_full_access = enabled,
                None => log::warn!("Ignoring invalid LAYERGATE_OWNER_FULL_ACCESS '{}'", enabled),
            }
        }
        if let Ok(enabled) = env::var("LAYERGATE_SUPERADMIN_FULL_ACCESS") {
            match parse_flag(&enabled) {
                Some(enabled) => self.super_admin_full_access = enabled,
                None => {
                    log::warn!("Ignoring invalid LAYERGATE_SUPERADMIN_FULL_ACCESS '{}'", enabled)
                }
            }
        }
        if let Ok(timeout) = env::var("LAYERGATE_ORACLE_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => self.oracle_timeout_ms = ms,
                Err(_) => log::warn!("Ignoring invalid LAYERGATE_ORACLE_TIMEOUT_MS '{}'", timeout),
            }
        }
    }

    pub fn validate(&self) -> AccessResult<()> {
        // A deadline this long is indistinguishable from no deadline
        if self.oracle_timeout_ms > 10 * 60 * 1000 {
            return Err(AccessError::Misconfiguration(format!(
                "oracle_timeout_ms {} exceeds 10 minutes",
                self.oracle_timeout_ms
            )));
        }
        Ok(())
    }

    pub fn oracle_timeout(&self) -> Option<Duration> {
        (self.oracle_timeout_ms > 0).then(|| Duration::from_millis(self.oracle_timeout_ms))
    }
}

/// Unrecognised values yield `None` so the current setting is kept
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
