//! Read-only collaborators queried by the evaluator
//!
//! Both traits may be backed by a database or a remote service. They must not
//! default to a boolean on transient failure: return a [`CollaboratorError`]
//! and the evaluator turns it into a denial-safe error.

mod memory;

pub use memory::{InMemoryCatalog, InMemoryMembership};

use crate::model::{GroupId, PrincipalId, ProtectedResource};
use async_trait::async_trait;

/// Failure reported by a collaborator
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

impl CollaboratorError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Answers "is principal P a member of group G?"
///
/// Called once per matching group entry per decision, so implementations
/// should be cheap and free of side effects.
#[async_trait]
pub trait GroupMembership: Send + Sync {
    async fn is_member(
        &self,
        principal: &PrincipalId,
        group: &GroupId,
    ) -> Result<bool, CollaboratorError>;
}

/// Enumerates protected resources reachable by a principal
///
/// Only consulted for the class-level CREATE check.
#[async_trait]
pub trait ResourceCatalog: Send + Sync {
    async fn find_all_reachable(
        &self,
        principal: &PrincipalId,
    ) -> Result<Vec<ProtectedResource>, CollaboratorError>;
}
