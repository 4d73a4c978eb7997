//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use layergate_core::prelude::*;
//! ```

// === Evaluator ===
pub use crate::evaluator::{Decision, PermissionEvaluator};

// === Configuration ===
pub use crate::config::{EvaluatorConfig, EvaluatorSettings, RoleNames};

// === Collaborators ===
pub use crate::collaborators::{
    CollaboratorError, GroupMembership, InMemoryCatalog, InMemoryMembership, ResourceCatalog,
};

// === Value types ===
pub use crate::model::{
    Action, ActionSet, GroupId, Principal, PrincipalId, ProtectedResource, ResourceId, RoleTier,
};

// === Errors ===
pub use crate::error::{AccessError, AccessResult};
