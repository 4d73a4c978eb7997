//! layergate - Core
//!
//! Access-control decisions for protected resources such as map layers.
//!
//! # Overview
//!
//! A [`PermissionEvaluator`] combines four mechanisms into one verdict:
//! role shortcuts, resource ownership, per-principal ACL entries and
//! per-group ACL entries resolved through a [`GroupMembership`] oracle.
//! When no resource instance exists yet (CREATE against the type), it falls
//! back to a [`ResourceCatalog`] of resources reachable by the principal.
//!
//! ```rust,no_run
//! use layergate_core::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let evaluator = PermissionEvaluator::new(
//!     EvaluatorConfig::load()?,
//!     Arc::new(InMemoryMembership::from_pairs([("bvb", "shinji")])),
//!     Arc::new(InMemoryCatalog::new()),
//! )?;
//!
//! let layer = ProtectedResource::new("layer-1").grant_group("bvb", [Action::Delete]);
//! let shinji = Principal::new("shinji").with_role("ROLE_USER");
//!
//! assert!(evaluator.has_permission(&shinji, Some(&layer), Action::Delete).await?);
//! # Ok(())
//! # }
//! ```

pub mod collaborators;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;

pub mod prelude;

pub use collaborators::{
    CollaboratorError, GroupMembership, InMemoryCatalog, InMemoryMembership, ResourceCatalog,
};
pub use config::{EvaluatorConfig, EvaluatorSettings, RoleNames};
pub use error::{AccessError, AccessResult};
pub use evaluator::{Decision, PermissionEvaluator};
pub use model::{
    Action, ActionSet, GroupId, Principal, PrincipalId, ProtectedResource, ResourceId, RoleTier,
};
