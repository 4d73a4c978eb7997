//! The permission evaluator
//!
//! Rules are checked in a fixed order and the first one that matches decides:
//!
//! 1. No instance (CREATE on the resource type): editor, sub-admin and
//!    super-admin tiers are granted outright, everybody else goes through the
//!    catalog check.
//! 2. Super-admin full access, when enabled.
//! 3. Ownership, when enabled.
//! 4. Direct grant for the principal.
//! 5. Group grant for any group the principal belongs to.
//!
//! Anything else is denied. Collaborator failures surface as
//! [`AccessError::CollaboratorUnavailable`] and never as a grant.

use crate::collaborators::{CollaboratorError, GroupMembership, ResourceCatalog};
use crate::config::EvaluatorConfig;
use crate::error::{AccessError, AccessResult};
use crate::model::{Action, GroupId, Principal, ProtectedResource, ResourceId, RoleTier};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

const MEMBERSHIP: &str = "group membership oracle";
const CATALOG: &str = "resource catalog";

/// Rule that produced a verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Class-level CREATE granted by role tier
    RoleShortcut(RoleTier),
    SuperAdmin,
    Owner,
    DirectGrant,
    GroupGrant(GroupId),
    /// Class-level CREATE granted through an existing resource
    CatalogGrant(ResourceId),
    NoMatchingRule,
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        !matches!(self, Decision::NoMatchingRule)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::RoleShortcut(tier) => write!(f, "{} role may create", tier),
            Decision::SuperAdmin => write!(f, "super-admin full access"),
            Decision::Owner => write!(f, "owner full access"),
            Decision::DirectGrant => write!(f, "direct grant"),
            Decision::GroupGrant(group) => write!(f, "grant via group {}", group),
            Decision::CatalogGrant(resource) => write!(f, "create granted via resource {}", resource),
            Decision::NoMatchingRule => write!(f, "no matching rule"),
        }
    }
}

/// Decides whether a principal may perform an action on a protected resource
///
/// Holds no mutable state. Share it behind an `Arc` and call it from any
/// number of tasks; each call re-queries the collaborators.
#[derive(Clone)]
pub struct PermissionEvaluator {
    config: Arc<EvaluatorConfig>,
    membership: Arc<dyn GroupMembership>,
    catalog: Arc<dyn ResourceCatalog>,
}

impl PermissionEvaluator {
    pub fn new(
        config: EvaluatorConfig,
        membership: Arc<dyn GroupMembership>,
        catalog: Arc<dyn ResourceCatalog>,
    ) -> AccessResult<Self> {
        config.validate()?;
        for tier in config.roles.disabled_tiers() {
            log::warn!("No role name configured for the {} tier, tier disabled", tier);
        }
        Ok(Self { config: Arc::new(config), membership, catalog })
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// `resource` is `None` only for CREATE against the resource type itself
    pub async fn has_permission(
        &self,
        principal: &Principal,
        resource: Option<&ProtectedResource>,
        action: Action,
    ) -> AccessResult<bool> {
        self.explain(principal, resource, action).await.map(|decision| decision.is_granted())
    }

    /// Fail-closed variant of [`has_permission`](Self::has_permission): errors become `false`
    pub async fn is_allowed(
        &self,
        principal: &Principal,
        resource: Option<&ProtectedResource>,
        action: Action,
    ) -> bool {
        match self.has_permission(principal, resource, action).await {
            Ok(granted) => granted,
            Err(err) => {
                log::warn!("Denying {} for {}: {}", action, principal.id, err);
                false
            }
        }
    }

    /// Same as [`has_permission`](Self::has_permission) but reports which rule decided
    pub async fn explain(
        &self,
        principal: &Principal,
        resource: Option<&ProtectedResource>,
        action: Action,
    ) -> AccessResult<Decision> {
        if principal.id.is_blank() {
            return Err(AccessError::InvalidInput("principal id is blank".to_string()));
        }

        let decision = match resource {
            Some(resource) => self.check_instance(principal, resource, action).await?,
            None if action.requires_instance() => {
                return Err(AccessError::InvalidInput(format!(
                    "{} requires an existing resource",
                    action
                )));
            }
            None => self.check_class_level(principal).await?,
        };

        log::debug!(
            "{} {} on {}: {}",
            principal.id,
            action,
            resource.map_or("<new>", |r| r.id.as_str()),
            decision
        );
        Ok(decision)
    }

    async fn check_class_level(&self, principal: &Principal) -> AccessResult<Decision> {
        if let Some(tier) = self.highest_tier(principal) {
            if tier.may_create_unconditionally() {
                return Ok(Decision::RoleShortcut(tier));
            }
        }

        let reachable = self.bounded(CATALOG, self.catalog.find_all_reachable(&principal.id)).await?;
        for resource in &reachable {
            if self.check_instance(principal, resource, Action::Create).await?.is_granted() {
                return Ok(Decision::CatalogGrant(resource.id.clone()));
            }
        }

        Ok(Decision::NoMatchingRule)
    }

    async fn check_instance(
        &self,
        principal: &Principal,
        resource: &ProtectedResource,
        action: Action,
    ) -> AccessResult<Decision> {
        let settings = &self.config.evaluator;

        if settings.super_admin_full_access
            && self.highest_tier(principal) == Some(RoleTier::SuperAdmin)
        {
            return Ok(Decision::SuperAdmin);
        }

        if settings.owner_full_access && resource.is_owned_by(&principal.id) {
            return Ok(Decision::Owner);
        }

        if resource.direct_grant_allows(&principal.id, action) {
            return Ok(Decision::DirectGrant);
        }

        // Only entries that include the action are worth a membership lookup
        for group in resource.groups_granting(action) {
            if self.bounded(MEMBERSHIP, self.membership.is_member(&principal.id, group)).await? {
                return Ok(Decision::GroupGrant(group.clone()));
            }
        }

        Ok(Decision::NoMatchingRule)
    }

    fn highest_tier(&self, principal: &Principal) -> Option<RoleTier> {
        self.config.roles.highest_tier(&principal.roles)
    }

    /// Runs a collaborator call under the configured deadline
    async fn bounded<T>(
        &self,
        collaborator: &'static str,
        call: impl Future<Output = Result<T, CollaboratorError>>,
    ) -> AccessResult<T> {
        let outcome = match self.config.evaluator.oracle_timeout() {
            Some(deadline) => match tokio::time::timeout(deadline, call).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    log::warn!("{} did not answer within {:?}", collaborator, deadline);
                    return Err(AccessError::collaborator(
                        collaborator,
                        format!("no answer within {:?}", deadline),
                    ));
                }
            },
            None => call.await,
        };

        outcome.map_err(|err| {
            log::warn!("{} failed: {}", collaborator, err);
            AccessError::collaborator(collaborator, err.0)
        })
    }
}
