//! Collaborator doubles shared by the BDD scenarios

use async_trait::async_trait;
use layergate_core::{
    CollaboratorError, GroupId, GroupMembership, PrincipalId, ProtectedResource, ResourceCatalog,
};

/// Membership oracle whose backing directory is down
#[derive(Debug, Default)]
pub struct UnavailableMembership;

#[async_trait]
impl GroupMembership for UnavailableMembership {
    async fn is_member(&self, _: &PrincipalId, _: &GroupId) -> Result<bool, CollaboratorError> {
        Err(CollaboratorError::new("membership directory unreachable"))
    }
}

/// Catalog whose backing database is down
#[derive(Debug, Default)]
pub struct UnavailableCatalog;

#[async_trait]
impl ResourceCatalog for UnavailableCatalog {
    async fn find_all_reachable(
        &self,
        _: &PrincipalId,
    ) -> Result<Vec<ProtectedResource>, CollaboratorError> {
        Err(CollaboratorError::new("catalog database unreachable"))
    }
}
