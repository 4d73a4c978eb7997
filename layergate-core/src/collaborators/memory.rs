//! In-memory collaborators backed by lock-free `scc` maps
//!
//! Used by the CLI policy fixtures and by tests. Both stores are safe for
//! concurrent reads and writes, so they can be shared behind an `Arc` with a
//! live evaluator.

use super::{CollaboratorError, GroupMembership, ResourceCatalog};
use crate::model::{GroupId, PrincipalId, ProtectedResource, ResourceId};
use async_trait::async_trait;
use scc::HashMap as SccHashMap;

/// Group membership table keyed by `(group, principal)`
#[derive(Default)]
pub struct InMemoryMembership {
    members: SccHashMap<(GroupId, PrincipalId), ()>,
}

impl InMemoryMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(group, principal)` pairs; duplicates collapse
    pub fn from_pairs<I, G, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (G, P)>,
        G: Into<GroupId>,
        P: Into<PrincipalId>,
    {
        let membership = Self::new();
        for (group, principal) in pairs {
            let _ = membership.members.insert_sync((group.into(), principal.into()), ());
        }
        membership
    }

    /// Returns false when the principal already was a member
    pub async fn add_member(&self, group: impl Into<GroupId>, principal: impl Into<PrincipalId>) -> bool {
        self.members.insert_async((group.into(), principal.into()), ()).await.is_ok()
    }

    /// Returns false when the principal was not a member
    pub async fn remove_member(
        &self,
        group: impl Into<GroupId>,
        principal: impl Into<PrincipalId>,
    ) -> bool {
        self.members.remove_async(&(group.into(), principal.into())).await.is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[async_trait]
impl GroupMembership for InMemoryMembership {
    async fn is_member(
        &self,
        principal: &PrincipalId,
        group: &GroupId,
    ) -> Result<bool, CollaboratorError> {
        let key = (group.clone(), principal.clone());
        Ok(self.members.read_async(&key, |_, _| ()).await.is_some())
    }
}

/// Catalog of protected resources keyed by resource id
///
/// Single-tenant: every registered resource is reachable by every principal.
/// The evaluator decides which of them actually grant anything.
#[derive(Default)]
pub struct InMemoryCatalog {
    resources: SccHashMap<ResourceId, ProtectedResource>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_resources(resources: impl IntoIterator<Item = ProtectedResource>) -> Self {
        let catalog = Self::new();
        for resource in resources {
            let _ = catalog.resources.insert_sync(resource.id.clone(), resource);
        }
        catalog
    }

    /// Insert or replace a resource
    pub async fn insert(&self, resource: ProtectedResource) {
        match self.resources.entry_async(resource.id.clone()).await {
            scc::hash_map::Entry::Occupied(mut o) => {
                *o.get_mut() = resource;
            }
            scc::hash_map::Entry::Vacant(v) => {
                v.insert_entry(resource);
            }
        }
    }

    pub async fn remove(&self, id: &ResourceId) -> Option<ProtectedResource> {
        self.resources.remove_async(id).await.map(|(_, resource)| resource)
    }

    pub async fn get(&self, id: &ResourceId) -> Option<ProtectedResource> {
        self.resources.read_async(id, |_, resource| resource.clone()).await
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[async_trait]
impl ResourceCatalog for InMemoryCatalog {
    async fn find_all_reachable(
        &self,
        _principal: &PrincipalId,
    ) -> Result<Vec<ProtectedResource>, CollaboratorError> {
        let mut reachable = Vec::with_capacity(self.resources.len());
        self.resources
            .retain_async(|_, resource| {
                reachable.push(resource.clone());
                true
            })
            .await;
        // Map iteration order is arbitrary; keep enumeration stable for callers
        reachable.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(reachable)
    }
}
