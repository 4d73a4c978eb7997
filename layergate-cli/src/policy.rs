//! Policy fixtures: resources plus group memberships in one TOML file
//!
//! ```toml
//! [[resources]]
//! id = "layer-1"
//! owner = "asuka"
//!
//! [resources.direct]
//! shinji = ["READ", "UPDATE"]
//!
//! [resources.groups]
//! bvb = ["DELETE"]
//!
//! [memberships]
//! bvb = ["shinji", "marco"]
//! ```

use anyhow::{bail, Context, Result};
use layergate_core::{
    GroupId, InMemoryCatalog, InMemoryMembership, PrincipalId, ProtectedResource, ResourceId,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PolicyFixture {
    pub resources: Vec<ProtectedResource>,
    pub memberships: BTreeMap<GroupId, Vec<PrincipalId>>,
}

impl PolicyFixture {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse policy file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let fixture: Self = toml::from_str(content)?;
        fixture.validate()?;
        Ok(fixture)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for resource in &self.resources {
            if resource.id.is_blank() {
                bail!("resource with blank id");
            }
            if !seen.insert(&resource.id) {
                bail!("duplicate resource id '{}'", resource.id);
            }
        }
        Ok(())
    }

    pub fn resource(&self, id: &ResourceId) -> Result<&ProtectedResource> {
        self.resources
            .iter()
            .find(|resource| &resource.id == id)
            .with_context(|| format!("unknown resource '{}'", id))
    }

    pub fn membership(&self) -> InMemoryMembership {
        InMemoryMembership::from_pairs(self.memberships.iter().flat_map(|(group, principals)| {
            principals.iter().map(move |principal| (group.clone(), principal.clone()))
        }))
    }

    pub fn catalog(&self) -> InMemoryCatalog {
        InMemoryCatalog::from_resources(self.resources.iter().cloned())
    }
}
