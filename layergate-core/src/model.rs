//! Value types read by the permission evaluator
//!
//! Nothing here is persisted by layergate. Principals, resources and groups
//! are owned by the surrounding application and handed to the evaluator as
//! immutable inputs for the duration of one decision.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Stable identity of an authenticated principal
    PrincipalId
);
string_id!(
    /// Identity of a group; membership lives behind [`crate::GroupMembership`]
    GroupId
);
string_id!(
    /// Identity of a protected resource instance
    ResourceId
);

/// Operation requested on a protected resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

    /// CREATE is the only action that can be checked without an existing instance
    pub fn requires_instance(self) -> bool {
        !matches!(self, Action::Create)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "READ",
            Action::Create => "CREATE",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "READ" => Ok(Action::Read),
            "CREATE" => Ok(Action::Create),
            "UPDATE" => Ok(Action::Update),
            "DELETE" => Ok(Action::Delete),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

/// Set of actions attached to one ACL entry
///
/// An empty set grants nothing and behaves exactly like a missing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet(BTreeSet<Action>);

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the action was already present
    pub fn insert(&mut self, action: Action) -> bool {
        self.0.insert(action)
    }

    pub fn contains(&self, action: Action) -> bool {
        self.0.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Action; N]> for ActionSet {
    fn from(actions: [Action; N]) -> Self {
        actions.into_iter().collect()
    }
}

/// An authenticated principal together with the role names it holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub roles: BTreeSet<String>,
}

impl Principal {
    pub fn new(id: impl Into<PrincipalId>) -> Self {
        Self { id: id.into(), roles: BTreeSet::new() }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// An access-controlled entity instance, e.g. a map layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedResource {
    pub id: ResourceId,
    #[serde(default)]
    pub owner: Option<PrincipalId>,
    #[serde(default, rename = "direct")]
    pub direct_grants: BTreeMap<PrincipalId, ActionSet>,
    #[serde(default, rename = "groups")]
    pub group_grants: BTreeMap<GroupId, ActionSet>,
}

impl ProtectedResource {
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    pub fn owned_by(mut self, owner: impl Into<PrincipalId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Replaces any existing direct entry for `principal`
    pub fn grant_principal(
        mut self,
        principal: impl Into<PrincipalId>,
        actions: impl Into<ActionSet>,
    ) -> Self {
        self.direct_grants.insert(principal.into(), actions.into());
        self
    }

    /// Replaces any existing group entry for `group`
    pub fn grant_group(mut self, group: impl Into<GroupId>, actions: impl Into<ActionSet>) -> Self {
        self.group_grants.insert(group.into(), actions.into());
        self
    }

    pub fn is_owned_by(&self, principal: &PrincipalId) -> bool {
        self.owner.as_ref() == Some(principal)
    }

    pub fn direct_grant_allows(&self, principal: &PrincipalId, action: Action) -> bool {
        self.direct_grants.get(principal).is_some_and(|actions| actions.contains(action))
    }

    /// Groups whose entry on this resource includes `action`
    pub fn groups_granting(&self, action: Action) -> impl Iterator<Item = &GroupId> + '_ {
        self.group_grants
            .iter()
            .filter(move |(_, actions)| actions.contains(action))
            .map(|(group, _)| group)
    }
}

/// Privilege tier of a role name, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleTier {
    Default,
    Editor,
    SubAdmin,
    SuperAdmin,
}

impl RoleTier {
    /// Tiers trusted to create resources without an instance to check
    pub fn may_create_unconditionally(self) -> bool {
        self >= RoleTier::Editor
    }
}

impl fmt::Display for RoleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoleTier::Default => "default",
            RoleTier::Editor => "editor",
            RoleTier::SubAdmin => "sub-admin",
            RoleTier::SuperAdmin => "super-admin",
        };
        f.write_str(name)
    }
}
