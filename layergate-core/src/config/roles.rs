//! Role-name configuration
//!
//! The evaluator only knows four tiers; which role strings map onto them is
//! deployment configuration. A blank name disables its tier.

use crate::error::{AccessError, AccessResult};
use crate::model::RoleTier;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleNames {
    pub default_role_name: String,
    pub editor_role_name: String,
    pub sub_admin_role_name: String,
    pub super_admin_role_name: String,
}

impl Default for RoleNames {
    fn default() -> Self {
        Self {
            default_role_name: "ROLE_USER".to_string(),
            editor_role_name: "ROLE_EDITOR".to_string(),
            sub_admin_role_name: "ROLE_SUBADMIN".to_string(),
            super_admin_role_name: "ROLE_ADMIN".to_string(),
        }
    }
}

impl RoleNames {
    /// Names with every tier disabled
    pub fn blank() -> Self {
        Self {
            default_role_name: String::new(),
            editor_role_name: String::new(),
            sub_admin_role_name: String::new(),
            super_admin_role_name: String::new(),
        }
    }

    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(name) = env::var("LAYERGATE_DEFAULT_ROLE") {
            self.default_role_name = name;
        }
        if let Ok(name) = env::var("LAYERGATE_EDITOR_ROLE") {
            self.editor_role_name = name;
        }
        if let Ok(name) = env::var("LAYERGATE_SUBADMIN_ROLE") {
            self.sub_admin_role_name = name;
        }
        if let Ok(name) = env::var("LAYERGATE_SUPERADMIN_ROLE") {
            self.super_admin_role_name = name;
        }
    }

    /// Rejects one role name bound to two tiers
    pub fn validate(&self) -> AccessResult<()> {
        let tiers = self.tiers();
        for (i, (tier, name)) in tiers.iter().enumerate() {
            let Some(name) = name else { continue };
            if let Some((other, _)) =
                tiers[i + 1..].iter().find(|(_, candidate)| candidate.as_ref() == Some(name))
            {
                return Err(AccessError::Misconfiguration(format!(
                    "role name '{}' is bound to both the {} and {} tiers",
                    name, tier, other
                )));
            }
        }
        Ok(())
    }

    /// Tiers left without a role name
    pub fn disabled_tiers(&self) -> Vec<RoleTier> {
        self.tiers().into_iter().filter(|(_, name)| name.is_none()).map(|(tier, _)| tier).collect()
    }

    /// Tier bound to `role`, if any; blank configured names never match
    pub fn tier_of(&self, role: &str) -> Option<RoleTier> {
        self.tiers()
            .into_iter()
            .find(|(_, name)| name.as_deref() == Some(role))
            .map(|(tier, _)| tier)
    }

    /// Most privileged tier among `roles`
    pub fn highest_tier<'a>(&self, roles: impl IntoIterator<Item = &'a String>) -> Option<RoleTier> {
        roles.into_iter().filter_map(|role| self.tier_of(role)).max()
    }

    fn tiers(&self) -> [(RoleTier, Option<&str>); 4] {
        fn configured(name: &str) -> Option<&str> {
            let name = name.trim();
            (!name.is_empty()).then_some(name)
        }

        [
            (RoleTier::Default, configured(&self.default_role_name)),
            (RoleTier::Editor, configured(&self.editor_role_name)),
            (RoleTier::SubAdmin, configured(&self.sub_admin_role_name)),
            (RoleTier::SuperAdmin, configured(&self.super_admin_role_name)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ROLE_VARS: [&str; 4] = [
        "LAYERGATE_DEFAULT_ROLE",
        "LAYERGATE_EDITOR_ROLE",
        "LAYERGATE_SUBADMIN_ROLE",
        "LAYERGATE_SUPERADMIN_ROLE",
    ];

    #[test]
    #[serial]
    fn test_apply_env_vars_renames_every_tier() {
        let mut names = RoleNames::default();
        for (var, value) in ROLE_VARS.iter().zip(["MOMO_USER", "MOMO_EDITOR", "MOMO_SUB", "MOMO_ADMIN"]) {
            env::set_var(var, value);
        }
        names.apply_env_vars();
        ROLE_VARS.iter().for_each(|var| env::remove_var(var));

        assert_eq!(names.tier_of("MOMO_USER"), Some(RoleTier::Default));
        assert_eq!(names.tier_of("MOMO_EDITOR"), Some(RoleTier::Editor));
        assert_eq!(names.tier_of("MOMO_SUB"), Some(RoleTier::SubAdmin));
        assert_eq!(names.tier_of("MOMO_ADMIN"), Some(RoleTier::SuperAdmin));
        assert_eq!(names.tier_of("ROLE_ADMIN"), None);
    }

    #[test]
    #[serial]
    fn test_empty_env_role_disables_tier() {
        let mut names = RoleNames::default();
        env::set_var("LAYERGATE_EDITOR_ROLE", "");
        names.apply_env_vars();
        env::remove_var("LAYERGATE_EDITOR_ROLE");

        assert_eq!(names.tier_of("ROLE_EDITOR"), None);
        assert_eq!(names.tier_of(""), None);
        assert_eq!(names.disabled_tiers(), vec![RoleTier::Editor]);
        assert!(names.validate().is_ok());
    }

    #[test]
    fn test_tier_resolution() {
        let names = RoleNames::default();
        assert_eq!(names.tier_of("ROLE_USER"), Some(RoleTier::Default));
        assert_eq!(names.tier_of("ROLE_ADMIN"), Some(RoleTier::SuperAdmin));
        assert_eq!(names.tier_of("ROLE_UNKNOWN"), None);
    }

    #[test]
    fn test_highest_tier_wins() {
        let names = RoleNames::default();
        let roles = ["ROLE_USER".to_string(), "ROLE_SUBADMIN".to_string(), "other".to_string()];
        assert_eq!(names.highest_tier(&roles), Some(RoleTier::SubAdmin));
        assert_eq!(names.highest_tier(&["other".to_string()]), None);
    }

    #[test]
    fn test_blank_names_never_match() {
        let names = RoleNames::blank();
        assert_eq!(names.tier_of(""), None);
        assert_eq!(names.tier_of("   "), None);
        assert_eq!(names.disabled_tiers().len(), 4);
        assert!(names.validate().is_ok());
    }

    #[test]
    fn test_names_are_trimmed() {
        let names = RoleNames { editor_role_name: "  ROLE_EDITOR ".to_string(), ..RoleNames::default() };
        assert_eq!(names.tier_of("ROLE_EDITOR"), Some(RoleTier::Editor));
    }

    #[test]
    fn test_duplicate_name_is_misconfiguration() {
        let names = RoleNames { sub_admin_role_name: "ROLE_EDITOR".to_string(), ..RoleNames::default() };
        let err = names.validate().unwrap_err();
        assert!(matches!(err, AccessError::Misconfiguration(_)));
        assert!(err.to_string().contains("ROLE_EDITOR"));
    }
}
