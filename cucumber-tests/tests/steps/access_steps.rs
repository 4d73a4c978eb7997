use cucumber::{given, then, when, World};
use cucumber_tests::{UnavailableCatalog, UnavailableMembership};
use layergate_core::{
    AccessError, AccessResult, Action, EvaluatorConfig, GroupId, GroupMembership, InMemoryCatalog,
    InMemoryMembership, PermissionEvaluator, Principal, PrincipalId, ProtectedResource,
    ResourceCatalog, RoleNames,
};
use std::sync::Arc;

#[derive(Debug, Default, World)]
pub struct AccessWorld {
    roles: RoleNames,
    owner_full_access_disabled: bool,
    layer: Option<ProtectedResource>,
    memberships: Vec<(String, String)>,
    catalog: Vec<ProtectedResource>,
    membership_unavailable: bool,
    catalog_unavailable: bool,
    outcome: Option<AccessResult<bool>>,
}

impl AccessWorld {
    fn evaluator(&self) -> PermissionEvaluator {
        let membership: Arc<dyn GroupMembership> = if self.membership_unavailable {
            Arc::new(UnavailableMembership)
        } else {
            Arc::new(InMemoryMembership::from_pairs(self.memberships.iter().cloned()))
        };
        let catalog: Arc<dyn ResourceCatalog> = if self.catalog_unavailable {
            Arc::new(UnavailableCatalog)
        } else {
            Arc::new(InMemoryCatalog::from_resources(self.catalog.iter().cloned()))
        };
        let config = EvaluatorConfig::default()
            .with_roles(self.roles.clone())
            .with_owner_full_access(!self.owner_full_access_disabled);

        PermissionEvaluator::new(config, membership, catalog).expect("valid scenario configuration")
    }

    fn layer_mut(&mut self) -> &mut ProtectedResource {
        self.layer.as_mut().expect("scenario has no layer")
    }
}

fn parse_action(action: &str) -> Action {
    action.parse().unwrap_or_else(|e| panic!("{}", e))
}

// Background
#[given(expr = "the role names {string}, {string}, {string} and {string}")]
fn given_role_names(
    world: &mut AccessWorld,
    default_role: String,
    editor: String,
    sub_admin: String,
    super_admin: String,
) {
    world.roles = RoleNames {
        default_role_name: default_role,
        editor_role_name: editor,
        sub_admin_role_name: sub_admin,
        super_admin_role_name: super_admin,
    };
}

#[given(expr = "a layer {string}")]
fn given_layer(world: &mut AccessWorld, id: String) {
    world.layer = Some(ProtectedResource::new(id));
}

// Layer ACL
#[given(expr = "the layer grants {word} to user {string}")]
fn given_user_grant(world: &mut AccessWorld, action: String, principal: String) {
    let action = parse_action(&action);
    world.layer_mut().direct_grants.entry(PrincipalId::from(principal)).or_default().insert(action);
}

#[given(expr = "the layer grants {word} to group {string}")]
fn given_group_grant(world: &mut AccessWorld, action: String, group: String) {
    let action = parse_action(&action);
    world.layer_mut().group_grants.entry(GroupId::from(group)).or_default().insert(action);
}

#[given(expr = "the layer is owned by {string}")]
fn given_owner(world: &mut AccessWorld, owner: String) {
    world.layer_mut().owner = Some(PrincipalId::from(owner));
}

#[given(expr = "owner full access is disabled")]
fn given_ownership_disabled(world: &mut AccessWorld) {
    world.owner_full_access_disabled = true;
}

// Collaborators
#[given(expr = "{string} is a member of group {string}")]
fn given_membership(world: &mut AccessWorld, principal: String, group: String) {
    world.memberships.push((group, principal));
}

#[given(expr = "the catalog holds a layer {string} granting {word} to user {string}")]
fn given_catalog_layer(world: &mut AccessWorld, id: String, action: String, principal: String) {
    let action = parse_action(&action);
    world.catalog.push(ProtectedResource::new(id).grant_principal(principal, [action]));
}

#[given(expr = "the group membership oracle is unavailable")]
fn given_membership_unavailable(world: &mut AccessWorld) {
    world.membership_unavailable = true;
}

#[given(expr = "the resource catalog is unavailable")]
fn given_catalog_unavailable(world: &mut AccessWorld) {
    world.catalog_unavailable = true;
}

// Decisions
#[when(expr = "{string} requests {word} on the layer")]
async fn when_request_on_layer(world: &mut AccessWorld, principal: String, action: String) {
    let action = parse_action(&action);
    let layer = world.layer.clone().expect("scenario has no layer");
    let outcome =
        world.evaluator().has_permission(&Principal::new(principal), Some(&layer), action).await;
    world.outcome = Some(outcome);
}

#[when(expr = "{string} with role {string} requests {word} on a new layer")]
async fn when_request_on_new_layer(
    world: &mut AccessWorld,
    principal: String,
    role: String,
    action: String,
) {
    let action = parse_action(&action);
    let principal = Principal::new(principal).with_role(role);
    let outcome = world.evaluator().has_permission(&principal, None, action).await;
    world.outcome = Some(outcome);
}

#[then(expr = "access is granted")]
fn then_granted(world: &mut AccessWorld) {
    assert_eq!(world.outcome, Some(Ok(true)));
}

#[then(expr = "access is denied")]
fn then_denied(world: &mut AccessWorld) {
    assert_eq!(world.outcome, Some(Ok(false)));
}

#[then(expr = "the decision is rejected as invalid input")]
fn then_invalid_input(world: &mut AccessWorld) {
    assert!(
        matches!(world.outcome, Some(Err(AccessError::InvalidInput(_)))),
        "unexpected outcome: {:?}",
        world.outcome
    );
}

#[then(expr = "the decision fails because a collaborator is unavailable")]
fn then_collaborator_unavailable(world: &mut AccessWorld) {
    assert!(
        matches!(world.outcome, Some(Err(AccessError::CollaboratorUnavailable { .. }))),
        "unexpected outcome: {:?}",
        world.outcome
    );
}
