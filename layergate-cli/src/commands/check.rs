use anyhow::Result;
use clap::Args;
use layergate_core::{Action, EvaluatorConfig, PermissionEvaluator, Principal, ResourceId};
use std::path::PathBuf;
use std::sync::Arc;

use crate::policy::PolicyFixture;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Policy fixture with resources and group memberships
    #[arg(long)]
    pub policy: PathBuf,

    /// Principal identity
    #[arg(long)]
    pub principal: String,

    /// Role held by the principal (repeatable)
    #[arg(long = "role")]
    pub roles: Vec<String>,

    /// read, create, update or delete
    #[arg(long)]
    pub action: Action,

    /// Resource id; omit to check CREATE against the resource type
    #[arg(long)]
    pub resource: Option<String>,

    /// Configuration file
    #[arg(long, default_value = "layergate.toml")]
    pub config: PathBuf,

    /// Print the rule that decided
    #[arg(long)]
    pub explain: bool,
}

/// Evaluate one decision and print the verdict; returns whether access was granted
pub async fn run(args: &CheckArgs) -> Result<bool> {
    log::debug!("Loading configuration from {}", args.config.display());
    let config = EvaluatorConfig::load_from(&args.config)?;
    let fixture = PolicyFixture::from_file(&args.policy)?;
    log::debug!(
        "Loaded {} resource(s) from {}",
        fixture.resources.len(),
        args.policy.display()
    );

    let evaluator =
        PermissionEvaluator::new(config, Arc::new(fixture.membership()), Arc::new(fixture.catalog()))?;

    let principal = Principal::new(args.principal.as_str()).with_roles(args.roles.iter().cloned());
    let resource = match &args.resource {
        Some(id) => Some(fixture.resource(&ResourceId::from(id.as_str()))?),
        None => None,
    };

    let decision = evaluator.explain(&principal, resource, args.action).await?;
    let verdict = if decision.is_granted() { "ALLOW" } else { "DENY" };
    if args.explain {
        println!("{} ({})", verdict, decision);
    } else {
        println!("{}", verdict);
    }

    Ok(decision.is_granted())
}
