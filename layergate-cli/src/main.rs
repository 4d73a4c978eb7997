//! layergate CLI — evaluate access decisions offline.
//!
//! ```bash
//! layergate check --policy policy.toml --principal shinji --role ROLE_USER \
//!     --action update --resource layer-1 --explain
//! layergate config --config layergate.toml
//! ```
//!
//! Exit status: 0 when access is granted, 1 when it is denied, 2 on error.
//! Set `RUST_LOG=debug` to see each rule the evaluator applies.

mod commands;
mod policy;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "layergate", about = "Offline access-decision checker", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a principal may perform an action
    Check(commands::check::CheckArgs),

    /// Print the effective configuration (defaults, file, environment)
    Config {
        /// Configuration file
        #[arg(long, default_value = "layergate.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => commands::check::run(&args).await.map(|granted| {
            if granted {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }),
        Commands::Config { config } => commands::config::run(&config).map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
