//! cxflow CLI entry point.
//!
//! Binary name: `cxflow`
//!
//! Parses CLI arguments, then either works offline (inspecting Page and
//! TransitionRouteGroup JSON documents, building console links) or wires the entity type service against the
//! remote API and dispatches to the entity type commands.

mod cli;
mod render;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use cxflow_core::service::resource::resource_link;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,cxflow=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "cxflow", &mut std::io::stdout());
        }

        // Offline commands need no credentials.
        Commands::Page { action } => {
            cli::page::run(action, cli.json, cli.quiet).await?;
        }

        Commands::RouteGroup { action } => {
            cli::route_group::run(action, cli.json, cli.quiet).await?;
        }

        Commands::Link { resource_id } => {
            let link = resource_link(&resource_id)?;
            if cli.json {
                println!("{}", serde_json::json!({ "resource_id": resource_id, "link": link }));
            } else {
                println!("{link}");
            }
        }

        Commands::EntityTypes { action } => {
            let state = AppState::init().await?;
            let result = cli::entity_type::run(&state, action, cli.json, cli.quiet).await;
            tracing::debug!(
                calls = state.entity_types.api_calls_count(),
                details = ?state.entity_types.api_calls_details(),
                "remote API calls"
            );
            result?;
        }
    }

    Ok(())
}
