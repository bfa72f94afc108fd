//! CLI command definitions for the `cxflow` binary.
//!
//! Uses clap derive macros. Commands follow a noun-verb pattern
//! (e.g., `cxflow entity-types list`, `cxflow page stats page.json`).

pub mod entity_type;
pub mod page;
pub mod route_group;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Build, inspect and tabulate Dialogflow CX flow resources.
#[derive(Parser)]
#[command(name = "cxflow", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the entity types of an agent (list, get, export, map, create,
    /// update, delete).
    #[command(name = "entity-types", alias = "et")]
    EntityTypes {
        #[command(subcommand)]
        action: entity_type::EntityTypeCommand,
    },

    /// Inspect a Page JSON document (show, stats, export).
    Page {
        #[command(subcommand)]
        action: page::PageCommand,
    },

    /// Inspect a TransitionRouteGroup JSON document (show, export).
    #[command(name = "route-group")]
    RouteGroup {
        #[command(subcommand)]
        action: route_group::RouteGroupCommand,
    },

    /// Print the Dialogflow CX console link of a resource id.
    Link {
        /// Full resource id, e.g. `projects/<P>/locations/<L>/agents/<A>/flows/<F>`.
        resource_id: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Read and parse a JSON resource document.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> anyhow::Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))
}
