//! Offline TransitionRouteGroup inspection: show, export.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use cxflow_core::builder::TransitionRouteGroupBuilder;
use cxflow_core::table::TableMode;
use cxflow_types::route_group::TransitionRouteGroup;

use crate::render::render_dataframe;

#[derive(Subcommand)]
pub enum RouteGroupCommand {
    /// Print a readable rendering of a route group.
    Show {
        /// TransitionRouteGroup JSON document.
        file: PathBuf,
    },

    /// Flatten a route group into a table, one row per route.
    Export {
        /// TransitionRouteGroup JSON document.
        file: PathBuf,

        /// Column set: basic or advanced.
        #[arg(long, default_value = "basic")]
        mode: TableMode,
    },
}

pub async fn run(action: RouteGroupCommand, json: bool, quiet: bool) -> Result<()> {
    let out = render(action, json, quiet).await?;
    if !out.is_empty() {
        println!("{out}");
    }
    Ok(())
}

async fn render(action: RouteGroupCommand, json: bool, quiet: bool) -> Result<String> {
    let out = match action {
        RouteGroupCommand::Show { file } => {
            let group = super::read_json::<TransitionRouteGroup>(&file).await?;
            if json {
                serde_json::to_string_pretty(&group)?
            } else {
                TransitionRouteGroupBuilder::from_proto(group).show_transition_route_group()?
            }
        }

        RouteGroupCommand::Export { file, mode } => {
            let group = super::read_json::<TransitionRouteGroup>(&file).await?;
            let df = TransitionRouteGroupBuilder::from_proto(group).to_dataframe(mode)?;
            render_dataframe("Transition Route Group", &df, json, quiet)?
        }
    };
    Ok(out)
}
