//! Offline Page inspection: show, stats, export.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use cxflow_core::builder::{PageBuilder, PageSection, PageStats};
use cxflow_core::table::TableMode;
use cxflow_types::page::Page;

use crate::render::render_dataframe;

#[derive(Subcommand)]
pub enum PageCommand {
    /// Print a readable rendering of a page.
    Show {
        /// Page JSON document, as returned by the API.
        file: PathBuf,

        /// Section to print: basic, whole, parameters, routes, route groups,
        /// events.
        #[arg(long, default_value = "whole")]
        section: PageSection,
    },

    /// Print structural statistics of a page.
    Stats {
        /// Page JSON document.
        file: PathBuf,
    },

    /// Flatten a page into a table.
    Export {
        /// Page JSON document.
        file: PathBuf,

        /// Column set: basic or advanced.
        #[arg(long, default_value = "basic")]
        mode: TableMode,
    },
}

pub async fn run(action: PageCommand, json: bool, quiet: bool) -> Result<()> {
    let out = render(action, json, quiet).await?;
    if !out.is_empty() {
        println!("{out}");
    }
    Ok(())
}

/// The text a page command prints. `quiet` only trims table banners; the
/// requested rendering itself is always returned.
async fn render(action: PageCommand, json: bool, quiet: bool) -> Result<String> {
    let out = match action {
        PageCommand::Show { file, section } => {
            let builder = PageBuilder::from_proto(super::read_json::<Page>(&file).await?);
            if json {
                serde_json::to_string_pretty(&builder.proto())?
            } else {
                builder.show_page_info(section)?
            }
        }

        PageCommand::Stats { file } => {
            let page = super::read_json::<Page>(&file).await?;
            if json {
                serde_json::to_string_pretty(&PageStats::from_page(&page))?
            } else {
                PageBuilder::from_proto(page).show_stats()?
            }
        }

        PageCommand::Export { file, mode } => {
            let builder = PageBuilder::from_proto(super::read_json::<Page>(&file).await?);
            render_dataframe("Page", &builder.to_dataframe(mode)?, json, quiet)?
        }
    };
    Ok(out)
}
