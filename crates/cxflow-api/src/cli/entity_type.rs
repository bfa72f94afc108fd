//! Entity type CLI commands: list, get, export, map, create, update, delete.

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use cxflow_core::table::TableMode;
use cxflow_types::entity_type::{
    AutoExpansionMode, Entity, EntityKind, EntityType, EntityTypeFields, ExcludedPhrase,
};

use crate::render::{dataframe_json, print_dataframe};
use crate::state::AppState;

#[derive(Subcommand)]
pub enum EntityTypeCommand {
    /// List the entity types of an agent.
    #[command(alias = "ls")]
    List {
        /// Agent id; defaults to `default_agent_id` from config.toml.
        #[arg(long)]
        agent: Option<String>,
    },

    /// Show a single entity type.
    Get {
        /// Entity type id, `projects/<P>/locations/<L>/agents/<A>/entityTypes/<E>`.
        id: String,
    },

    /// Flatten the agent's entity types into a table.
    Export {
        #[arg(long)]
        agent: Option<String>,

        /// Column set: basic or advanced.
        #[arg(long, default_value = "basic")]
        mode: TableMode,

        /// Only export these display names (comma separated).
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
    },

    /// Print the id -> display name map (or the reverse).
    Map {
        #[arg(long)]
        agent: Option<String>,

        /// Map display names to ids instead.
        #[arg(long)]
        reverse: bool,
    },

    /// Create an entity type.
    Create {
        #[arg(long)]
        agent: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Update the given fields of an entity type.
    Update {
        /// Entity type id.
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete an entity type.
    #[command(alias = "rm")]
    Delete {
        /// Entity type id.
        id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Fields settable on create and update. Only flags that are given are sent.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Start from an EntityType JSON document.
    #[arg(long)]
    from_file: Option<PathBuf>,

    #[arg(long)]
    display_name: Option<String>,

    /// map, list or regexp.
    #[arg(long)]
    kind: Option<EntityKind>,

    /// Entity as `VALUE=SYN1|SYN2`; a bare `VALUE` is its own synonym.
    /// Repeatable.
    #[arg(long = "entity", value_parser = parse_entity)]
    entities: Vec<Entity>,

    /// Excluded phrase. Repeatable.
    #[arg(long = "exclude")]
    excluded_phrases: Vec<String>,

    #[arg(long)]
    auto_expansion: Option<bool>,

    #[arg(long)]
    fuzzy_extraction: Option<bool>,

    #[arg(long)]
    redact: Option<bool>,

    /// Language of the entities; defaults to `default_language_code`.
    #[arg(long)]
    language: Option<String>,
}

impl FieldArgs {
    fn fields(&self) -> EntityTypeFields {
        EntityTypeFields {
            display_name: self.display_name.clone(),
            kind: self.kind,
            auto_expansion_mode: self.auto_expansion.map(|on| {
                if on {
                    AutoExpansionMode::Default
                } else {
                    AutoExpansionMode::Unspecified
                }
            }),
            entities: (!self.entities.is_empty()).then(|| self.entities.clone()),
            excluded_phrases: (!self.excluded_phrases.is_empty()).then(|| {
                self.excluded_phrases
                    .iter()
                    .map(|value| ExcludedPhrase {
                        value: value.clone(),
                    })
                    .collect()
            }),
            enable_fuzzy_extraction: self.fuzzy_extraction,
            redact: self.redact,
        }
    }

    async fn base_object(&self) -> Result<Option<EntityType>> {
        match &self.from_file {
            Some(path) => Ok(Some(super::read_json::<EntityType>(path).await?)),
            None => Ok(None),
        }
    }
}

/// Parse `VALUE=SYN1|SYN2` into an [`Entity`].
fn parse_entity(raw: &str) -> Result<Entity, String> {
    let (value, synonyms) = match raw.split_once('=') {
        Some((value, synonyms)) => (
            value.trim(),
            synonyms
                .split('|')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>(),
        ),
        None => (raw.trim(), vec![raw.trim().to_string()]),
    };
    if value.is_empty() {
        return Err(format!("entity '{raw}' has an empty value"));
    }
    if synonyms.is_empty() {
        return Err(format!("entity '{value}' has no synonyms"));
    }
    Ok(Entity::new(value, synonyms))
}

/// Run `fut` behind a spinner unless output is machine-readable or quiet.
async fn with_spinner<T>(message: &str, silent: bool, fut: impl Future<Output = T>) -> T {
    if silent {
        return fut.await;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let out = fut.await;
    spinner.finish_and_clear();
    out
}

pub async fn run(state: &AppState, action: EntityTypeCommand, json: bool, quiet: bool) -> Result<()> {
    let silent = json || quiet;
    let service = &state.entity_types;

    match action {
        EntityTypeCommand::List { agent } => {
            let entity_types = with_spinner(
                "Listing entity types...",
                silent,
                service.list_entity_types(agent.as_deref()),
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entity_types)?);
                return Ok(());
            }
            if entity_types.is_empty() {
                println!();
                println!("  {} No entity types found.", style("i").blue().bold());
                println!();
                return Ok(());
            }
            println!("{}", entity_types_table(&entity_types));
        }

        EntityTypeCommand::Get { id } => {
            let entity_type =
                with_spinner("Fetching entity type...", silent, service.get_entity_type(Some(id.as_str())))
                    .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entity_type)?);
            } else {
                print_entity_type(&entity_type);
            }
        }

        EntityTypeCommand::Export { agent, mode, only } => {
            let subset = (!only.is_empty()).then_some(only.as_slice());
            let tables = with_spinner(
                "Exporting entity types...",
                silent,
                service.entity_types_to_df(agent.as_deref(), mode, subset),
            )
            .await?;

            if json {
                let mut out = serde_json::json!({
                    "entity_types": dataframe_json(&tables.entity_types),
                });
                if let Some(phrases) = &tables.excluded_phrases {
                    out["excluded_phrases"] = dataframe_json(phrases);
                }
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_dataframe("Entity Types", &tables.entity_types, false, quiet)?;
                if let Some(phrases) = &tables.excluded_phrases {
                    print_dataframe("Excluded Phrases", phrases, false, quiet)?;
                }
            }
        }

        EntityTypeCommand::Map { agent, reverse } => {
            let map = with_spinner(
                "Listing entity types...",
                silent,
                service.get_entities_map(agent.as_deref(), reverse),
            )
            .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                for (key, value) in &map {
                    println!("{key}\t{value}");
                }
            }
        }

        EntityTypeCommand::Create { agent, fields } => {
            let obj = fields.base_object().await?;
            if obj.is_none() && fields.display_name.is_none() {
                bail!("--display-name is required unless --from-file is given");
            }
            let language = state.language_code(fields.language.as_deref());
            let created = with_spinner(
                "Creating entity type...",
                silent,
                service.create_entity_type(agent.as_deref(), obj, language, fields.fields()),
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&created)?);
            } else if !quiet {
                println!(
                    "  {} Created entity type '{}'",
                    style("✓").green().bold(),
                    style(&created.display_name).cyan()
                );
                println!("    {}", style(&created.name).dim());
            }
        }

        EntityTypeCommand::Update { id, fields } => {
            let obj = fields.base_object().await?;
            let field_values = fields.fields();
            if field_values.is_empty() {
                bail!("nothing to update; pass at least one field flag");
            }
            let language = state.language_code(fields.language.as_deref());
            let updated = with_spinner(
                "Updating entity type...",
                silent,
                service.update_entity_type(Some(id.as_str()), obj, language, field_values),
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&updated)?);
            } else if !quiet {
                println!(
                    "  {} Updated entity type '{}'",
                    style("✓").green().bold(),
                    style(&updated.display_name).cyan()
                );
            }
        }

        EntityTypeCommand::Delete { id, force } => {
            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Permanently delete entity type '{}'?",
                        style(&id).red().bold()
                    ))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("  Cancelled.");
                    return Ok(());
                }
            }

            with_spinner(
                "Deleting entity type...",
                silent,
                service.delete_entity_type(Some(id.as_str()), None),
            )
            .await?;

            if json {
                println!("{}", serde_json::json!({"deleted": true, "id": id}));
            } else if !quiet {
                println!("  {} Entity type deleted.", style("✓").red().bold());
            }
        }
    }

    Ok(())
}

fn entity_types_table(entity_types: &[EntityType]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Display Name").fg(Color::White),
        Cell::new("Kind").fg(Color::White),
        Cell::new("Entities").fg(Color::White),
        Cell::new("Id").fg(Color::White),
    ]);

    for et in entity_types {
        let id = et.name.rsplit('/').next().unwrap_or(&et.name);
        table.add_row(vec![
            Cell::new(&et.display_name).fg(Color::Cyan),
            Cell::new(et.kind),
            Cell::new(et.entities.len()),
            Cell::new(id).fg(Color::DarkGrey),
        ]);
    }
    table
}

fn print_entity_type(et: &EntityType) {
    println!();
    println!("  {}", style(&et.display_name).cyan().bold());
    println!("  {}", style(&et.name).dim());
    println!();
    println!("  kind:                {}", et.kind);
    println!("  auto expansion:      {}", et.auto_expansion_mode.is_enabled());
    println!("  fuzzy extraction:    {}", et.enable_fuzzy_extraction);
    println!("  redact:              {}", et.redact);
    println!();
    for entity in &et.entities {
        println!(
            "  {} {}: {}",
            style("•").dim(),
            style(&entity.value).bold(),
            entity.synonyms.join(", ")
        );
    }
    if !et.excluded_phrases.is_empty() {
        println!();
        println!("  excluded phrases:");
        for phrase in &et.excluded_phrases {
            println!("    {} {}", style("-").dim(), phrase.value);
        }
    }
    println!();
}
