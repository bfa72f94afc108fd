//! Terminal and JSON rendering of [`DataFrame`]s.

use comfy_table::{presets, Cell as TableCell, Color, ContentArrangement, Table};
use console::style;
use serde_json::{Map, Value};

use cxflow_core::table::{Cell, DataFrame};

/// Widest cell rendered before truncation.
const MAX_CELL_WIDTH: usize = 60;

fn cell_json(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Bool(b) => Value::Bool(*b),
        Cell::Str(s) => Value::String(s.clone()),
    }
}

/// Rows as an array of `column -> value` objects.
pub fn dataframe_json(df: &DataFrame) -> Value {
    let rows = df
        .rows()
        .iter()
        .map(|row| {
            let record: Map<String, Value> = df
                .columns()
                .iter()
                .cloned()
                .zip(row.iter().map(cell_json))
                .collect();
            Value::Object(record)
        })
        .collect();
    Value::Array(rows)
}

fn truncate(text: &str) -> String {
    if text.chars().count() > MAX_CELL_WIDTH {
        let head: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

pub fn dataframe_table(df: &DataFrame) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        df.columns()
            .iter()
            .map(|c| TableCell::new(c).fg(Color::White)),
    );

    for row in df.rows() {
        table.add_row(row.iter().map(|cell| match cell {
            Cell::Null => TableCell::new("-").fg(Color::DarkGrey),
            Cell::Bool(true) => TableCell::new("true").fg(Color::Green),
            Cell::Bool(false) => TableCell::new("false").fg(Color::Yellow),
            other => TableCell::new(truncate(&other.to_string())),
        }));
    }
    table
}

/// Render `df` as pretty JSON or as a table under `title`. `quiet` drops
/// the title banner and the empty placeholder, leaving only the rows.
pub fn render_dataframe(title: &str, df: &DataFrame, json: bool, quiet: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&dataframe_json(df))?);
    }
    if quiet {
        return Ok(if df.is_empty() {
            String::new()
        } else {
            dataframe_table(df).to_string()
        });
    }

    let mut out = format!("\n  {} ({} rows)\n", style(title).cyan().bold(), df.len());
    if df.is_empty() {
        out.push_str(&format!("  {}", style("(empty)").dim()));
    } else {
        out.push_str(&dataframe_table(df).to_string());
    }
    Ok(out)
}

pub fn print_dataframe(title: &str, df: &DataFrame, json: bool, quiet: bool) -> anyhow::Result<()> {
    let out = render_dataframe(title, df, json, quiet)?;
    if !out.is_empty() {
        println!("{out}");
    }
    Ok(())
}
