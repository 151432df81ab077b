//! Content CLI commands: types, list, show, import, purge.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;
use serde::Deserialize;
use uuid::Uuid;

use punchcard_core::repository::content::ContentRepository;
use punchcard_types::content::ContentRow;
use punchcard_types::listing::{FormattedItem, PageLinks};
use punchcard_types::query::QueryParams;

use crate::state::AppState;

/// List registered content types in a table.
pub async fn list_types(state: &AppState, json: bool) -> Result<()> {
    let types = state.content_service.types();

    if json {
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Attributes").fg(Color::White),
    ]);

    for ty in &types.all {
        table.add_row(vec![
            Cell::new(&ty.name).fg(Color::Cyan),
            Cell::new(&ty.id),
            Cell::new(&ty.description).fg(Color::DarkGrey),
            Cell::new(ty.attributes.len()),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

/// List one page of records of a content type.
pub async fn list_content(
    state: &AppState,
    type_slug: &str,
    params: QueryParams,
    json: bool,
) -> Result<()> {
    let listing = state.content_service.of_type(&params, type_slug).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.items.is_empty() {
        println!();
        println!(
            "  {} No '{}' records found. Add some with: {}",
            style("i").blue().bold(),
            type_slug,
            style("punchcard import <file.json>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Key").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("URL").fg(Color::White),
    ]);

    for item in &listing.items {
        if let FormattedItem::Summary(summary) = item {
            table.add_row(vec![
                Cell::new(&summary.key).fg(Color::Cyan),
                Cell::new(&summary.type_name),
                Cell::new(summary.id).fg(Color::DarkGrey),
                Cell::new(&summary.meta.url).fg(Color::DarkGrey),
            ]);
        }
    }

    println!();
    println!("{table}");
    print_page_links(&listing.pages);
    println!();
    Ok(())
}

fn print_page_links(pages: &PageLinks) {
    let links = [
        ("first", &pages.first),
        ("prev", &pages.prev),
        ("next", &pages.next),
        ("last", &pages.last),
    ];
    for (rel, link) in links {
        if let Some(url) = link {
            println!("  {} {}", style(format!("{rel:>5}:")).dim(), url);
        }
    }
}

/// Show a single record with its nested attributes.
pub async fn show_content(state: &AppState, id: &str, json: bool) -> Result<()> {
    let item = state
        .content_service
        .one(&QueryParams::default(), id, None)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
        return Ok(());
    }

    let Some(item) = item.into_inner() else {
        println!();
        println!("  {} No record with id '{}'.", style("✗").red().bold(), id);
        println!();
        return Ok(());
    };

    println!();
    println!("  {}", style(&item.key).cyan().bold());
    println!("  {}", style(format!("{} ({})", item.type_name, item.type_slug)).dim());
    println!();
    println!("  {}  {}", style("ID:").bold(), style(item.id).dim());
    println!("  {}", style("── Attributes ──").dim());
    if item.attributes.is_empty() {
        println!("  (none)");
    }
    for (name, value) in &item.attributes {
        println!("  {}  {}", style(format!("{name}:")).bold(), value);
    }
    println!();
    Ok(())
}

/// A record as written in an import file. Slugs are derived from the names.
#[derive(Debug, Deserialize)]
struct ImportRecord {
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(rename = "type")]
    type_name: String,
    key: String,
    #[serde(default)]
    attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl ImportRecord {
    fn into_row(self) -> ContentRow {
        let mut row = ContentRow::new(self.type_name, self.key);
        if let Some(id) = self.id {
            row.id = id;
        }
        if let Some(created_at) = self.created_at {
            row.created_at = created_at;
            row.updated_at = created_at;
        }
        row.attributes = self.attributes;
        row
    }
}

fn parse_import(content: &str) -> Result<Vec<ContentRow>> {
    let records: Vec<ImportRecord> =
        serde_json::from_str(content).context("expected a JSON array of records")?;
    Ok(records.into_iter().map(ImportRecord::into_row).collect())
}

/// Insert every record of a JSON file in one transaction.
pub async fn import_content(state: &AppState, file: &Path, json: bool) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let rows: Vec<ContentRow> = parse_import(&content)
        .with_context(|| format!("invalid {}", file.display()))?
        .into_iter()
        .map(|row| state.content_service.assign_type(row))
        .collect();

    let inserted = state.content_service.repository().insert_many(&rows).await?;
    tracing::info!(inserted, file = %file.display(), "imported content");

    if json {
        println!("{}", serde_json::json!({ "inserted": inserted }));
    } else {
        println!(
            "  {} Imported {} record(s) from {}",
            style("✓").green().bold(),
            inserted,
            style(file.display()).dim()
        );
    }
    Ok(())
}

/// Delete every record of a content type.
pub async fn purge_content(state: &AppState, type_slug: &str, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete all '{}' records?",
                style(type_slug).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let deleted = state
        .content_service
        .repository()
        .delete_by_type(type_slug)
        .await?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "deleted": deleted, "type_slug": type_slug })
        );
    } else {
        println!(
            "  {} Deleted {} '{}' record(s).",
            style("✓").red().bold(),
            deleted,
            type_slug
        );
    }
    Ok(())
}
