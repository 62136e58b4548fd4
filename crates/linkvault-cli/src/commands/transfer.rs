//! Export and import command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use linkvault_core::{default_export_file_name, parse_import, ImportPolicy, Vault};

use crate::output::{link_count, Output};
use crate::prompt::{confirm, is_interactive};

/// Write the collection to a JSON file (or stdout with `-`)
pub fn export(vault: &Vault, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let document = vault.export();
    let json = document.to_json().context("Failed to encode export")?;

    if path.as_deref().is_some_and(|p| p.as_os_str() == "-") {
        println!("{}", json);
        return Ok(());
    }

    let path = path.unwrap_or_else(|| PathBuf::from(default_export_file_name(Utc::now())));
    fs::write(&path, json).with_context(|| format!("Failed to write export to {:?}", path))?;

    output.success_with(
        &format!(
            "Exported {} to {}",
            link_count(document.links.len()),
            path.display()
        ),
        serde_json::json!({"path": path, "count": document.links.len()}),
    );
    Ok(())
}

/// Read an export file and merge it into, or replace, the collection
pub fn import(
    vault: &mut Vault,
    path: PathBuf,
    policy: ImportPolicy,
    yes: bool,
    output: &Output,
) -> Result<()> {
    let bytes = fs::read(&path).with_context(|| format!("Failed to read {:?}", path))?;
    let records = parse_import(&bytes).context("Error importing data")?;
    let count = records.len();

    if policy == ImportPolicy::Replace && !yes && !vault.links().is_empty() {
        if !output.should_prompt() || !is_interactive() {
            anyhow::bail!(
                "Replacing {} requires confirmation. Pass --yes.",
                link_count(vault.link_count())
            );
        }
        let prompt = format!(
            "Found {}. Replace all {} with them?",
            link_count(count),
            link_count(vault.link_count())
        );
        if !confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let imported = vault
        .import_records(records, policy)
        .context("Error importing data")?;

    output.success_with(
        &format!("Successfully imported {} ({})", link_count(imported), policy),
        serde_json::json!({
            "imported": imported,
            "policy": policy,
            "total": vault.link_count()
        }),
    );
    Ok(())
}
