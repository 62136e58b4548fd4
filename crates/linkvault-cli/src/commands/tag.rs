//! Tag command handlers

use anyhow::Result;

use linkvault_core::Vault;

use crate::output::Output;

/// List all tags with usage counts
pub fn list(vault: &Vault, output: &Output) -> Result<()> {
    output.print_counts("tag", &vault.tags_with_counts());
    Ok(())
}
