//! Link command handlers

use anyhow::{bail, Context, Result};

use linkvault_core::{guess_platform_for_url, parse_tags, Link, LinkFields, LinkFilter, Vault};

use crate::clipboard::copy_to_clipboard;
use crate::output::{link_count, short_id, Output};
use crate::prompt::{confirm, is_interactive, prompt_with_default};

/// Fields accepted by `add` and `edit`
#[derive(Debug, Default)]
pub struct FieldArgs {
    pub url: Option<String>,
    pub platform: Option<String>,
    pub tags: Option<String>,
    pub description: Option<String>,
}

impl FieldArgs {
    fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.platform.is_none()
            && self.tags.is_none()
            && self.description.is_none()
    }

    /// Overlay the given values on `base`
    fn apply_to(self, mut base: LinkFields) -> LinkFields {
        if let Some(url) = self.url {
            base.url = url;
        }
        if let Some(platform) = self.platform {
            base.platform = platform;
        }
        if let Some(tags) = self.tags {
            base.tags = parse_tags(&tags);
        }
        if let Some(description) = self.description {
            base.description = description;
        }
        base
    }
}

/// Save a new link
///
/// When no platform is given it is guessed from the URL's host.
pub fn add(vault: &mut Vault, url: String, args: FieldArgs, output: &Output) -> Result<()> {
    let platform = match args.platform.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => match guess_platform_for_url(&url) {
            Some(guess) => guess.to_string(),
            None => bail!(
                "Could not guess a platform for {}. Pass one with --platform.",
                url
            ),
        },
    };

    let fields = FieldArgs {
        url: Some(url),
        platform: Some(platform),
        ..args
    }
    .apply_to(LinkFields::default());

    let link = vault.add_link(fields).context("Failed to add link")?;
    output.print_saved("Link added successfully", &link);
    Ok(())
}

/// List links, optionally filtered by search term and platform
pub fn list(vault: &Vault, search: String, platform: String, output: &Output) -> Result<()> {
    let links = vault.filter(&LinkFilter::new(search, platform));
    output.print_links(&links);
    Ok(())
}

/// Show a single link
pub fn show(vault: &Vault, id: String, output: &Output) -> Result<()> {
    let link = find_link(vault, &id)?;
    output.print_link(link);
    Ok(())
}

/// Edit a link
///
/// With no field flags in an interactive terminal, prompts for each field.
pub fn edit(vault: &mut Vault, id: String, args: FieldArgs, output: &Output) -> Result<()> {
    let current = find_link(vault, &id)?.clone();

    let fields = if args.is_empty() {
        if !output.should_prompt() || !is_interactive() {
            bail!("Nothing to change. Pass --url, --platform, --tags or --description.");
        }
        prompt_fields(&current)?
    } else {
        args.apply_to(current.fields())
    };

    let link = vault
        .update_link(&current.id, fields)
        .context("Failed to update link")?;
    output.print_saved("Link updated successfully", &link);
    Ok(())
}

fn prompt_fields(link: &Link) -> Result<LinkFields> {
    println!("Editing link: {}", link.id);
    println!("Press Enter to keep current value, or type new value.\n");

    let mut fields = link.fields();
    if let Some(url) = prompt_with_default("URL", &link.url)? {
        fields.url = url;
    }
    if let Some(platform) = prompt_with_default("Platform", &link.platform)? {
        fields.platform = platform;
    }
    if let Some(description) = prompt_with_default("Description", &link.description)? {
        fields.description = description;
    }
    if let Some(tags) = prompt_with_default("Tags (comma-separated)", &link.tags.join(", "))? {
        fields.tags = parse_tags(&tags);
    }
    Ok(fields)
}

/// Delete a link
pub fn delete(vault: &mut Vault, id: String, yes: bool, output: &Output) -> Result<()> {
    let link = find_link(vault, &id)?.clone();

    if !yes {
        if !output.should_prompt() || !is_interactive() {
            bail!("Refusing to delete without confirmation. Pass --yes.");
        }
        println!("Delete link: {} - {}", short_id(&link.id), link.url);
        if !confirm("Are you sure you want to delete this link?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    vault
        .delete_link(&link.id)
        .context("Failed to delete link")?;

    output.success_with(
        "Link deleted successfully",
        serde_json::json!({"id": link.id}),
    );
    Ok(())
}

/// Open a link in the default browser
pub fn open(vault: &Vault, id: String, output: &Output) -> Result<()> {
    let link = find_link(vault, &id)?;
    open::that(&link.url).with_context(|| format!("Failed to open {}", link.url))?;
    output.message(&format!("Opened {}", link.url));
    Ok(())
}

/// Copy a link's URL to the system clipboard
pub fn copy(vault: &Vault, id: String, output: &Output) -> Result<()> {
    let link = find_link(vault, &id)?;
    if !copy_to_clipboard(&link.url) {
        bail!("Failed to copy link. No clipboard tool is available.");
    }
    output.success_with(
        "Link copied to clipboard",
        serde_json::json!({"id": link.id, "url": link.url}),
    );
    Ok(())
}

/// Delete every link and the store file
pub fn clear(vault: &mut Vault, yes: bool, output: &Output) -> Result<()> {
    let count = vault.link_count();

    if !yes {
        if !output.should_prompt() || !is_interactive() {
            bail!("Refusing to clear storage without confirmation. Pass --yes.");
        }
        let prompt = format!("Delete all {}? This cannot be undone.", link_count(count));
        if !confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    vault.clear().context("Failed to clear storage")?;

    output.success_with(
        &format!("Removed {}", link_count(count)),
        serde_json::json!({"removed": count}),
    );
    Ok(())
}

/// Look up a link by full id or unique id prefix
pub fn find_link<'a>(vault: &'a Vault, id: &str) -> Result<&'a Link> {
    let id = id.trim();
    if let Some(link) = vault.get_link(id) {
        return Ok(link);
    }

    let matches: Vec<&Link> = if id.is_empty() {
        Vec::new()
    } else {
        vault
            .links()
            .iter()
            .filter(|l| l.id.starts_with(id))
            .collect()
    };

    match matches.as_slice() {
        [] => bail!("Link not found: {}", id),
        [link] => Ok(*link),
        _ => {
            eprintln!("Multiple links match '{}':", id);
            for link in &matches {
                eprintln!("  {} - {}", link.id, link.url);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
