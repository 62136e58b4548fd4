//! Status command handler

use anyhow::Result;

use linkvault_core::{Config, JsonFileStore, Vault};

use crate::output::{Output, OutputFormat};

/// Show where links are stored and how many there are
pub fn show(vault: &Vault, config: &Config, output: &Output) -> Result<()> {
    let store = JsonFileStore::from_config(config);
    let platforms = vault.platforms().len();
    let tags = vault.tags_with_counts().len();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "storage": {
                        "path": store.path(),
                        "exists": store.exists(),
                        "size": store.size()
                    },
                    "counts": {
                        "links": vault.link_count(),
                        "platforms": platforms,
                        "tags": tags
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", vault.link_count());
        }
        OutputFormat::Human => {
            println!("LinkVault Status");
            println!("================");
            println!();
            println!("Storage:");
            println!("  Location: {}", store.path().display());
            println!("  Size:     {} bytes", store.size());
            println!();
            println!("Contents:");
            println!("  Links:     {}", vault.link_count());
            println!("  Platforms: {}", platforms);
            println!("  Tags:      {}", tags);
        }
    }

    Ok(())
}
