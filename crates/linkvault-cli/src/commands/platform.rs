//! Platform command handlers

use anyhow::Result;

use linkvault_core::{guess_platform_for_url, Vault};

use crate::output::{Output, OutputFormat};

/// List platforms in use with link counts
pub fn list(vault: &Vault, output: &Output) -> Result<()> {
    output.print_counts("platform", &vault.platforms());
    Ok(())
}

/// Guess the platform label for a URL
pub fn guess(url: String, output: &Output) -> Result<()> {
    let platform = guess_platform_for_url(&url);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({"url": url, "platform": platform})
            );
        }
        OutputFormat::Quiet => {
            if let Some(platform) = platform {
                println!("{}", platform);
            }
        }
        OutputFormat::Human => match platform {
            Some(platform) => println!("{}", platform),
            None => println!("No known platform for {}", url),
        },
    }

    Ok(())
}
