//! LinkVault CLI
//!
//! Command-line interface for LinkVault - save, tag and find links.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use linkvault_core::{Config, ImportPolicy, LinkError, StorageError, Vault};

mod clipboard;
mod commands;
mod logging;
mod output;
mod prompt;

use commands::link::FieldArgs;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linkvault")]
#[command(about = "LinkVault - save, tag and find links")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new link
    Add {
        /// URL to save
        url: String,
        /// Platform name (guessed from the URL when omitted)
        #[arg(short, long)]
        platform: Option<String>,
        /// Comma-separated tags
        #[arg(short, long)]
        tags: Option<String>,
        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List links
    #[command(alias = "ls")]
    List {
        /// Only links whose URL, platform, description or tags contain this text
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only links on this platform
        #[arg(short, long, default_value = "")]
        platform: String,
    },
    /// Search links
    Search {
        /// Search query
        query: String,
        /// Only links on this platform
        #[arg(short, long, default_value = "")]
        platform: String,
    },
    /// Show link details
    Show {
        /// Link ID (full ID or prefix)
        id: String,
    },
    /// Edit a link
    Edit {
        /// Link ID (full ID or prefix)
        id: String,
        /// New URL
        #[arg(long)]
        url: Option<String>,
        /// New platform
        #[arg(long)]
        platform: Option<String>,
        /// New comma-separated tags (replaces existing tags)
        #[arg(long)]
        tags: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID (full ID or prefix)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Open a link in the browser
    Open {
        /// Link ID (full ID or prefix)
        id: String,
    },
    /// Copy a link's URL to the clipboard
    Copy {
        /// Link ID (full ID or prefix)
        id: String,
    },
    /// Delete all links
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List platforms with link counts
    Platforms,
    /// List tags with link counts
    Tags,
    /// Guess the platform for a URL
    Guess {
        /// URL to inspect
        url: String,
    },
    /// Export all links to a JSON file
    Export {
        /// Output file (`-` for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import links from a JSON export
    Import {
        /// Export file to read
        file: PathBuf,
        /// Keep existing links, overwriting those with the same ID
        #[arg(long, conflicts_with = "replace")]
        merge: bool,
        /// Discard existing links first
        #[arg(long, conflicts_with = "merge")]
        replace: bool,
        /// Skip confirmation when replacing
        #[arg(short, long)]
        yes: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show storage location and counts
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, import_policy)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    match run(cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    let config = Config::load_with_cli_override(cli.config.as_ref())?;
    logging::init(&config, cli.verbose);

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), output);
    }

    let import_policy = config.import_policy;
    let mut vault = Vault::open_with_config(config)?;

    match cli.command {
        Commands::Add {
            url,
            platform,
            tags,
            description,
        } => commands::link::add(
            &mut vault,
            url,
            FieldArgs {
                url: None,
                platform,
                tags,
                description,
            },
            output,
        ),
        Commands::List { search, platform } => {
            commands::link::list(&vault, search, platform, output)
        }
        Commands::Search { query, platform } => {
            commands::link::list(&vault, query, platform, output)
        }
        Commands::Show { id } => commands::link::show(&vault, id, output),
        Commands::Edit {
            id,
            url,
            platform,
            tags,
            description,
        } => commands::link::edit(
            &mut vault,
            id,
            FieldArgs {
                url,
                platform,
                tags,
                description,
            },
            output,
        ),
        Commands::Delete { id, yes } => commands::link::delete(&mut vault, id, yes, output),
        Commands::Open { id } => commands::link::open(&vault, id, output),
        Commands::Copy { id } => commands::link::copy(&vault, id, output),
        Commands::Clear { yes } => commands::link::clear(&mut vault, yes, output),
        Commands::Platforms => commands::platform::list(&vault, output),
        Commands::Tags => commands::tag::list(&vault, output),
        Commands::Guess { url } => commands::platform::guess(url, output),
        Commands::Export { output: path } => commands::transfer::export(&vault, path, output),
        Commands::Import {
            file,
            merge,
            replace,
            yes,
        } => {
            let policy = if replace {
                ImportPolicy::Replace
            } else if merge {
                ImportPolicy::Merge
            } else {
                import_policy
            };
            commands::transfer::import(&mut vault, file, policy, yes, output)
        }
        Commands::Status => {
            let config = vault.config().cloned().unwrap_or_default();
            commands::status::show(&vault, &config, output)
        }
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Print the error chain, plus a hint when storage failed in a known way
fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {:#}", err);

    let suggestion = err.chain().find_map(|cause| {
        if let Some(LinkError::Persistence(storage)) = cause.downcast_ref::<LinkError>() {
            return storage.recovery_suggestion();
        }
        cause
            .downcast_ref::<StorageError>()
            .and_then(StorageError::recovery_suggestion)
    });

    if let Some(hint) = suggestion {
        eprintln!("Hint: {}", hint);
    }
}
