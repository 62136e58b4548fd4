//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::{DateTime, Local, Utc};
use serde_json::Value;

use linkvault_core::Link;

/// URLs longer than this are shortened in listings
const URL_DISPLAY_WIDTH: usize = 50;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single link
    pub fn print_link(&self, link: &Link) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", link.id);
                println!("URL:         {}", link.url);
                println!("Platform:    {}", link.platform);
                if !link.description.is_empty() {
                    println!("Description: {}", link.description);
                }
                if !link.tags.is_empty() {
                    println!("Tags:        {}", link.tags.join(", "));
                }
                println!("Added:       {}", format_date(&link.date_added));
                if link.is_modified() {
                    println!("Modified:    {}", format_date(&link.date_modified));
                }
            }
            OutputFormat::Json => print_json(link),
            OutputFormat::Quiet => {
                println!("{}", link.id);
            }
        }
    }

    /// Print a link that was just created or changed
    pub fn print_saved(&self, message: &str, link: &Link) {
        if self.format == OutputFormat::Human {
            self.success(message);
        }
        self.print_link(link);
    }

    /// Print a list of links
    pub fn print_links(&self, links: &[&Link]) {
        match self.format {
            OutputFormat::Human => {
                if links.is_empty() {
                    println!("No links found.");
                    return;
                }
                for link in links {
                    let tags = if link.tags.is_empty() {
                        String::new()
                    } else {
                        format!(" [{}]", link.tags.join(", "))
                    };
                    println!(
                        "{} | {} | {}{}",
                        short_id(&link.id),
                        truncate(&link.platform, 15),
                        truncate(&link.url, URL_DISPLAY_WIDTH),
                        tags
                    );
                }
                println!("\n{}", link_count(links.len()));
            }
            OutputFormat::Json => print_json(&links),
            OutputFormat::Quiet => {
                for link in links {
                    println!("{}", link.id);
                }
            }
        }
    }

    /// Print names with usage counts (platforms, tags)
    pub fn print_counts(&self, kind: &str, counts: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if counts.is_empty() {
                    println!("No {}s found.", kind);
                    return;
                }
                for (name, count) in counts {
                    println!("{} ({})", name, count);
                }
                println!("\n{} {}(s)", counts.len(), kind);
            }
            OutputFormat::Json => {
                let items: Vec<_> = counts
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&items);
            }
            OutputFormat::Quiet => {
                for (name, _) in counts {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message with extra JSON fields
    pub fn success_with(&self, message: &str, fields: Value) {
        match self.format {
            OutputFormat::Json => {
                let mut body = serde_json::json!({"status": "success", "message": message});
                if let (Some(body), Value::Object(extra)) = (body.as_object_mut(), fields) {
                    body.extend(extra);
                }
                println!("{}", body);
            }
            _ => self.success(message),
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// "1 link", "3 links"
pub fn link_count(n: usize) -> String {
    format!("{} link{}", n, if n == 1 { "" } else { "s" })
}

/// First eight characters of an id
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Local date and hour:minute
fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
