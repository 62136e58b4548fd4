//! LinkVault Core Library
//!
//! This crate provides the core functionality for LinkVault, a personal
//! collection of links labelled by platform, tagged, searchable, and
//! portable through a JSON export format.
//!
//! # Architecture
//!
//! - **Repository**: the ordered in-memory collection, newest first
//! - **Key-value store**: persists the whole collection under one key
//! - **Vault**: runs each mutation on a copy and commits it only after
//!   the store accepted it
//!
//! # Quick Start
//!
//! ```text
//! let mut vault = Vault::open()?;
//!
//! // Add a link
//! vault.add_link(LinkFields::new("https://github.com/rust-lang", "GitHub"))?;
//!
//! // Query links
//! let hits = vault.filter(&LinkFilter::new("rust", ""));
//! ```
//!
//! # Modules
//!
//! - `vault`: Repository plus persistence (main entry point)
//! - `models`: The `Link` record and editable `LinkFields`
//! - `repository`: In-memory collection and import merge rules
//! - `filter`: Search and platform filtering
//! - `platform`: Platform guessing from hostnames
//! - `transfer`: Export document and import validation
//! - `storage`: Key-value persistence backends
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod platform;
pub mod repository;
pub mod storage;
pub mod transfer;
pub mod vault;

pub use config::Config;
pub use error::{LinkError, LinkResult};
pub use filter::{filter_links, LinkFilter};
pub use models::{is_valid_url, parse_tags, Link, LinkFields};
pub use platform::{guess_platform, guess_platform_for_url};
pub use repository::{ImportPolicy, LinkRepository};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use transfer::{default_export_file_name, parse_import, ExportDocument, EXPORT_VERSION};
pub use vault::Vault;
