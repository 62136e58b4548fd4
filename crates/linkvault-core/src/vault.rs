//! Unified link vault
//!
//! The `Vault` pairs the in-memory [`LinkRepository`] with a
//! [`KeyValueStore`] and keeps them consistent.
//!
//! ## Commit discipline
//!
//! Each mutation runs against a copy of the repository. The copy is
//! written to the store as one value, and only after that write succeeds
//! does it become the live collection. A failed write leaves the vault
//! exactly as it was before the call.
//!
//! ## Usage
//!
//! ```ignore
//! let mut vault = Vault::open()?;
//!
//! let link = vault.add_link(LinkFields::new("https://github.com", "GitHub"))?;
//! let hits = vault.filter(&LinkFilter::new("git", ""));
//! ```

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::error::LinkResult;
use crate::filter::{self, LinkFilter};
use crate::models::{Link, LinkFields};
use crate::repository::{ImportPolicy, LinkRepository};
use crate::storage::{self, JsonFileStore, KeyValueStore};
use crate::transfer::{self, ExportDocument};

/// Link collection backed by a key-value store
pub struct Vault {
    /// The live collection
    repo: LinkRepository,
    /// Where the collection is persisted
    store: Box<dyn KeyValueStore>,
    /// Configuration, when opened from one
    config: Option<Config>,
}

impl Vault {
    /// Open the vault using the default configuration
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the file-backed vault described by `config`
    pub fn open_with_config(config: Config) -> Result<Self> {
        let store = JsonFileStore::from_config(&config);
        let mut vault = Self::with_store(Box::new(store))
            .with_context(|| format!("Failed to open link store in {:?}", config.data_dir))?;
        vault.config = Some(config);
        Ok(vault)
    }

    /// Open a vault over any store, loading the current collection
    pub fn with_store(store: Box<dyn KeyValueStore>) -> LinkResult<Self> {
        let links = storage::load_links(&*store)?;
        Ok(Self {
            repo: LinkRepository::from_links(links),
            store,
            config: None,
        })
    }

    /// Get the configuration, if the vault was opened from one
    pub fn config(&self) -> Option<&Config> {
        self.config.as_ref()
    }

    // ==================== Queries ====================

    /// All links, newest first
    pub fn links(&self) -> &[Link] {
        self.repo.list()
    }

    /// Get a link by ID
    pub fn get_link(&self, id: &str) -> Option<&Link> {
        self.repo.find_by_id(id)
    }

    /// Links matching a filter, in collection order
    pub fn filter(&self, filter: &LinkFilter) -> Vec<&Link> {
        filter.apply(self.repo.list())
    }

    /// Distinct platforms with counts, sorted by name
    pub fn platforms(&self) -> Vec<(String, usize)> {
        filter::platforms_with_counts(self.repo.list())
    }

    /// Distinct tags with counts, sorted by name
    pub fn tags_with_counts(&self) -> Vec<(String, usize)> {
        filter::tags_with_counts(self.repo.list())
    }

    pub fn link_count(&self) -> usize {
        self.repo.len()
    }

    // ==================== Mutations ====================

    /// Add a new link at the front of the collection
    pub fn add_link(&mut self, fields: LinkFields) -> LinkResult<Link> {
        self.commit(|repo| repo.add(fields).cloned())
    }

    /// Update an existing link's editable fields
    pub fn update_link(&mut self, id: &str, fields: LinkFields) -> LinkResult<Link> {
        self.commit(|repo| repo.update(id, fields).cloned())
    }

    /// Delete a link, returning it
    pub fn delete_link(&mut self, id: &str) -> LinkResult<Link> {
        self.commit(|repo| repo.delete(id))
    }

    /// Import an export document, returning the number of accepted records
    pub fn import(&mut self, bytes: &[u8], policy: ImportPolicy) -> LinkResult<usize> {
        let records = transfer::parse_import(bytes)?;
        self.import_records(records, policy)
    }

    /// Merge or replace with records already validated by [`transfer::parse_import`]
    pub fn import_records(&mut self, records: Vec<Link>, policy: ImportPolicy) -> LinkResult<usize> {
        self.commit(|repo| Ok(repo.import(records, policy)))
    }

    /// Remove every link and wipe the store
    pub fn clear(&mut self) -> LinkResult<()> {
        self.store.clear()?;
        self.repo.clear();
        Ok(())
    }

    /// Snapshot the collection for export
    pub fn export(&self) -> ExportDocument {
        ExportDocument::new(self.repo.list())
    }

    /// Apply `op` to a copy, persist the copy, then swap it in
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut LinkRepository) -> LinkResult<T>,
    ) -> LinkResult<T> {
        let mut draft = self.repo.clone();
        let result = op(&mut draft)?;
        storage::save_links(&mut *self.store, draft.list())?;
        self.repo = draft;
        debug!(count = self.repo.len(), "Committed links");
        Ok(result)
    }
}
