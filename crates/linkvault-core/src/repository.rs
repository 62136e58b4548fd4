//! In-memory link collection
//!
//! [`LinkRepository`] owns the ordered collection. It never touches
//! storage; [`crate::Vault`] flushes it after each mutation.
//!
//! Ordering: `add` prepends (newest first), `update` keeps position,
//! import merges append unknown ids at the end.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LinkError, LinkResult};
use crate::models::{Link, LinkFields};

/// How imported records are combined with the existing collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPolicy {
    /// Replace links with a matching id, append the rest
    #[default]
    Merge,
    /// Discard the existing collection
    Replace,
}

impl std::fmt::Display for ImportPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportPolicy::Merge => write!(f, "merge"),
            ImportPolicy::Replace => write!(f, "replace"),
        }
    }
}

impl std::str::FromStr for ImportPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(ImportPolicy::Merge),
            "replace" => Ok(ImportPolicy::Replace),
            other => Err(format!(
                "Unknown import policy '{}'. Use 'merge' or 'replace'.",
                other
            )),
        }
    }
}

/// Ordered, id-unique collection of links
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkRepository {
    links: Vec<Link>,
}

impl LinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-ordered collection (e.g. loaded from storage)
    pub fn from_links(links: Vec<Link>) -> Self {
        Self { links }
    }

    /// All links, newest first
    pub fn list(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Validate, create and prepend a new link
    pub fn add(&mut self, fields: LinkFields) -> LinkResult<&Link> {
        let mut link = Link::new(fields)?;
        // uuid v4 collisions are not expected, but ids from imports are arbitrary
        while self.position(&link.id).is_some() {
            link.id = uuid::Uuid::new_v4().to_string();
        }
        info!(id = %link.id, url = %link.url, "Added link");
        self.links.insert(0, link);
        Ok(&self.links[0])
    }

    /// Replace the editable fields of an existing link in place
    pub fn update(&mut self, id: &str, fields: LinkFields) -> LinkResult<&Link> {
        let index = self
            .position(id)
            .ok_or_else(|| LinkError::NotFound(id.to_string()))?;
        self.links[index].apply(fields)?;
        info!(id, "Updated link");
        Ok(&self.links[index])
    }

    /// Remove a link by id
    pub fn delete(&mut self, id: &str) -> LinkResult<Link> {
        let index = self
            .position(id)
            .ok_or_else(|| LinkError::NotFound(id.to_string()))?;
        info!(id, "Deleted link");
        Ok(self.links.remove(index))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Combine imported records with the collection
    ///
    /// With [`ImportPolicy::Merge`] a record whose id is already present
    /// replaces that link wholesale, keeping its position; other records
    /// are appended in import order. With [`ImportPolicy::Replace`] the
    /// collection becomes the imported records. In both cases a repeated
    /// id inside `records` overwrites its earlier occurrence.
    pub fn import(&mut self, records: Vec<Link>, policy: ImportPolicy) -> usize {
        let count = records.len();
        if policy == ImportPolicy::Replace {
            self.links.clear();
        }
        for record in records {
            match self.position(&record.id) {
                Some(index) => self.links[index] = record,
                None => self.links.push(record),
            }
        }
        info!(count, %policy, total = self.links.len(), "Imported links");
        count
    }

    /// Remove every link
    pub fn clear(&mut self) {
        self.links.clear();
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.links.iter().position(|l| l.id == id)
    }
}
