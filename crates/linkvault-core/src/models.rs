//! Data models for LinkVault
//!
//! Defines the single stored entity, [`Link`], and the user-editable
//! subset of its fields, [`LinkFields`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{LinkError, LinkResult};

/// A saved link with platform label, tags and timestamps
///
/// Field names serialize in camelCase (`dateAdded`, `dateModified`) to
/// match the export document format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Opaque unique identifier, never changes
    pub id: String,
    /// The URL
    pub url: String,
    /// Free-text label for the site or service ("GitHub")
    pub platform: String,
    /// Trimmed, non-empty tags in user order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional description (empty when unset)
    #[serde(default)]
    pub description: String,
    /// When this link was created
    pub date_added: DateTime<Utc>,
    /// When this link was last edited
    pub date_modified: DateTime<Utc>,
}

impl Link {
    /// Create a new link from validated fields with a fresh id
    pub fn new(fields: LinkFields) -> LinkResult<Self> {
        Self::with_id(Uuid::new_v4().to_string(), fields)
    }

    /// Create a link with a specific id (both timestamps set to now)
    pub fn with_id(id: impl Into<String>, fields: LinkFields) -> LinkResult<Self> {
        let fields = fields.normalized();
        fields.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: id.into(),
            url: fields.url,
            platform: fields.platform,
            tags: fields.tags,
            description: fields.description,
            date_added: now,
            date_modified: now,
        })
    }

    /// Replace every user-editable field and refresh `date_modified`
    ///
    /// `id` and `date_added` are left alone. The new modification time is
    /// never earlier than `date_added`, even if the clock moved backwards.
    pub fn apply(&mut self, fields: LinkFields) -> LinkResult<()> {
        let fields = fields.normalized();
        fields.validate()?;

        self.url = fields.url;
        self.platform = fields.platform;
        self.tags = fields.tags;
        self.description = fields.description;
        self.date_modified = Utc::now().max(self.date_added);
        Ok(())
    }

    /// The user-editable fields of this link
    pub fn fields(&self) -> LinkFields {
        LinkFields {
            url: self.url.clone(),
            platform: self.platform.clone(),
            tags: self.tags.clone(),
            description: self.description.clone(),
        }
    }

    /// Whether the link was edited after creation
    pub fn is_modified(&self) -> bool {
        self.date_modified != self.date_added
    }
}

/// The fields a user supplies when adding or editing a link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFields {
    pub url: String,
    pub platform: String,
    pub tags: Vec<String>,
    pub description: String,
}

impl LinkFields {
    pub fn new(url: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            platform: platform.into(),
            tags: Vec::new(),
            description: String::new(),
        }
    }

    /// Set all tags (replacing existing)
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Trim every field and drop empty tags
    pub fn normalized(self) -> Self {
        Self {
            url: self.url.trim().to_string(),
            platform: self.platform.trim().to_string(),
            tags: self
                .tags
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            description: self.description.trim().to_string(),
        }
    }

    /// Check url and platform
    pub fn validate(&self) -> LinkResult<()> {
        if self.url.is_empty() || self.platform.is_empty() {
            return Err(LinkError::validation(
                "Please fill in URL and Platform fields",
            ));
        }
        if !is_valid_url(&self.url) {
            return Err(LinkError::validation(format!(
                "Please enter a valid URL: {}",
                self.url
            )));
        }
        Ok(())
    }
}

/// Check that a string parses as an absolute URL
pub fn is_valid_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

/// Split comma-separated tag input into trimmed, non-empty tags
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github() -> LinkFields {
        LinkFields::new("https://github.com/rust-lang/rust", "GitHub")
    }

    #[test]
    fn test_link_new() {
        let link = Link::new(github().with_tags(["rust", "lang"])).unwrap();
        assert_eq!(link.url, "https://github.com/rust-lang/rust");
        assert_eq!(link.platform, "GitHub");
        assert_eq!(link.tags, vec!["rust", "lang"]);
        assert!(link.description.is_empty());
        assert_eq!(link.date_added, link.date_modified);
        assert!(!link.is_modified());
        assert!(!link.id.is_empty());
    }

    #[test]
    fn test_link_new_ids_differ() {
        let a = Link::new(github()).unwrap();
        let b = Link::new(github()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_link_new_trims_input() {
        let fields = LinkFields::new("  https://example.com  ", " Blog ")
            .with_tags([" a ", "", "  ", "b"])
            .with_description("  notes ");
        let link = Link::new(fields).unwrap();
        assert_eq!(link.url, "https://example.com");
        assert_eq!(link.platform, "Blog");
        assert_eq!(link.tags, vec!["a", "b"]);
        assert_eq!(link.description, "notes");
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = Link::new(LinkFields::new("", "GitHub")).unwrap_err();
        assert!(matches!(err, LinkError::Validation(_)));

        let err = Link::new(LinkFields::new("https://example.com", "   ")).unwrap_err();
        assert!(matches!(err, LinkError::Validation(_)));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = Link::new(LinkFields::new("not a url", "Web")).unwrap_err();
        assert!(matches!(err, LinkError::Validation(ref m) if m.contains("valid URL")));
    }

    #[test]
    fn test_apply_preserves_identity() {
        let mut link = Link::new(github()).unwrap();
        let id = link.id.clone();
        let added = link.date_added;
        std::thread::sleep(std::time::Duration::from_millis(10));

        link.apply(
            LinkFields::new("https://reddit.com/r/rust", "Reddit").with_description("sub"),
        )
        .unwrap();

        assert_eq!(link.id, id);
        assert_eq!(link.date_added, added);
        assert!(link.date_modified > added);
        assert!(link.is_modified());
        assert_eq!(link.platform, "Reddit");
        assert_eq!(link.description, "sub");
    }

    #[test]
    fn test_apply_invalid_leaves_link_untouched() {
        let mut link = Link::new(github()).unwrap();
        let before = link.clone();
        assert!(link.apply(LinkFields::new("nope", "GitHub")).is_err());
        assert_eq!(link, before);
    }

    #[test]
    fn test_fields_round_trip() {
        let fields = github().with_tags(["x"]).with_description("d");
        let link = Link::new(fields.clone()).unwrap();
        assert_eq!(link.fields(), fields);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("rust, web ,cli"), vec!["rust", "web", "cli"]);
        assert_eq!(parse_tags("a,,b, "), vec!["a", "b"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com/path?q=1"));
        assert!(is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_link_serialization_field_names() {
        let link = Link::new(github()).unwrap();
        let json = serde_json::to_value(&link).unwrap();
        for key in [
            "id",
            "url",
            "platform",
            "tags",
            "description",
            "dateAdded",
            "dateModified",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }

        let back: Link = serde_json::from_value(json).unwrap();
        assert_eq!(back, link);
    }
}
