//! Export and import of the link collection
//!
//! The portable format is a JSON object:
//!
//! ```text
//! { "links": [ <Link>... ], "exportDate": "<ISO-8601>", "version": "1.0.0" }
//! ```
//!
//! Import is lenient about individual records: anything lacking a
//! non-empty `url`, `platform`, `id` or `dateAdded` is skipped. The whole
//! import fails only when the payload is not JSON, has no `links` array,
//! or no record survives.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{LinkError, LinkResult};
use crate::models::Link;

/// Version tag written into every export
pub const EXPORT_VERSION: &str = "1.0.0";

/// A full snapshot of the collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub links: Vec<Link>,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

impl ExportDocument {
    /// Snapshot the given links, stamped with the current time
    pub fn new(links: &[Link]) -> Self {
        Self {
            links: links.to_vec(),
            export_date: Utc::now(),
            version: EXPORT_VERSION.to_string(),
        }
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Suggested file name for an export taken at `date`
pub fn default_export_file_name(date: DateTime<Utc>) -> String {
    format!("linkvault-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Convert one entry of the `links` array to a [`Link`]
///
/// Only `id`, `url`, `platform` and `dateAdded` are required. Optional
/// fields that are missing, null or of the wrong type take their defaults.
fn record_to_link(record: &Value) -> Option<Link> {
    let id = required_str(record, "id")?;
    let url = required_str(record, "url")?;
    let platform = required_str(record, "platform")?;
    let date_added = parse_timestamp(&required_str(record, "dateAdded")?)?;

    // A missing or earlier modification time falls back to date_added
    let date_modified = record
        .get("dateModified")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .map_or(date_added, |t| t.max(date_added));

    let tags = record
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let description = record
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(Link {
        id,
        url,
        platform,
        tags,
        description,
        date_added,
        date_modified,
    })
}

fn required_str(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

/// Parse an ISO-8601 timestamp
///
/// Accepts RFC 3339, a date-time without offset (taken as UTC) and a bare
/// date (midnight UTC).
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(value, format) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
}

/// Parse and validate an import payload
///
/// Returns the surviving records in file order.
pub fn parse_import(bytes: &[u8]) -> LinkResult<Vec<Link>> {
    let document: Value = serde_json::from_slice(bytes).map_err(LinkError::Parse)?;

    let records = document
        .get("links")
        .and_then(Value::as_array)
        .ok_or_else(|| LinkError::Format("expected a \"links\" array".to_string()))?;

    let links: Vec<Link> = records
        .iter()
        .filter_map(record_to_link)
        .collect();

    let skipped = records.len() - links.len();
    if skipped > 0 {
        warn!(skipped, "Skipped import records missing required fields");
    }
    debug!(valid = links.len(), "Parsed import file");

    if links.is_empty() {
        return Err(LinkError::EmptyImport);
    }
    Ok(links)
}
