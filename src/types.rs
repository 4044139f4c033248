//! Type definitions shared by the widget core and its front ends.
//!
//! These mirror the JSON documents served by the storage API
//! (`/api/storage/{backend}/list`) plus the small enums that make up the
//! widget's view state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    File,
    Directory,
}

/// One entry of a directory listing.
///
/// `size` is only meaningful for files; the backend reports `null` for
/// directories. Timestamps are kept as the raw strings the backend sent and
/// parsed on demand, so a single odd value never fails a whole listing.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, alias = "modifiedAt", alias = "modified_at", skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(default, alias = "createdAt", alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Item {
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::File,
            size: Some(size),
            modified: None,
            created: None,
            uri: None,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Directory,
            size: None,
            modified: None,
            created: None,
            uri: None,
        }
    }

    pub fn with_modified(mut self, ts: impl Into<String>) -> Self {
        self.modified = Some(ts.into());
        self
    }

    pub fn with_created(mut self, ts: impl Into<String>) -> Self {
        self.created = Some(ts.into());
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == ItemKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    /// Parsed modification time; `None` when absent or unparseable.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified.as_deref().and_then(parse_timestamp)
    }

    /// Parsed creation time; `None` when absent or unparseable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.as_deref().and_then(parse_timestamp)
    }
}

/// Response body of the listing endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListResponse {
    pub items: Vec<Item>,
}

/// Parse a backend timestamp into an absolute instant.
///
/// Accepts RFC 3339, RFC 2822 (what Flask-style backends emit for datetimes,
/// e.g. `Tue, 15 Nov 1994 12:45:26 GMT`) and naive ISO date-times, which are
/// read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Column the listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    /// Alphanumeric-aware name ordering (`file2` before `file10`).
    #[serde(alias = "name-numeric")]
    NaturalName,
    Size,
    Modified,
    Created,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::NaturalName,
        SortKey::Size,
        SortKey::Modified,
        SortKey::Created,
    ];

    pub fn is_name_based(self) -> bool {
        matches!(self, SortKey::Name | SortKey::NaturalName)
    }

    pub fn is_date(self) -> bool {
        matches!(self, SortKey::Modified | SortKey::Created)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::NaturalName => "natural-name",
            SortKey::Size => "size",
            SortKey::Modified => "modified",
            SortKey::Created => "created",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::NaturalName => "Name (natural)",
            SortKey::Size => "Size",
            SortKey::Modified => "Modified",
            SortKey::Created => "Created",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "natural-name" | "name-numeric" => Ok(SortKey::NaturalName),
            "size" => Ok(SortKey::Size),
            "modified" => Ok(SortKey::Modified),
            "created" => Ok(SortKey::Created),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn apply(self, ord: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Optional metadata columns a user can switch on next to the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataColumn {
    Size,
    Modified,
    Created,
}

impl MetadataColumn {
    pub const ALL: [MetadataColumn; 3] = [MetadataColumn::Size, MetadataColumn::Modified, MetadataColumn::Created];

    pub fn label(self) -> &'static str {
        match self {
            MetadataColumn::Size => "Size",
            MetadataColumn::Modified => "Modified",
            MetadataColumn::Created => "Created",
        }
    }
}
