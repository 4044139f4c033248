//! Navigation state: which backend and which directory the widget shows.

/// A single breadcrumb: the segment label and the path it jumps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    pub path: String,
}

/// Current (backend, path) pair.
///
/// Paths are stored without leading or trailing slashes; the empty string is
/// the backend root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    backend: String,
    path: String,
}

impl Navigation {
    pub fn new(backend: &str, path: &str) -> Self {
        Self { backend: backend.to_string(), path: normalize_path(path) }
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Non-empty segments of the current path.
    pub fn path_parts(&self) -> Vec<&str> {
        self.path.split('/').filter(|p| !p.is_empty()).collect()
    }

    /// Path made of the segments `0..=index`; the whole path when `index` is past the end.
    pub fn path_up_to(&self, index: usize) -> String {
        let parts = self.path_parts();
        let end = (index + 1).min(parts.len());
        parts[..end].join("/")
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.path_parts()
            .iter()
            .enumerate()
            .map(|(i, part)| Breadcrumb { label: part.to_string(), path: self.path_up_to(i) })
            .collect()
    }

    /// Path of the enclosing directory, `None` at the root.
    pub fn parent_path(&self) -> Option<String> {
        let parts = self.path_parts();
        if parts.is_empty() {
            return None;
        }
        Some(parts[..parts.len() - 1].join("/"))
    }

    /// Path of a direct child entry.
    pub fn child_path(&self, name: &str) -> String {
        join_path(&self.path, name)
    }
}

/// Trim surrounding slashes; the backend strips the leading one anyway.
/// Whitespace is part of entry names and is kept.
pub fn normalize_path(path: &str) -> String {
    path.trim_matches('/').to_string()
}

pub fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
