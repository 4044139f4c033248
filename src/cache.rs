//! Client side of the cache invalidation control.
//!
//! The control disables itself while the POST is in flight and decides what
//! the page should do with the answer: reload pages whose content depends on
//! the cleared cache, or alert the user on failure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FetchResult;

/// Which server-side cache to invalidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKind {
    Github,
    S3,
}

impl CacheKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheKind::Github => "github",
            CacheKind::S3 => "s3",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/cache/clear/{kind}`, for both success and error statuses.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClearCacheResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl ClearCacheResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Pages that show cached data and must reload after a successful clear.
pub const RELOAD_PAGES: [&str; 2] = ["/storage", "/pipelines"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheClearOutcome {
    Reload,
    Stay,
    Alert(String),
}

#[derive(Debug, Clone, Default)]
pub struct CacheClearButton {
    busy: bool,
}

impl CacheClearButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the control is currently disabled.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Disable the control. Returns `false` if a clear is already running.
    pub fn begin(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// Re-enable the control and decide what the page should do.
    pub fn finish(&mut self, result: FetchResult<ClearCacheResponse>, current_page: &str) -> CacheClearOutcome {
        self.busy = false;
        match result {
            Ok(resp) if resp.is_success() => {
                tracing::debug!(message = %resp.message, "cache cleared");
                if RELOAD_PAGES.contains(&current_page) {
                    CacheClearOutcome::Reload
                } else {
                    CacheClearOutcome::Stay
                }
            }
            Ok(resp) => {
                tracing::error!(message = %resp.message, "cache clear failed");
                CacheClearOutcome::Alert(format!("Failed to clear cache: {}", resp.message))
            }
            Err(e) => {
                tracing::error!(error = %e, "cache clear error");
                CacheClearOutcome::Alert(format!("Failed to clear cache: {}", e))
            }
        }
    }
}
