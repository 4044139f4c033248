//! # Storage Browser
//!
//! Headless core of a directory browsing widget for storage backends. Given a
//! backend identifier and a path it fetches the listing, sorts and paginates
//! the entries on the client, and optionally previews the text content of a
//! selected file.
//!
//! ## Architecture
//!
//! - **Serde**: JSON documents of the storage API
//! - **Chrono**: timestamp parsing for date sorting and formatting
//! - **Reqwest** (feature `http`): native transport; the web UI plugs in its own
//! - **Tracing**: structured logging of requests, failures and dropped responses
//!
//! ## Core Components
//!
//! - [`api`]: transport trait and endpoint URLs
//! - [`browser`]: async driver that issues requests and applies responses
//! - [`cache`]: cache invalidation control
//! - [`config`]: configuration loading and validation
//! - [`error`]: request failures
//! - [`format`]: size and date rendering
//! - [`navigation`]: backend/path state and breadcrumbs
//! - [`paginate`]: page arithmetic
//! - [`sort`]: ordering rules including natural name comparison
//! - [`state`]: the widget state machine, with stale-response protection
//! - [`types`]: data transfer objects and view enums
//! - [`viewer`]: construction options and file-selection modes

pub mod api;
pub mod browser;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod navigation;
pub mod paginate;
pub mod sort;
pub mod state;
pub mod types;
pub mod viewer;

pub use browser::FileBrowser;
pub use error::{FetchError, FetchResult};
pub use state::BrowserState;
pub use types::{Item, ItemKind, SortDirection, SortKey};
pub use viewer::BrowserOptions;

#[cfg(test)]
mod tests;
