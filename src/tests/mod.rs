//! Integration style tests for the widget core.
//!
//! ## Test Modules
//!
//! - **support**: scripted in-memory `StorageApi` used by the other modules
//! - **state_tests**: the state machine without any transport
//! - **browser_tests**: the async driver, including out-of-order responses
//! - **config_tests**: configuration loading and validation
//! - **http_tests**: the reqwest transport against an in-process fake backend
//!
//! Individual modules can be run with:
//! ```bash
//! cargo test browser_tests
//! ```

pub mod support;
pub mod browser_tests;
pub mod config_tests;
