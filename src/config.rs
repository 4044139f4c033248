use std::path::Path;

use serde::Deserialize;

use crate::types::{MetadataColumn, SortDirection, SortKey};

const DEFAULTS: &str = include_str!("../config/default.toml");

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Prefix for every request URL; empty means same-origin relative URLs.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ViewerConfig {
    pub show_download_button: bool,
    pub show_content_viewer: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ViewDefaults {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub show_time: bool,
    pub metadata: Vec<MetadataColumn>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BrowserConfig {
    pub api: ApiConfig,
    pub viewer: ViewerConfig,
    pub view: ViewDefaults,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        // Mirror defaults from config/default.toml
        Self {
            api: ApiConfig { base_url: String::new() },
            viewer: ViewerConfig { show_download_button: true, show_content_viewer: true },
            view: ViewDefaults::default(),
        }
    }
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            page_size: 25,
            page_size_options: vec![10, 25, 50, 100],
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            show_time: false,
            metadata: vec![MetadataColumn::Size],
        }
    }
}

fn defaults_builder() -> ::config::ConfigBuilder<::config::builder::DefaultState> {
    ::config::Config::builder().add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
}

/// Embedded defaults, with an optional TOML document layered on top.
pub fn load_from_str(overrides: &str) -> anyhow::Result<BrowserConfig> {
    let cfg = defaults_builder()
        .add_source(::config::File::from_str(overrides, ::config::FileFormat::Toml))
        .build()?;
    let browser_cfg: BrowserConfig = cfg.try_deserialize()?;
    validate(&browser_cfg)?;
    Ok(browser_cfg)
}

/// Embedded defaults, with a TOML file layered on top. The file must exist.
pub fn load_file(path: &Path) -> anyhow::Result<BrowserConfig> {
    let cfg = defaults_builder()
        .add_source(::config::File::from(path).format(::config::FileFormat::Toml).required(true))
        .build()?;
    let browser_cfg: BrowserConfig = cfg.try_deserialize()?;
    validate(&browser_cfg)?;
    tracing::debug!(path = %path.display(), "loaded browser config");
    Ok(browser_cfg)
}

pub fn validate(cfg: &BrowserConfig) -> anyhow::Result<()> {
    let view = &cfg.view;
    if view.page_size == 0 {
        return Err(anyhow::anyhow!("view.page_size must be > 0"));
    }
    if view.page_size_options.is_empty() {
        return Err(anyhow::anyhow!("view.page_size_options must not be empty"));
    }
    if view.page_size_options.iter().any(|&s| s == 0) {
        return Err(anyhow::anyhow!("view.page_size_options must all be > 0"));
    }
    if !view.page_size_options.contains(&view.page_size) {
        return Err(anyhow::anyhow!(
            "view.page_size {} is not one of view.page_size_options {:?}",
            view.page_size,
            view.page_size_options
        ));
    }
    if cfg.api.base_url.ends_with('/') {
        tracing::warn!("api.base_url ends with '/', request URLs will contain '//'");
    }
    Ok(())
}
