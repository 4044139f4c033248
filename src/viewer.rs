//! Construction options and the resolved file-selection behaviour.

use std::fmt;
use std::rc::Rc;

use crate::config::ViewerConfig;
use crate::types::Item;

/// Shown in the content pane when a file could not be read.
pub const CONTENT_ERROR_PLACEHOLDER: &str = "Error loading file content";

/// Callback that takes over file selection from the embedded viewer.
pub type FileSelectHandler = Rc<dyn Fn(&Item)>;

/// Options accepted when the widget is created.
#[derive(Clone)]
pub struct BrowserOptions {
    pub show_download_button: bool,
    pub show_content_viewer: bool,
    pub on_file_select: Option<FileSelectHandler>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self { show_download_button: true, show_content_viewer: true, on_file_select: None }
    }
}

impl fmt::Debug for BrowserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserOptions")
            .field("show_download_button", &self.show_download_button)
            .field("show_content_viewer", &self.show_content_viewer)
            .field("on_file_select", &self.on_file_select.is_some())
            .finish()
    }
}

impl BrowserOptions {
    pub fn from_config(cfg: &ViewerConfig) -> Self {
        Self {
            show_download_button: cfg.show_download_button,
            show_content_viewer: cfg.show_content_viewer,
            on_file_select: None,
        }
    }

    pub fn with_file_select(mut self, handler: impl Fn(&Item) + 'static) -> Self {
        self.on_file_select = Some(Rc::new(handler));
        self
    }

    pub fn without_content_viewer(mut self) -> Self {
        self.show_content_viewer = false;
        self
    }

    pub fn without_download_button(mut self) -> Self {
        self.show_download_button = false;
        self
    }

    /// An external handler wins over the embedded viewer.
    pub fn viewer_mode(&self) -> ViewerMode {
        match (&self.on_file_select, self.show_content_viewer) {
            (Some(handler), _) => ViewerMode::External(handler.clone()),
            (None, true) => ViewerMode::Embedded,
            (None, false) => ViewerMode::Disabled,
        }
    }
}

/// What selecting a file does, fixed at construction.
#[derive(Clone)]
pub enum ViewerMode {
    /// Fetch the file and show it in the widget's own content pane.
    Embedded,
    /// Hand the item to the embedding page; no network access.
    External(FileSelectHandler),
    /// Selecting a file does nothing.
    Disabled,
}

impl fmt::Debug for ViewerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerMode::Embedded => f.write_str("Embedded"),
            ViewerMode::External(_) => f.write_str("External"),
            ViewerMode::Disabled => f.write_str("Disabled"),
        }
    }
}

impl ViewerMode {
    pub fn shows_content_pane(&self) -> bool {
        matches!(self, ViewerMode::Embedded)
    }
}
