//! Async driver around [`BrowserState`].
//!
//! The driver owns the transport and the state. State lives in a `RefCell`
//! and is only borrowed between awaits, so several loads issued from UI
//! callbacks can be in flight at once; the sequence numbers in the state
//! decide which response wins.

use std::cell::{Ref, RefCell};

use crate::api::{Endpoints, StorageApi};
use crate::config::BrowserConfig;
use crate::state::{BrowserState, LoadOutcome, ViewOutcome};
use crate::types::Item;
use crate::viewer::{BrowserOptions, ViewerMode};

/// What opening a row did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Directory(LoadOutcome),
    File(ViewOutcome),
}

pub struct FileBrowser<A> {
    api: A,
    endpoints: Endpoints,
    state: RefCell<BrowserState>,
    viewer: ViewerMode,
    show_download_button: bool,
}

impl<A: StorageApi> FileBrowser<A> {
    /// Widget with default view settings and same-origin URLs.
    pub fn new(api: A, options: BrowserOptions) -> Self {
        Self {
            api,
            endpoints: Endpoints::default(),
            state: RefCell::new(BrowserState::default()),
            viewer: options.viewer_mode(),
            show_download_button: options.show_download_button,
        }
    }

    /// Widget configured from a loaded [`BrowserConfig`]. The external file
    /// handler, if any, still has to come from code.
    pub fn from_config(api: A, cfg: &BrowserConfig, options: BrowserOptions) -> Self {
        Self {
            api,
            endpoints: Endpoints::new(&cfg.api.base_url),
            state: RefCell::new(BrowserState::new(&cfg.view)),
            viewer: options.viewer_mode(),
            show_download_button: options.show_download_button,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn viewer_mode(&self) -> &ViewerMode {
        &self.viewer
    }

    /// Read access for rendering. Do not hold the guard across an `.await`.
    pub fn state(&self) -> Ref<'_, BrowserState> {
        self.state.borrow()
    }

    /// Run a synchronous view mutation (sorting, paging, toggles).
    pub fn update<R>(&self, f: impl FnOnce(&mut BrowserState) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }

    pub async fn load_directory(&self, backend: &str, path: &str) -> LoadOutcome {
        let ticket = match self.state.borrow_mut().begin_load(backend, path) {
            Ok(ticket) => ticket,
            Err(e) => return LoadOutcome::Failed(e),
        };
        let result = self.api.list(ticket.backend(), ticket.path()).await;
        self.state.borrow_mut().finish_load(ticket, result)
    }

    /// Navigate within the current backend.
    pub async fn navigate_to(&self, path: &str) -> LoadOutcome {
        let backend = self.state.borrow().backend().to_string();
        self.load_directory(&backend, path).await
    }

    /// Jump to the ancestor named by breadcrumb `index`.
    pub async fn navigate_to_crumb(&self, index: usize) -> LoadOutcome {
        let path = self.state.borrow().path_up_to(index);
        self.navigate_to(&path).await
    }

    /// Go to the parent directory; `None` when already at the root.
    pub async fn go_up(&self) -> Option<LoadOutcome> {
        let parent = self.state.borrow().navigation().parent_path()?;
        Some(self.navigate_to(&parent).await)
    }

    pub async fn refresh(&self) -> LoadOutcome {
        let path = self.state.borrow().path().to_string();
        self.navigate_to(&path).await
    }

    /// Row activation: enter directories, view files.
    pub async fn open(&self, item: &Item) -> OpenOutcome {
        if item.is_dir() {
            let child = self.state.borrow().navigation().child_path(&item.name);
            OpenOutcome::Directory(self.navigate_to(&child).await)
        } else {
            OpenOutcome::File(self.view_file(item).await)
        }
    }

    pub async fn view_file(&self, item: &Item) -> ViewOutcome {
        if !item.is_file() {
            tracing::warn!(name = %item.name, "ignoring view request for a directory");
            return ViewOutcome::NotAFile;
        }
        match &self.viewer {
            ViewerMode::External(handler) => {
                (handler.as_ref())(item);
                ViewOutcome::HandedOff
            }
            ViewerMode::Disabled => ViewOutcome::Disabled,
            ViewerMode::Embedded => {
                let ticket = match self.state.borrow_mut().begin_view(item) {
                    Ok(ticket) => ticket,
                    Err(_) => return ViewOutcome::NotAFile,
                };
                let result = self.api.read_text(ticket.backend(), ticket.dir(), ticket.name()).await;
                self.state.borrow_mut().finish_view(ticket, result)
            }
        }
    }

    pub fn close_viewer(&self) {
        self.state.borrow_mut().close_viewer();
    }

    /// Download link for a file row, when the download affordance is enabled.
    pub fn download_url(&self, item: &Item) -> Option<String> {
        if !self.show_download_button || !item.is_file() {
            return None;
        }
        let state = self.state.borrow();
        Some(self.endpoints.download_url(state.backend(), state.path(), &item.name))
    }
}
