use chrono::{TimeZone, Utc};

use crate::config::ViewDefaults;
use crate::error::{validation, FetchError, FetchResult};
use crate::format;
use crate::navigation::{Breadcrumb, Navigation};
use crate::paginate::Paginator;
use crate::sort;
use crate::types::{Item, MetadataColumn, SortDirection, SortKey};
use crate::viewer::CONTENT_ERROR_PLACEHOLDER;

/// Handle for one issued listing request.
///
/// Every call to [`BrowserState::begin_load`] gets a new sequence number; only
/// the ticket carrying the latest number may write its response into the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTicket {
    seq: u64,
    backend: String,
    path: String,
}

impl ListingTicket {
    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Handle for one issued file content request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTicket {
    seq: u64,
    backend: String,
    dir: String,
    name: String,
}

impl ContentTicket {
    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of completing a listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items replaced; carries the new item count.
    Applied(usize),
    /// The listing failed; items are now empty and the error is kept in `last_error`.
    Failed(FetchError),
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
}

/// Result of selecting a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    Loaded,
    /// Reading failed; the content pane shows the error placeholder.
    Failed(FetchError),
    /// Another file was selected, or the directory changed, before the content arrived.
    Stale,
    /// Passed to the external selection handler.
    HandedOff,
    /// The content viewer is switched off.
    Disabled,
    NotAFile,
}

/// The widget's whole in-memory state.
///
/// This is a plain state machine without I/O: requests are split into a
/// `begin_*` call that returns a ticket and a `finish_*` call that applies the
/// response. The async driver in [`crate::browser`] performs the network call
/// in between. Derived data (sorted order) is recomputed after each mutation
/// and memoised on (items generation, sort key, direction).
#[derive(Debug, Clone)]
pub struct BrowserState {
    nav: Navigation,
    loading: bool,
    items: Vec<Item>,
    /// Bumped whenever `items` is replaced.
    generation: u64,
    sorted: Vec<usize>,
    sorted_for: Option<(u64, SortKey, SortDirection)>,
    sort_key: SortKey,
    sort_direction: SortDirection,
    paginator: Paginator,
    page_size_options: Vec<usize>,
    selected: Option<Item>,
    content: Option<String>,
    show_time: bool,
    metadata: Vec<MetadataColumn>,
    last_error: Option<FetchError>,
    listing_seq: u64,
    content_seq: u64,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new(&ViewDefaults::default())
    }
}

impl BrowserState {
    pub fn new(defaults: &ViewDefaults) -> Self {
        let mut state = Self {
            nav: Navigation::default(),
            loading: false,
            items: Vec::new(),
            generation: 0,
            sorted: Vec::new(),
            sorted_for: None,
            sort_key: defaults.sort_key,
            sort_direction: defaults.sort_direction,
            paginator: Paginator::new(defaults.page_size),
            page_size_options: defaults.page_size_options.clone(),
            selected: None,
            content: None,
            show_time: defaults.show_time,
            metadata: defaults.metadata.clone(),
            last_error: None,
            listing_seq: 0,
            content_seq: 0,
        };
        state.resort();
        state
    }

    // ----- navigation / listing -----

    /// Switch to (backend, path) and issue a listing request.
    ///
    /// Clears the selection, resets the page and sets the loading flag. An
    /// invalid backend is applied as a failed listing right away and returned
    /// as `Err`; no request must be sent in that case.
    pub fn begin_load(&mut self, backend: &str, path: &str) -> FetchResult<ListingTicket> {
        self.nav = Navigation::new(backend, path);
        self.selected = None;
        self.content = None;
        // Any content request still in flight belongs to the old directory.
        self.content_seq += 1;
        self.paginator.reset();
        self.listing_seq += 1;
        let ticket = ListingTicket {
            seq: self.listing_seq,
            backend: self.nav.backend().to_string(),
            path: self.nav.path().to_string(),
        };

        if let Err(e) = validation::validate_backend(backend).and_then(|_| validation::validate_path(path)) {
            tracing::warn!(backend, path, error = %e, "rejected directory load");
            self.fail_listing(e.clone());
            return Err(e);
        }

        self.loading = true;
        tracing::debug!(seq = ticket.seq, backend = %ticket.backend, path = %ticket.path, "listing requested");
        Ok(ticket)
    }

    /// Apply a listing response. Responses for anything but the latest request are dropped.
    pub fn finish_load(&mut self, ticket: ListingTicket, result: FetchResult<Vec<Item>>) -> LoadOutcome {
        if !self.is_current(&ticket) {
            tracing::warn!(
                seq = ticket.seq,
                latest = self.listing_seq,
                path = %ticket.path,
                "discarding stale listing response"
            );
            return LoadOutcome::Stale;
        }
        match result {
            Ok(items) => {
                let count = items.len();
                self.loading = false;
                self.last_error = None;
                self.replace_items(items);
                self.paginator.reset();
                tracing::debug!(seq = ticket.seq, count, "listing applied");
                LoadOutcome::Applied(count)
            }
            Err(e) => {
                tracing::error!(backend = %ticket.backend, path = %ticket.path, error = %e, "Error loading directory");
                self.fail_listing(e.clone());
                LoadOutcome::Failed(e)
            }
        }
    }

    pub fn is_current(&self, ticket: &ListingTicket) -> bool {
        ticket.seq == self.listing_seq
    }

    fn fail_listing(&mut self, error: FetchError) {
        self.loading = false;
        self.last_error = Some(error);
        self.replace_items(Vec::new());
    }

    fn replace_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.generation += 1;
        self.resort();
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    pub fn backend(&self) -> &str {
        self.nav.backend()
    }

    pub fn path(&self) -> &str {
        self.nav.path()
    }

    pub fn path_parts(&self) -> Vec<&str> {
        self.nav.path_parts()
    }

    pub fn path_up_to(&self, index: usize) -> String {
        self.nav.path_up_to(index)
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.nav.breadcrumbs()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Raw items in backend order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    // ----- content viewer -----

    /// Select `item` and issue a content request for it.
    pub fn begin_view(&mut self, item: &Item) -> FetchResult<ContentTicket> {
        if !item.is_file() {
            return Err(FetchError::invalid("item", format!("'{}' is not a file", item.name)));
        }
        self.selected = Some(item.clone());
        self.content = None;
        self.content_seq += 1;
        Ok(ContentTicket {
            seq: self.content_seq,
            backend: self.nav.backend().to_string(),
            dir: self.nav.path().to_string(),
            name: item.name.clone(),
        })
    }

    pub fn finish_view(&mut self, ticket: ContentTicket, result: FetchResult<String>) -> ViewOutcome {
        if ticket.seq != self.content_seq {
            tracing::warn!(name = %ticket.name, "discarding stale file content");
            return ViewOutcome::Stale;
        }
        match result {
            Ok(text) => {
                self.content = Some(text);
                ViewOutcome::Loaded
            }
            Err(e) => {
                tracing::error!(name = %ticket.name, error = %e, "Error loading file content");
                self.content = Some(CONTENT_ERROR_PLACEHOLDER.to_string());
                ViewOutcome::Failed(e)
            }
        }
    }

    pub fn close_viewer(&mut self) {
        self.selected = None;
        self.content = None;
        self.content_seq += 1;
    }

    pub fn selected_file(&self) -> Option<&Item> {
        self.selected.as_ref()
    }

    pub fn file_content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    // ----- sorting -----

    fn resort(&mut self) {
        let key = (self.generation, self.sort_key, self.sort_direction);
        if self.sorted_for == Some(key) {
            return;
        }
        self.sorted = sort::sorted_indices(&self.items, self.sort_key, self.sort_direction);
        self.sorted_for = Some(key);
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.resort();
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort_direction = direction;
        self.resort();
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_direction = self.sort_direction.toggled();
        self.paginator.reset();
        self.resort();
    }

    /// All items in display order.
    pub fn sorted_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.sorted.iter().map(move |&i| &self.items[i])
    }

    // ----- pagination -----

    pub fn page(&self) -> usize {
        self.paginator.current_page(self.items.len())
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.items.len())
    }

    pub fn next_page(&mut self) {
        self.paginator.next_page(self.items.len());
    }

    pub fn previous_page(&mut self) {
        self.paginator.previous_page(self.items.len());
    }

    pub fn change_page(&mut self, page: usize) {
        self.paginator.change_page(page, self.items.len());
    }

    pub fn change_page_size(&mut self, page_size: usize) {
        if !self.paginator.change_page_size(page_size) {
            tracing::warn!(page_size, "ignoring non-positive page size");
        }
    }

    /// The slice of sorted items on the current page.
    pub fn visible_items(&self) -> Vec<&Item> {
        self.sorted[self.paginator.range(self.items.len())]
            .iter()
            .map(|&i| &self.items[i])
            .collect()
    }

    // ----- display -----

    pub fn show_time(&self) -> bool {
        self.show_time
    }

    pub fn toggle_time_display(&mut self) {
        self.show_time = !self.show_time;
    }

    pub fn metadata(&self) -> &[MetadataColumn] {
        &self.metadata
    }

    pub fn shows_column(&self, column: MetadataColumn) -> bool {
        self.metadata.contains(&column)
    }

    pub fn toggle_metadata(&mut self, column: MetadataColumn) {
        if let Some(pos) = self.metadata.iter().position(|c| *c == column) {
            self.metadata.remove(pos);
        } else {
            self.metadata.push(column);
        }
    }

    pub fn format_date(&self, timestamp: Option<&str>) -> String {
        format::format_date_in(timestamp, self.show_time, &Utc)
    }

    pub fn format_date_in<Tz>(&self, timestamp: Option<&str>, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        format::format_date_in(timestamp, self.show_time, tz)
    }
}
