use std::future::Future;
use std::rc::Rc;
use std::task::Poll;

use dioxus::events::FormData;
use dioxus::prelude::*;

use storage_browser::api::StorageApi;
use storage_browser::browser::{FileBrowser, OpenOutcome};
use storage_browser::cache::{CacheClearButton, CacheClearOutcome, CacheKind};
use storage_browser::config::{self, BrowserConfig};
use storage_browser::format;
use storage_browser::state::{LoadOutcome, ViewOutcome};
use storage_browser::types::{Item, MetadataColumn, SortDirection, SortKey};
use storage_browser::viewer::BrowserOptions;
use storage_browser::BrowserState;

mod api;
mod ui_utils;
use ui_utils::{show_toast, trigger_download};

type Browser = Rc<FileBrowser<api::ReqwasmApi>>;

pub fn main() {
    console_error_panic_hook::set_once();
    ui_utils::init_tracing();
    dioxus_web::launch::launch(app, vec![], Default::default());
}

fn app() -> Element {
    let (backend, path) = ui_utils::initial_location();
    // Empty base URL = same-origin relative URLs.
    let base_url = load_config().api.base_url;
    rsx! {
        div {
            style { {SPIN_CSS} }
            div { class: "app-header",
                div { class: "container",
                    div { class: "brand", span { "Storage" } }
                    nav { style: "display:flex;gap:8px;",
                        CacheClearControl { kind: CacheKind::Github, label: "Clear GitHub cache", base_url: base_url.clone() }
                        CacheClearControl { kind: CacheKind::S3, label: "Clear S3 cache", base_url: base_url.clone() }
                    }
                }
            }
            StorageBrowser { backend: backend, path: path }
        }
    }
}

fn load_config() -> BrowserConfig {
    config::load_from_str("").unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid embedded config, using defaults");
        BrowserConfig::default()
    })
}

/// Drive one widget operation and re-render as its state changes: once after
/// the request went out (loading flag set) and once after it was applied.
async fn run_and_refresh<F: Future>(task: F, mut revision: Signal<u64>) -> F::Output {
    let mut task = std::pin::pin!(task);
    if let Poll::Ready(out) = futures::poll!(task.as_mut()) {
        *revision.write() += 1;
        return out;
    }
    *revision.write() += 1;
    let out = task.await;
    *revision.write() += 1;
    out
}

/// Apply a synchronous view change (sort, page, toggles) and re-render.
fn mutate(browser: &Browser, mut revision: Signal<u64>, f: impl FnOnce(&mut BrowserState)) {
    browser.update(f);
    *revision.write() += 1;
}

/// One rendered listing row, detached from the state borrow.
#[derive(Clone, PartialEq)]
struct RowView {
    item: Item,
    size: String,
    modified: String,
    created: String,
    download: Option<String>,
    selected: bool,
}

#[component]
fn StorageBrowser(backend: String, path: String) -> Element {
    let browser: Browser = use_hook(|| {
        let cfg = load_config();
        let options = BrowserOptions::from_config(&cfg.viewer);
        Rc::new(FileBrowser::from_config(api::ReqwasmApi::new(&cfg.api.base_url), &cfg, options))
    });
    let revision = use_signal(|| 0_u64);

    // Load on mount and whenever the host changes backend or path.
    {
        let browser = browser.clone();
        use_effect(use_reactive!(|(backend, path)| {
            let browser = browser.clone();
            spawn(async move {
                if let LoadOutcome::Failed(e) = run_and_refresh(browser.load_directory(&backend, &path), revision).await {
                    show_toast(&format!("Error loading directory: {}", e));
                }
            });
        }));
    }

    let open_item = {
        let browser = browser.clone();
        Rc::new(move |item: Item| {
            let browser = browser.clone();
            spawn(async move {
                match run_and_refresh(browser.open(&item), revision).await {
                    OpenOutcome::Directory(LoadOutcome::Failed(e)) => show_toast(&format!("Error loading directory: {}", e)),
                    OpenOutcome::File(ViewOutcome::Failed(e)) => tracing::warn!(error = %e, "file preview failed"),
                    _ => {}
                }
            });
        })
    };

    let navigate = {
        let browser = browser.clone();
        Rc::new(move |crumb: Option<usize>| {
            let browser = browser.clone();
            spawn(async move {
                match crumb {
                    Some(index) => {
                        run_and_refresh(browser.navigate_to_crumb(index), revision).await;
                    }
                    None => {
                        run_and_refresh(browser.navigate_to(""), revision).await;
                    }
                }
            });
        })
    };

    // Subscribe to widget state changes.
    let _ = *revision.read();
    let tz = ui_utils::local_offset();
    let state = browser.state();

    let loading = state.is_loading();
    let error = state.last_error().map(|e| e.to_string());
    let crumbs = state.breadcrumbs();
    let at_root = state.path().is_empty();
    let sort_key = state.sort_key();
    let direction = state.sort_direction();
    let page = state.page();
    let total_pages = state.total_pages();
    let page_size = state.page_size();
    let page_size_options = state.page_size_options().to_vec();
    let show_time = state.show_time();
    let columns = state.metadata().to_vec();
    let item_count = state.items().len();
    let selected = state.selected_file().cloned();
    let content = state.file_content().map(str::to_string);
    let rows: Vec<RowView> = state
        .visible_items()
        .into_iter()
        .map(|item| RowView {
            size: format::format_size(item),
            modified: state.format_date_in(item.modified.as_deref(), &tz),
            created: state.format_date_in(item.created.as_deref(), &tz),
            download: browser.download_url(item),
            selected: selected.as_ref().map(|s| s.name == item.name).unwrap_or(false),
            item: item.clone(),
        })
        .collect();
    drop(state);

    let shows_pane = browser.viewer_mode().shows_content_pane();
    let go_up = {
        let browser = browser.clone();
        move |_| {
            let browser = browser.clone();
            spawn(async move {
                run_and_refresh(browser.go_up(), revision).await;
            });
        }
    };
    let refresh = {
        let browser = browser.clone();
        move |_| {
            let browser = browser.clone();
            spawn(async move {
                run_and_refresh(browser.refresh(), revision).await;
            });
        }
    };
    let close_viewer = {
        let browser = browser.clone();
        let mut revision = revision;
        move |_| {
            browser.close_viewer();
            *revision.write() += 1;
        }
    };

    let on_sort_key = {
        let browser = browser.clone();
        move |e: Event<FormData>| match e.value().parse::<SortKey>() {
            Ok(key) => mutate(&browser, revision, |s| s.set_sort_key(key)),
            Err(err) => tracing::warn!(error = %err, "ignoring sort selection"),
        }
    };
    let on_page_size = {
        let browser = browser.clone();
        move |e: Event<FormData>| {
            if let Ok(size) = e.value().parse::<usize>() {
                mutate(&browser, revision, |s| s.change_page_size(size));
            }
        }
    };
    let toggle_direction = {
        let browser = browser.clone();
        move |_| mutate(&browser, revision, |s| s.toggle_sort_direction())
    };
    let toggle_time = {
        let browser = browser.clone();
        move |_| mutate(&browser, revision, |s| s.toggle_time_display())
    };
    let prev_page = {
        let browser = browser.clone();
        move |_| mutate(&browser, revision, |s| s.previous_page())
    };
    let next_page = {
        let browser = browser.clone();
        move |_| mutate(&browser, revision, |s| s.next_page())
    };

    let direction_label = match direction {
        SortDirection::Asc => "▲ Asc",
        SortDirection::Desc => "▼ Desc",
    };

    rsx! {
        div { style: panel_style(),
            // Breadcrumbs
            div { style: "display:flex;gap:6px;align-items:center;flex-wrap:wrap;",
                span { style: "cursor:pointer;color:#93c5fd;", onclick: {
                        let navigate = navigate.clone();
                        move |_| (navigate.as_ref())(None)
                    }, "{backend}" }
                { crumbs.into_iter().enumerate().map(|(i, crumb)| {
                    let navigate = navigate.clone();
                    rsx! {
                        span { key: "{crumb.path}",
                            "/ "
                            span { style: "cursor:pointer;color:#93c5fd;", onclick: move |_| (navigate.as_ref())(Some(i)), "{crumb.label}" }
                        }
                    }
                }) }
                { loading.then(|| rsx!(span { class: "spinner spin", "" })) }
            }

            // Toolbar
            div { style: "margin-top:12px;display:flex;gap:12px;align-items:center;flex-wrap:wrap;",
                button { style: btn_style(), disabled: at_root, onclick: go_up, "Up" }
                button { style: btn_style(), onclick: refresh, "Refresh" }
                span { "Sort:" }
                select { value: "{sort_key.as_str()}", oninput: on_sort_key,
                    { SortKey::ALL.into_iter().map(|k| rsx!(option { key: "{k}", value: "{k.as_str()}", "{k.label()}" })) }
                }
                button { style: btn_style(), onclick: toggle_direction, "{direction_label}" }
                label { style: "display:flex;gap:6px;align-items:center;",
                    input { r#type: "checkbox", checked: show_time, oninput: toggle_time }
                    " Show time"
                }
                { MetadataColumn::ALL.into_iter().map(|col| {
                    let browser = browser.clone();
                    let on = columns.contains(&col);
                    rsx! {
                        label { key: "{col.label()}", style: "display:flex;gap:6px;align-items:center;",
                            input { r#type: "checkbox", checked: on, oninput: move |_| mutate(&browser, revision, |s| s.toggle_metadata(col)) }
                            " {col.label()}"
                        }
                    }
                }) }
                span { "Entries: {item_count}" }
            }
            { error.map(|e| rsx!(div { class: "text-danger", style: "margin-top:8px;color:#f87171;", "Error: {e}" })) }

            div { style: "display:flex;gap:16px;align-items:flex-start;",
                // Listing
                table { style: table_style(),
                    thead { tr {
                        th { style: th_style(), "Name" }
                        { columns.contains(&MetadataColumn::Size).then(|| rsx!(th { style: "{th_style()}text-align:right;", "Size" })) }
                        { columns.contains(&MetadataColumn::Modified).then(|| rsx!(th { style: th_style(), "Modified" })) }
                        { columns.contains(&MetadataColumn::Created).then(|| rsx!(th { style: th_style(), "Created" })) }
                        th { style: th_style(), "" }
                    } }
                    tbody {
                        { rows.into_iter().map(|row| {
                            let open_item = open_item.clone();
                            let item = row.item.clone();
                            let icon = if item.is_dir() { "📁" } else { "📄" };
                            let bg = if row.selected { "background:#1e293b;" } else { "" };
                            rsx! {
                                tr { key: "{row.item.name}", style: "{bg}",
                                    td { style: "padding:6px;cursor:pointer;", onclick: move |_| (open_item.as_ref())(item.clone()),
                                        "{icon} {row.item.name}"
                                    }
                                    { columns.contains(&MetadataColumn::Size).then(|| rsx!(td { style: "padding:6px;text-align:right;", "{row.size}" })) }
                                    { columns.contains(&MetadataColumn::Modified).then(|| rsx!(td { style: "padding:6px;", "{row.modified}" })) }
                                    { columns.contains(&MetadataColumn::Created).then(|| rsx!(td { style: "padding:6px;", "{row.created}" })) }
                                    td { style: "padding:6px;",
                                        { row.download.clone().map(|url| {
                                            let name = row.item.name.clone();
                                            rsx!(button { style: btn_style(), onclick: move |_| trigger_download(&url, &name), "Download" })
                                        }) }
                                    }
                                }
                            }
                        }) }
                    }
                }

                // Content pane
                { (shows_pane && selected.is_some()).then(|| {
                    let name = selected.as_ref().map(|s| s.name.clone()).unwrap_or_default();
                    let text = content.clone().unwrap_or_else(|| "Loading...".to_string());
                    rsx! {
                        div { style: "flex:1;min-width:320px;margin-top:8px;",
                            div { style: "display:flex;justify-content:space-between;align-items:center;",
                                strong { "{name}" }
                                button { style: btn_style(), onclick: close_viewer, "Close" }
                            }
                            pre { style: "white-space:pre-wrap;max-height:600px;overflow:auto;background:#0f1117;padding:8px;border:1px solid #222533;border-radius:8px;",
                                "{text}"
                            }
                        }
                    }
                }) }
            }

            // Pagination
            div { style: "margin-top:8px;display:flex;gap:12px;align-items:center;",
                button { style: btn_style(), disabled: page <= 1, onclick: prev_page, "Previous" }
                span { "Page {page} of {total_pages}" }
                button { style: btn_style(), disabled: page >= total_pages, onclick: next_page, "Next" }
                span { "Per page:" }
                select { value: "{page_size}", oninput: on_page_size,
                    { page_size_options.into_iter().map(|n| rsx!(option { key: "{n}", value: "{n}", "{n}" })) }
                }
            }
        }
    }
}

#[component]
fn CacheClearControl(kind: CacheKind, label: &'static str, base_url: String) -> Element {
    let mut button = use_signal(CacheClearButton::new);
    let busy = button.read().is_busy();

    let clear = move |_| {
        if !button.write().begin() {
            return;
        }
        spawn(async move {
            let api = api::ReqwasmApi::new(&base_url);
            let result = api.clear_cache(kind).await;
            let outcome = button.write().finish(result, &ui_utils::current_page());
            match outcome {
                CacheClearOutcome::Reload => ui_utils::reload_page(),
                CacheClearOutcome::Stay => show_toast(&format!("{} cache cleared", kind)),
                CacheClearOutcome::Alert(message) => ui_utils::alert(&message),
            }
        });
    };

    rsx! {
        button { style: btn_style(), disabled: busy, onclick: clear,
            span { class: if busy { "spin" } else { "" }, "⟳" }
            " {label}"
        }
    }
}

// ----- Styles -----
const SPIN_CSS: &str = ".spin { display:inline-block; animation: spin 1s linear infinite; } @keyframes spin { from { transform: rotate(0deg); } to { transform: rotate(360deg); } } \
.toast { position:fixed; right:16px; bottom:16px; padding:8px 12px; border-radius:6px; background:#333; color:#fff; font-size:13px; }";

fn panel_style() -> &'static str {
    "max-width:1200px;margin:20px auto;padding:16px;background:#0b0c10;color:#e5e7eb;border:1px solid #222533;border-radius:12px;"
}

fn btn_style() -> &'static str {
    "background:#1f2937;color:#e5e7eb;border:1px solid #374151;border-radius:8px;padding:6px 10px;cursor:pointer;"
}

fn table_style() -> &'static str {
    "width:100%;border-collapse:collapse;margin-top:8px;background:#0f1117;border:1px solid #222533;border-radius:8px;"
}

fn th_style() -> &'static str {
    "text-align:left;padding:6px;border-bottom:1px solid #222533;"
}
