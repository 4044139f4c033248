use std::io;

use chrono::{FixedOffset, Offset, Utc};
use js_sys::Date;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::console;

/// Line buffer that hands each formatted tracing event to the browser console.
#[derive(Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let line = String::from_utf8_lossy(&self.buf);
            console::log_1(&line.trim_end().into());
            self.buf.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

pub fn init_tracing() {
    // No wall clock inside wasm32-unknown-unknown; the console stamps lines itself.
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleWriter::default)
        .try_init();
}

/// Offset of the browser's local time zone.
pub fn local_offset() -> FixedOffset {
    // getTimezoneOffset() is minutes *behind* UTC.
    let minutes = Date::new_0().get_timezone_offset() as i32;
    FixedOffset::west_opt(minutes * 60).unwrap_or_else(|| Utc.fix())
}

/// `backend` and `path` from the page's query string, e.g. `?backend=s3&path=runs/2024`.
pub fn initial_location() -> (String, String) {
    let search = web_sys::window().and_then(|w| w.location().search().ok()).unwrap_or_default();
    let mut backend = String::from("local");
    let mut path = String::new();
    for pair in search.trim_start_matches('?').split('&') {
        let Some((key, value)) = pair.split_once('=') else { continue };
        let value = urlencoding::decode(value).map(|v| v.into_owned()).unwrap_or_default();
        match key {
            "backend" if !value.is_empty() => backend = value,
            "path" => path = value,
            _ => {}
        }
    }
    (backend, path)
}

pub fn current_page() -> String {
    web_sys::window().and_then(|w| w.location().pathname().ok()).unwrap_or_default()
}

pub fn reload_page() {
    if let Some(win) = web_sys::window() {
        let _ = win.location().reload();
    }
}

pub fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

const TOAST_MS: i32 = 2500;

/// Pin a short notice to the page corner; it removes itself after `TOAST_MS`.
pub fn show_toast(message: &str) {
    if attach_toast(message).is_none() {
        tracing::warn!(text = message, "toast could not be shown");
    }
}

fn attach_toast(message: &str) -> Option<()> {
    let win = web_sys::window()?;
    let doc = win.document()?;
    let toast = doc.create_element("div").ok()?;
    toast.set_class_name("toast");
    toast.set_text_content(Some(message));
    doc.body()?.append_child(&toast).ok()?;
    let dismiss = Closure::once_into_js(move || toast.remove());
    win.set_timeout_with_callback_and_timeout_and_arguments_0(dismiss.unchecked_ref(), TOAST_MS)
        .ok()?;
    Some(())
}

/// Save `url` under `filename` through a detached anchor click.
pub fn trigger_download(url: &str, filename: &str) {
    if click_download_link(url, filename).is_none() {
        tracing::warn!(url, "download could not be started");
    }
}

fn click_download_link(url: &str, filename: &str) -> Option<()> {
    let doc = web_sys::window()?.document()?;
    let link: web_sys::HtmlAnchorElement = doc.create_element("a").ok()?.dyn_into().ok()?;
    link.set_href(url);
    link.set_download(filename);
    link.click();
    Some(())
}
