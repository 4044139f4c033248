#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use futures::executor::block_on;

    use crate::browser::{FileBrowser, OpenOutcome};
    use crate::config::BrowserConfig;
    use crate::error::FetchError;
    use crate::state::{LoadOutcome, ViewOutcome};
    use crate::tests::support::{numbered_files, ScriptedApi};
    use crate::types::{Item, SortKey};
    use crate::viewer::{BrowserOptions, CONTENT_ERROR_PLACEHOLDER};

    fn visible_names<A: crate::api::StorageApi>(browser: &FileBrowser<A>) -> Vec<String> {
        browser.state().visible_items().iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_load_directory_applies_listing() {
        let api = ScriptedApi::new().with_listing("runs", vec![Item::file("b.log", 10), Item::directory("out")]);
        let browser = FileBrowser::new(api, BrowserOptions::default());

        let outcome = block_on(browser.load_directory("local", "/runs"));
        assert_eq!(outcome, LoadOutcome::Applied(2));
        assert_eq!(visible_names(&browser), vec!["out", "b.log"]);
        assert!(!browser.state().is_loading());
        assert_eq!(browser.api().calls(), vec!["list:local:runs"]);
    }

    #[test]
    fn test_listing_failure_leaves_renderable_state() {
        let api = ScriptedApi::new()
            .with_listing("ok", numbered_files(3))
            .with_listing_error("broken", FetchError::Decode("expected value at line 1".into()));
        let browser = FileBrowser::new(api, BrowserOptions::default());

        block_on(browser.load_directory("local", "ok"));
        let outcome = block_on(browser.load_directory("local", "broken"));
        assert!(matches!(outcome, LoadOutcome::Failed(FetchError::Decode(_))));
        let state = browser.state();
        assert!(state.items().is_empty());
        assert!(!state.is_loading());
        assert!(state.last_error().is_some());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_empty_backend_makes_no_request() {
        let browser = FileBrowser::new(ScriptedApi::new(), BrowserOptions::default());
        let outcome = block_on(browser.load_directory("", "anything"));
        assert!(matches!(outcome, LoadOutcome::Failed(FetchError::InvalidInput { .. })));
        assert!(browser.api().calls().is_empty());
    }

    #[test]
    fn test_late_response_for_previous_directory_is_ignored() {
        let api = ScriptedApi::new();
        let tx_a = api.defer_listing("a");
        let tx_b = api.defer_listing("b");
        let browser = FileBrowser::new(api, BrowserOptions::default());
        let (done_tx, done_rx) = oneshot::channel::<()>();

        let b = &browser;
        let load_a = b.load_directory("local", "a");
        let load_b = async move {
            let outcome = b.load_directory("local", "b").await;
            let _ = done_tx.send(());
            outcome
        };
        // B answers first; A only after B has been applied.
        let respond = async move {
            let _ = tx_b.send(Ok(vec![Item::file("from-b", 1)]));
            let _ = done_rx.await;
            let _ = tx_a.send(Ok(vec![Item::file("from-a", 1), Item::file("also-a", 2)]));
        };

        let (out_a, out_b, ()) = block_on(async { futures::join!(load_a, load_b, respond) });
        assert_eq!(out_b, LoadOutcome::Applied(1));
        assert_eq!(out_a, LoadOutcome::Stale);
        assert_eq!(visible_names(&browser), vec!["from-b"]);
        assert_eq!(browser.state().path(), "b");
        assert!(!browser.state().is_loading());
    }

    #[test]
    fn test_late_failure_for_previous_directory_is_ignored() {
        let api = ScriptedApi::new().with_listing("b", vec![Item::file("from-b", 1)]);
        let tx_a = api.defer_listing("a");
        let browser = FileBrowser::new(api, BrowserOptions::default());

        let b = &browser;
        let load_a = b.load_directory("local", "a");
        let load_b_then_fail_a = async move {
            let outcome = b.load_directory("local", "b").await;
            let _ = tx_a.send(Err(FetchError::Transport("timed out".into())));
            outcome
        };
        let (out_a, out_b) = block_on(async { futures::join!(load_a, load_b_then_fail_a) });
        assert_eq!(out_a, LoadOutcome::Stale);
        assert_eq!(out_b, LoadOutcome::Applied(1));
        assert!(browser.state().last_error().is_none());
        assert_eq!(visible_names(&browser), vec!["from-b"]);
    }

    #[test]
    fn test_open_directory_and_breadcrumbs() {
        let api = ScriptedApi::new()
            .with_listing("", vec![Item::directory("runs")])
            .with_listing("runs", vec![Item::directory("2024")])
            .with_listing("runs/2024", vec![Item::file("out.txt", 1)]);
        let browser = FileBrowser::new(api, BrowserOptions::default());

        block_on(browser.load_directory("local", ""));
        assert_eq!(block_on(browser.go_up()), None);
        let outcome = block_on(browser.open(&Item::directory("runs")));
        assert_eq!(outcome, OpenOutcome::Directory(LoadOutcome::Applied(1)));
        block_on(browser.open(&Item::directory("2024")));
        assert_eq!(browser.state().path(), "runs/2024");
        assert_eq!(browser.state().path_parts(), vec!["runs", "2024"]);

        block_on(browser.navigate_to_crumb(0));
        assert_eq!(browser.state().path(), "runs");
        assert_eq!(block_on(browser.go_up()), Some(LoadOutcome::Applied(1)));
        assert_eq!(browser.state().path(), "");
        assert_eq!(
            browser.api().calls(),
            vec!["list:local:", "list:local:runs", "list:local:runs/2024", "list:local:runs", "list:local:"]
        );
    }

    #[test]
    fn test_open_directory_keeps_surrounding_spaces() {
        let api = ScriptedApi::new()
            .with_listing("", vec![Item::directory(" data ")])
            .with_listing(" data ", vec![Item::file("notes.txt", 3)]);
        let browser = FileBrowser::new(api, BrowserOptions::default());
        block_on(browser.load_directory("local", ""));

        let outcome = block_on(browser.open(&Item::directory(" data ")));
        assert_eq!(outcome, OpenOutcome::Directory(LoadOutcome::Applied(1)));
        assert_eq!(browser.state().path(), " data ");
        assert_eq!(browser.state().path_parts(), vec![" data "]);
        assert_eq!(
            browser.download_url(&Item::file("notes.txt", 3)).as_deref(),
            Some("/api/storage/download?storage=local&path=%20data%20%2Fnotes.txt")
        );
        assert_eq!(browser.api().calls(), vec!["list:local:", "list:local: data "]);
    }

    #[test]
    fn test_refresh_reloads_current_directory() {
        let api = ScriptedApi::new().with_listing("data", numbered_files(2));
        let browser = FileBrowser::new(api, BrowserOptions::default());
        block_on(browser.load_directory("s3", "data"));
        assert_eq!(block_on(browser.refresh()), LoadOutcome::Applied(2));
        assert_eq!(browser.api().calls(), vec!["list:s3:data", "list:s3:data"]);
    }

    #[test]
    fn test_view_file_embedded() {
        let api = ScriptedApi::new()
            .with_listing("runs", vec![Item::file("a.txt", 5), Item::file("b.txt", 5)])
            .with_file("runs/a.txt", "alpha")
            .with_file_error("runs/b.txt", FetchError::Status { status: 404, body: "File not found".into() });
        let browser = FileBrowser::new(api, BrowserOptions::default());
        block_on(browser.load_directory("local", "runs"));

        assert_eq!(block_on(browser.view_file(&Item::file("a.txt", 5))), ViewOutcome::Loaded);
        assert_eq!(browser.state().file_content(), Some("alpha"));

        let outcome = block_on(browser.open(&Item::file("b.txt", 5)));
        assert!(matches!(outcome, OpenOutcome::File(ViewOutcome::Failed(_))));
        assert_eq!(browser.state().file_content(), Some(CONTENT_ERROR_PLACEHOLDER));
        assert_eq!(browser.state().selected_file().map(|i| i.name.as_str()), Some("b.txt"));

        browser.close_viewer();
        assert!(browser.state().selected_file().is_none());
    }

    #[test]
    fn test_view_directory_is_rejected() {
        let browser = FileBrowser::new(ScriptedApi::new(), BrowserOptions::default());
        assert_eq!(block_on(browser.view_file(&Item::directory("d"))), ViewOutcome::NotAFile);
        assert!(browser.api().calls().is_empty());
        assert!(browser.state().selected_file().is_none());
    }

    #[test]
    fn test_disabled_viewer_makes_no_request() {
        let api = ScriptedApi::new().with_file("/a.txt", "alpha");
        let browser = FileBrowser::new(api, BrowserOptions::default().without_content_viewer());
        assert_eq!(block_on(browser.view_file(&Item::file("a.txt", 5))), ViewOutcome::Disabled);
        assert_eq!(browser.api().read_calls(), 0);
        assert!(browser.state().file_content().is_none());
        assert!(browser.state().selected_file().is_none());
    }

    #[test]
    fn test_external_handler_takes_over_selection() {
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = seen.clone();
        let options = BrowserOptions::default().with_file_select(move |item| sink.borrow_mut().push(item.name.clone()));
        let browser = FileBrowser::new(ScriptedApi::new().with_file("/a.txt", "alpha"), options);

        assert_eq!(block_on(browser.view_file(&Item::file("a.txt", 5))), ViewOutcome::HandedOff);
        assert_eq!(*seen.borrow(), vec!["a.txt"]);
        assert_eq!(browser.api().read_calls(), 0);
        assert!(browser.state().file_content().is_none());
    }

    #[test]
    fn test_content_for_previous_directory_is_dropped() {
        let api = ScriptedApi::new()
            .with_listing("a", vec![Item::file("slow.txt", 1)])
            .with_listing("b", vec![Item::file("other.txt", 1)]);
        let browser = FileBrowser::new(api, BrowserOptions::default());
        block_on(browser.load_directory("local", "a"));
        let tx = browser.api().defer_file("a/slow.txt");

        let slow = Item::file("slow.txt", 1);
        let b = &browser;
        let view = b.view_file(&slow);
        let navigate_then_answer = async move {
            let outcome = b.load_directory("local", "b").await;
            let _ = tx.send(Ok("too late".into()));
            outcome
        };
        let (viewed, loaded) = block_on(async { futures::join!(view, navigate_then_answer) });
        assert_eq!(viewed, ViewOutcome::Stale);
        assert_eq!(loaded, LoadOutcome::Applied(1));
        assert!(browser.state().file_content().is_none());
        assert!(browser.state().selected_file().is_none());
    }

    #[test]
    fn test_download_url() {
        let api = ScriptedApi::new().with_listing("runs", vec![]);
        let browser = FileBrowser::new(api, BrowserOptions::default());
        block_on(browser.load_directory("local", "runs"));
        assert_eq!(
            browser.download_url(&Item::file("a.txt", 1)).as_deref(),
            Some("/api/storage/download?storage=local&path=runs%2Fa.txt")
        );
        assert_eq!(browser.download_url(&Item::directory("d")), None);

        let hidden = FileBrowser::new(ScriptedApi::new(), BrowserOptions::default().without_download_button());
        assert_eq!(hidden.download_url(&Item::file("a.txt", 1)), None);
    }

    #[test]
    fn test_from_config_uses_view_defaults() {
        let cfg = crate::config::load_from_str(
            r#"
[api]
base_url = "http://files.local"

[view]
page_size = 10
sort_key = "name-numeric"
"#,
        )
        .unwrap();
        let api = ScriptedApi::new().with_listing("", numbered_files(12));
        let browser = FileBrowser::from_config(api, &cfg, BrowserOptions::from_config(&cfg.viewer));
        block_on(browser.load_directory("local", ""));

        assert_eq!(browser.state().sort_key(), SortKey::NaturalName);
        assert_eq!(browser.state().total_pages(), 2);
        assert_eq!(visible_names(&browser).last().map(String::as_str), Some("file10"));
        browser.update(|s| s.next_page());
        assert_eq!(visible_names(&browser), vec!["file11", "file12"]);
        assert_eq!(
            browser.download_url(&Item::file("x", 1)).as_deref(),
            Some("http://files.local/api/storage/download?storage=local&path=%2Fx")
        );
        assert_ne!(cfg, BrowserConfig::default());
    }
}
