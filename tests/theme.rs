mod common;

use std::path::Path;
use std::sync::Arc;

use society_site::SiteConfig;
use society_site::render::{Stylesheet, render_page};
use society_site::shell::{App, ShellEvent};
use society_site::store::{FileStore, KvStore, MemoryStore};
use society_site::theme::{self, MODE_KEY, Mode};
use tempfile::tempdir;

fn start(state: &Path) -> App<FileStore> {
    App::start(
        Arc::new(SiteConfig::default()),
        common::fetcher(),
        common::TokioClock::new(common::base_time()),
        FileStore::open(state).unwrap(),
        "/about",
    )
    .unwrap()
}

fn stored_mode(state: &Path) -> Option<String> {
    FileStore::open(state).unwrap().get(MODE_KEY).unwrap()
}

#[tokio::test(start_paused = true)]
async fn first_visit_is_light_and_written_back() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");

    let app = start(&state);
    assert!(!app.shell().theme().is_dark());
    assert!(!app.shell().document().has_class("dark"));
    assert_eq!(stored_mode(&state).as_deref(), Some("light"));
}

#[tokio::test(start_paused = true)]
async fn toggles_survive_restarts() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");

    for round in 1..=4 {
        let mut app = start(&state);
        let before = app.shell().theme().is_dark();
        assert_eq!(before, round % 2 == 0, "round {round}");

        assert!(app.dispatch(ShellEvent::ToggleTheme));
        let after = app.shell().theme().is_dark();
        assert_eq!(after, !before);
        assert_eq!(app.shell().document().has_class("dark"), after);
        let expected = if after { "dark" } else { "light" };
        assert_eq!(stored_mode(&state).as_deref(), Some(expected));
    }
}

#[tokio::test(start_paused = true)]
async fn rendered_page_follows_theme() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, r#"{"mode":"dark"}"#).unwrap();

    let mut app = start(&state);
    let html = render_page(&app.shell().view(), Stylesheet::Inline(""));
    assert!(html.contains("<body class=\"dark\""));
    assert!(html.contains("<meta name=\"theme-color\" content=\"#000\">"));
    assert!(html.contains("<span id=\"mode-toggler\">Switch to light theme</span>"));

    app.dispatch(ShellEvent::ToggleTheme);
    let html = render_page(&app.shell().view(), Stylesheet::Inline(""));
    assert!(html.contains("<body class=\"\""));
    assert!(html.contains("<meta name=\"theme-color\" content=\"#fff\">"));
    assert!(html.contains("<span id=\"mode-toggler\">Switch to dark theme</span>"));
}

#[tokio::test(start_paused = true)]
async fn unrecognized_stored_value_means_light() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");
    std::fs::write(&state, r#"{"mode":"sepia"}"#).unwrap();

    let app = start(&state);
    assert!(!app.shell().theme().is_dark());
    assert_eq!(stored_mode(&state).as_deref(), Some("light"));
}

#[test]
fn reading_the_mode_leaves_state_untouched() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");

    let store = FileStore::open(&state).unwrap();
    assert_eq!(theme::stored_mode(&store).unwrap(), Mode::Light);
    assert!(!state.exists());

    std::fs::write(&state, r#"{"mode":"dark","other":"kept"}"#).unwrap();
    let store = FileStore::open(&state).unwrap();
    assert_eq!(theme::stored_mode(&store).unwrap(), Mode::Dark);
    assert_eq!(
        std::fs::read_to_string(&state).unwrap(),
        r#"{"mode":"dark","other":"kept"}"#
    );
}

/// Serves reads, rejects writes.
struct ReadOnlyStore(MemoryStore);

impl KvStore for ReadOnlyStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.0.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("read-only state")
    }
}

#[tokio::test(start_paused = true)]
async fn unwritable_store_does_not_stop_the_shell() {
    let mut inner = MemoryStore::new();
    inner.set(MODE_KEY, "dark").unwrap();

    let mut app = App::start(
        Arc::new(SiteConfig::default()),
        common::fetcher(),
        common::TokioClock::new(common::base_time()),
        ReadOnlyStore(inner),
        "/about",
    )
    .unwrap();
    assert!(app.shell().theme().is_dark());

    assert!(app.dispatch(ShellEvent::ToggleTheme));
    assert!(!app.shell().theme().is_dark());
    assert!(!app.shell().document().has_class("dark"));
}
