use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::builtin;
use crate::check::{self, Expected};
use crate::config::SiteConfig;
use crate::countdown::Clock;
use crate::fetcher::Fetcher;
use crate::progress::Progress;
use crate::render::{self, Stylesheet};
use crate::route::Route;
use crate::shell::{App, ShellEvent};
use crate::store::KvStore;

pub const STYLESHEET_REL: &str = "assets/site.css";
/// Path used to render the catch-all page.
pub const NOT_FOUND_PATH: &str = "/__not_found__";

/// Requested path and the file its settled view is written to.
pub fn pages() -> Vec<(String, PathBuf)> {
    let mut pages = vec![("/".to_string(), PathBuf::from("index.html"))];
    for route in Route::ALL {
        pages.push((
            route.path(),
            PathBuf::from(route.segment()).join("index.html"),
        ));
    }
    pages.push((NOT_FOUND_PATH.to_string(), PathBuf::from("404.html")));
    pages
}

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub inline_css: bool,
}

/// Drives one shell through every page and writes each settled view.
pub async fn build<S: KvStore>(
    config: Arc<SiteConfig>,
    fetcher: Fetcher,
    clock: Arc<dyn Clock>,
    store: S,
    out_dir: &Path,
    options: BuildOptions,
    progress: Arc<Progress>,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    let stylesheet = if options.inline_css {
        Stylesheet::Inline(builtin::BUILTIN_CSS)
    } else {
        write_file(out_dir, Path::new(STYLESHEET_REL), builtin::BUILTIN_CSS)?;
        Stylesheet::Link("/assets/site.css")
    };

    let pages = pages();
    progress.set_pages_total(pages.len());

    let (first_path, _) = &pages[0];
    let mut app = App::start(config, fetcher, clock, store, first_path)?;
    let mut written = Vec::with_capacity(pages.len());

    for (idx, (path, rel)) in pages.iter().enumerate() {
        if idx != 0 {
            app.dispatch(ShellEvent::Navigate(path.clone()));
        }
        progress.set_stage(format!("rendering {path}"));
        app.settle().await;

        let shell = app.shell();
        let html = render::render_page(&shell.view(), stylesheet);
        let route = shell.nav().route;
        check::assert_page_consistent(
            &html,
            &Expected {
                title: &shell.document().title,
                is_dark: shell.theme().is_dark(),
                header: route.shows_header(),
            },
        )
        .with_context(|| format!("check page {path}"))?;

        let abs = write_file(out_dir, rel, &html)?;
        tracing::info!(path = %path, route = %route.path(), file = %abs.display(), "page written");
        progress.page_done(path);
        written.push(abs);
    }

    Ok(written)
}

fn write_file(out_dir: &Path, rel: &Path, contents: &str) -> anyhow::Result<PathBuf> {
    let abs = out_dir.join(rel);
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(&abs, contents).with_context(|| format!("write {}", abs.display()))?;
    Ok(abs)
}
