mod builtin;
mod check;
mod cli;
mod config;
pub mod contact;
pub mod countdown;
pub mod document;
pub mod events;
pub mod feed;
mod fetcher;
mod progress;
pub mod render;
pub mod route;
pub mod session;
pub mod shell;
pub mod site;
pub mod store;
pub mod team;
pub mod theme;
mod timer;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

pub use cli::{Args as CliArgs, Command, ProgressMode, SiteArgs, ThemeAction, ThemeMode};
pub use config::SiteConfig;
pub use fetcher::Fetcher;
pub use progress::Progress;
pub use timer::ScheduledTask;

use countdown::SystemClock;
use document::Document;
use shell::App;
use store::FileStore;
use theme::{Mode, Theme};

pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    use std::io::IsTerminal as _;

    let CliArgs { site, command } = args;

    match command {
        Command::Build {
            out,
            inline_css,
            progress,
        } => {
            let progress_enabled = match progress {
                ProgressMode::Always => true,
                ProgressMode::Never => false,
                ProgressMode::Auto => std::io::stderr().is_terminal(),
            };
            let progress = Progress::new(progress_enabled);
            progress.set_stage("loading site content");

            let config = Arc::new(SiteConfig::from_args(&site)?);
            let fetcher = fetcher_for(&site)?;
            let store = FileStore::open(&site.state)?;

            let res = site::build(
                config,
                fetcher,
                Arc::new(SystemClock),
                store,
                &out,
                site::BuildOptions { inline_css },
                progress.clone(),
            )
            .await;
            progress.finish();
            let written = res?;
            tracing::info!(pages = written.len(), out = %out.display(), "site built");
            Ok(())
        }
        Command::Session { path } => {
            let config = Arc::new(SiteConfig::from_args(&site)?);
            let fetcher = fetcher_for(&site)?;
            let store = FileStore::open(&site.state)?;
            let app = App::start(config, fetcher, Arc::new(SystemClock), store, &path)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run(app, stdin, tokio::io::stdout()).await
        }
        Command::Theme { action } => {
            let store = FileStore::open(&site.state)?;
            let mode = match action {
                ThemeAction::Show => theme::stored_mode(&store)?,
                ThemeAction::Toggle => {
                    let mut document = Document::new();
                    let mut theme = Theme::load(store, &mut document)?;
                    theme.toggle(&mut document)?;
                    theme.mode()
                }
                ThemeAction::Set { mode } => {
                    let mode = match mode {
                        ThemeMode::Light => Mode::Light,
                        ThemeMode::Dark => Mode::Dark,
                    };
                    let mut document = Document::new();
                    let mut theme = Theme::load(store, &mut document)?;
                    theme.set(mode, &mut document)?;
                    theme.mode()
                }
            };
            tracing::debug!(state = %site.state.display(), mode = mode.as_str(), "theme state");
            println!("{}", mode.as_str());
            Ok(())
        }
        Command::Contact {
            email,
            subject,
            message,
        } => {
            let form = contact::ContactForm::new(email, subject, message);
            form.validate()?;
            let fetcher = fetcher_for(&site)?;
            let outcome = contact::submit(&fetcher, &site.relay_url, &form).await;
            println!("{}", outcome.message());
            if outcome == contact::SubmitOutcome::Failed {
                anyhow::bail!("contact submission to {} failed", site.relay_url);
            }
            Ok(())
        }
    }
}

fn fetcher_for(site: &SiteArgs) -> anyhow::Result<Fetcher> {
    Fetcher::new(&site.user_agent, Some(Duration::from_secs(site.timeout_secs)))
        .context("create http client")
}
