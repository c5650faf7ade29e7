use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use url::Url;

use crate::config::{DEFAULT_BLOG_URL, DEFAULT_FEED_URL, DEFAULT_RELAY_URL};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(flatten)]
    pub site: SiteArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SiteArgs {
    /// JSON file holding persisted state (the theme `mode`).
    #[arg(long, default_value = "society-site-state.json")]
    pub state: PathBuf,

    /// Suffix of every page title.
    #[arg(long, default_value = "MathSoc IITD")]
    pub site_name: String,

    #[arg(long, default_value = "Mathematics Society")]
    pub org_name: String,

    #[arg(long, default_value = "IIT Delhi")]
    pub org_unit: String,

    /// Syndication document shown as "Latest Posts" on the home page.
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub feed_url: Url,

    /// Form relay endpoint receiving contact submissions.
    #[arg(long, default_value = DEFAULT_RELAY_URL)]
    pub relay_url: Url,

    #[arg(long, default_value = DEFAULT_BLOG_URL)]
    pub blog_url: Url,

    /// Team roster, a JSON array of `{name, position, image, social?}`.
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Event list, a JSON array of `{date, name, description, participation, status}`.
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// RFC 3339 instant the home page counts down to. No countdown if omitted.
    #[arg(long, value_parser = parse_instant)]
    pub countdown_target: Option<DateTime<Utc>>,

    /// How long the loading indicator stays up after each navigation.
    #[arg(long, default_value_t = 500)]
    pub loading_delay_ms: u64,

    /// HTTP User-Agent for the feed and the form relay.
    #[arg(long, default_value = "society-site/0.1")]
    pub user_agent: String,

    /// Per-request HTTP timeout.
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render every page to static HTML.
    Build {
        /// Output directory.
        #[arg(long, default_value = "site")]
        out: PathBuf,

        /// Embed the stylesheet in each page instead of writing assets/site.css.
        #[arg(long)]
        inline_css: bool,

        /// Progress display: `auto`, `always`, or `never`.
        #[arg(long, value_enum, default_value = "auto")]
        progress: ProgressMode,
    },
    /// Drive the site shell from stdin, one command per line.
    Session {
        /// Initial path.
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Show or change the persisted theme.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Send one message through the form relay.
    Contact {
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set {
        #[arg(value_enum)]
        mode: ThemeMode,
    },
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| format!("expected an RFC 3339 instant: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_options_and_subcommand() {
        let args = Args::try_parse_from([
            "society-site",
            "--countdown-target",
            "2022-04-15T13:30:00+05:30",
            "build",
            "--out",
            "public",
            "--progress",
            "never",
        ])
        .unwrap();
        assert_eq!(
            args.site.countdown_target.unwrap().to_rfc3339(),
            "2022-04-15T08:00:00+00:00"
        );
        assert_eq!(args.site.feed_url.as_str(), DEFAULT_FEED_URL);
        match args.command {
            Command::Build { out, .. } => assert_eq!(out, PathBuf::from("public")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_countdown_target() {
        assert!(
            Args::try_parse_from(["society-site", "--countdown-target", "soon", "theme", "show"])
                .is_err()
        );
    }
}
