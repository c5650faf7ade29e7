use std::time::Duration;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use url::Url;

use crate::cli::SiteArgs;
use crate::events::{self, SocietyEvent};
use crate::team::{self, TeamMember};

pub const DEFAULT_FEED_URL: &str = "https://mathsociitd.github.io/blog/feed.xml";
pub const DEFAULT_RELAY_URL: &str = "https://formspree.io/xknqypqr";
pub const DEFAULT_BLOG_URL: &str = "https://mathsociitd.github.io/blog/";
pub const LOADING_DELAY: Duration = Duration::from_millis(500);

/// Everything the shell needs that does not change while it runs.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Suffix of every page title.
    pub site_name: String,
    pub org_name: String,
    pub org_unit: String,
    pub feed_url: Url,
    pub relay_url: Url,
    pub blog_url: Url,
    pub countdown_target: Option<DateTime<Utc>>,
    pub loading_delay: Duration,
    pub message_duration: Duration,
    pub roster: Vec<TeamMember>,
    pub events: Vec<SocietyEvent>,
}

impl SiteConfig {
    pub fn from_args(args: &SiteArgs) -> anyhow::Result<Self> {
        let roster = match &args.roster {
            Some(path) => team::load_roster(path).context("load team roster")?,
            None => Vec::new(),
        };
        let events = match &args.events {
            Some(path) => events::load_events(path).context("load events")?,
            None => Vec::new(),
        };
        tracing::debug!(
            members = roster.len(),
            events = events.len(),
            "site content loaded"
        );
        Ok(Self {
            site_name: args.site_name.clone(),
            org_name: args.org_name.clone(),
            org_unit: args.org_unit.clone(),
            feed_url: args.feed_url.clone(),
            relay_url: args.relay_url.clone(),
            blog_url: args.blog_url.clone(),
            countdown_target: args.countdown_target,
            loading_delay: Duration::from_millis(args.loading_delay_ms),
            message_duration: crate::contact::MESSAGE_DURATION,
            roster,
            events,
        })
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "MathSoc IITD".to_string(),
            org_name: "Mathematics Society".to_string(),
            org_unit: "IIT Delhi".to_string(),
            feed_url: Url::parse(DEFAULT_FEED_URL).expect("valid default url"),
            relay_url: Url::parse(DEFAULT_RELAY_URL).expect("valid default url"),
            blog_url: Url::parse(DEFAULT_BLOG_URL).expect("valid default url"),
            countdown_target: None,
            loading_delay: LOADING_DELAY,
            message_duration: crate::contact::MESSAGE_DURATION,
            roster: Vec::new(),
            events: Vec::new(),
        }
    }
}
