#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use httpmock::MockServer;
use society_site::countdown::Clock;
use society_site::shell::App;
use society_site::store::MemoryStore;
use society_site::{Fetcher, SiteConfig};
use url::Url;

/// Wall clock that follows tokio's (possibly paused) time.
pub struct TokioClock {
    base: DateTime<Utc>,
    start: tokio::time::Instant,
}

impl TokioClock {
    pub fn new(base: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            base,
            start: tokio::time::Instant::now(),
        })
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        self.base + chrono::Duration::from_std(self.start.elapsed()).unwrap()
    }
}

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// No request timeout, so paused test time cannot expire an in-flight request.
pub fn fetcher() -> Fetcher {
    Fetcher::new("society-site-test", None).unwrap()
}

pub fn config(server: &MockServer) -> SiteConfig {
    SiteConfig {
        feed_url: Url::parse(&server.url("/feed.xml")).unwrap(),
        relay_url: Url::parse(&server.url("/relay")).unwrap(),
        ..SiteConfig::default()
    }
}

pub fn start(config: SiteConfig, path: &str) -> App<MemoryStore> {
    App::start(
        Arc::new(config),
        fetcher(),
        TokioClock::new(base_time()),
        MemoryStore::new(),
        path,
    )
    .unwrap()
}

pub fn rss(count: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Blog</title><link>https://blog.example/</link>"#,
    );
    for i in 1..=count {
        xml.push_str(&format!(
            "<item><title>Post {i}</title><description>&lt;p&gt;Summary {i}&lt;/p&gt;</description>\
             <link>https://blog.example/{i}</link><pubDate>Thu, 29 Aug 2024 20:20:00 +0530</pubDate></item>"
        ));
    }
    xml.push_str("</channel></rss>");
    xml
}

pub fn mock_feed(server: &MockServer, body: String) {
    server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/feed.xml");
        then.status(200)
            .header("Content-Type", "application/rss+xml")
            .body(body);
    });
}
