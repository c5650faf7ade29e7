use anyhow::Context as _;
use kuchiki::traits::TendrilSink as _;
use roxmltree::{Document, Node};
use url::Url;

use crate::fetcher::Fetcher;

pub const MAX_ITEMS: usize = 10;
pub const SUMMARY_LIMIT: usize = 200;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub pub_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Loading,
    Ready {
        items: Vec<FeedItem>,
        source: FeedSource,
    },
}

impl FeedState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }

    pub fn items(&self) -> &[FeedItem] {
        match self {
            FeedState::Loading => &[],
            FeedState::Ready { items, .. } => items,
        }
    }
}

/// Fetches and parses the feed, substituting the built-in entries on failure.
pub async fn load(fetcher: &Fetcher, url: &Url) -> (Vec<FeedItem>, FeedSource) {
    match fetch_items(fetcher, url).await {
        Ok(items) => {
            tracing::info!(%url, count = items.len(), "feed loaded");
            (items, FeedSource::Remote)
        }
        Err(err) => {
            tracing::warn!(%url, error = %format!("{err:#}"), "feed unavailable; using fallback entries");
            (fallback_items(), FeedSource::Fallback)
        }
    }
}

async fn fetch_items(fetcher: &Fetcher, url: &Url) -> anyhow::Result<Vec<FeedItem>> {
    let text = fetcher.get_text(url.clone()).await?;
    let items = parse_items(&text)?;
    if items.is_empty() {
        anyhow::bail!("feed document contains no items");
    }
    Ok(items)
}

/// The first [`MAX_ITEMS`] `item` elements in document order. Missing fields
/// are empty strings.
pub fn parse_items(xml: &str) -> anyhow::Result<Vec<FeedItem>> {
    let doc = Document::parse(xml.trim_start()).context("parse feed document")?;
    let items = doc
        .descendants()
        .filter(|node| is_element_named(*node, "item"))
        .take(MAX_ITEMS)
        .map(|item| {
            let description = child_text(item, "description")
                .filter(|s| !s.is_empty())
                .or_else(|| child_text(item, "summary"))
                .unwrap_or_default();
            FeedItem {
                title: child_text(item, "title").unwrap_or_default().trim().to_string(),
                summary: summarize(&description),
                link: child_text(item, "link").unwrap_or_default().trim().to_string(),
                pub_date: child_text(item, "pubDate")
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            }
        })
        .collect();
    Ok(items)
}

fn is_element_named(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// Text content of the first `<name>` child. Entities are decoded and CDATA
/// is taken literally.
fn child_text(item: Node<'_, '_>, name: &str) -> Option<String> {
    let child = item.children().find(|c| is_element_named(*c, name))?;
    Some(
        child
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect(),
    )
}

/// Markup removed and entities decoded.
pub fn text_content(fragment: &str) -> String {
    if !fragment.contains(['<', '&']) {
        return fragment.to_string();
    }
    kuchiki::parse_html().one(fragment).text_contents()
}

/// Strips markup, then truncates to [`SUMMARY_LIMIT`] characters plus an
/// ellipsis when longer.
pub fn summarize(description: &str) -> String {
    let clean = text_content(description);
    let clean = clean.trim();
    if clean.chars().count() > SUMMARY_LIMIT {
        let mut cut: String = clean.chars().take(SUMMARY_LIMIT).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        clean.to_string()
    }
}

/// `Aug 29, 2024` for RFC 2822 dates; anything else is returned as given.
pub fn format_pub_date(pub_date: &str) -> String {
    match chrono::DateTime::parse_from_rfc2822(pub_date.trim()) {
        Ok(dt) => dt.format("%b %-d, %Y").to_string(),
        Err(_) => pub_date.to_string(),
    }
}

pub fn fallback_items() -> Vec<FeedItem> {
    vec![
        FeedItem {
            title: "Inter IIT Tech Meet".to_string(),
            summary: "Exciting news! This year marks the very first time IIT Delhi will participate in the Inter IIT Tech Meet...".to_string(),
            link: "https://mathsociitd.github.io/blog/".to_string(),
            pub_date: "Thu, 29 Aug 2024 20:20:00 +0530".to_string(),
        },
        FeedItem {
            title: "Hello World 2024".to_string(),
            summary: "Welcome to the first blog in two years! With this post we are reviving the blog aspect of our website...".to_string(),
            link: "https://mathsociitd.github.io/blog/".to_string(),
            pub_date: "Thu, 29 Aug 2024 20:20:00 +0530".to_string(),
        },
    ]
}
