use kuchiki::traits::TendrilSink as _;

use crate::theme::DARK_CLASS;

/// What a rendered page must agree with.
#[derive(Debug)]
pub struct Expected<'a> {
    pub title: &'a str,
    pub is_dark: bool,
    pub header: bool,
}

/// Re-parses a rendered page and checks the title, the root theme class,
/// the chrome meta colors and header visibility.
pub fn assert_page_consistent(html: &str, expected: &Expected<'_>) -> anyhow::Result<()> {
    let doc = kuchiki::parse_html().one(html);

    let title = doc
        .select_first("title")
        .map(|n| n.text_contents())
        .unwrap_or_default();
    if title != expected.title {
        anyhow::bail!(
            "page check failed: title {:?}, expected {:?}",
            title,
            expected.title
        );
    }

    let Ok(body) = doc.select_first("body") else {
        anyhow::bail!("page check failed: no <body>");
    };
    let has_dark = body
        .attributes
        .borrow()
        .get("class")
        .map(|c| c.split_whitespace().any(|c| c == DARK_CLASS))
        .unwrap_or(false);
    if has_dark != expected.is_dark {
        anyhow::bail!(
            "page check failed: body dark class is {}, theme is {}",
            has_dark,
            if expected.is_dark { "dark" } else { "light" }
        );
    }

    let color = if expected.is_dark { "#000" } else { "#fff" };
    if let Ok(nodes) = doc.select("meta[name]") {
        for node in nodes {
            let attrs = node.attributes.borrow();
            let name = attrs.get("name").unwrap_or("");
            if !crate::document::CHROME_META_NAMES.contains(&name) {
                continue;
            }
            if attrs.get("content") != Some(color) {
                anyhow::bail!("page check failed: <meta name=\"{}\"> is not {}", name, color);
            }
        }
    }

    let has_header = doc.select_first("header.site-header").is_ok();
    if has_header != expected.header {
        anyhow::bail!(
            "page check failed: header {} but expected {}",
            if has_header { "present" } else { "absent" },
            if expected.header { "present" } else { "absent" }
        );
    }

    Ok(())
}
