use std::collections::{BTreeMap, BTreeSet};

/// Meta tags that color mobile browser chrome.
pub const CHROME_META_NAMES: [&str; 3] = [
    "theme-color",
    "msapplication-navbutton-color",
    "apple-mobile-web-app-status-bar-style",
];

/// Document-level state the shell and theme write to and the renderer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub scroll_y: u32,
    root_classes: BTreeSet<String>,
    meta: BTreeMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.root_classes.contains(class)
    }

    pub fn set_class(&mut self, class: &str, present: bool) {
        if present {
            self.root_classes.insert(class.to_string());
        } else {
            self.root_classes.remove(class);
        }
    }

    /// Space-separated root classes, empty when none are set.
    pub fn class_attr(&self) -> String {
        self.root_classes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn meta(&self, name: &str) -> Option<&str> {
        self.meta.get(name).map(String::as_str)
    }

    pub fn set_meta(&mut self, name: &str, content: &str) {
        self.meta.insert(name.to_string(), content.to_string());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_y = 0;
    }
}
