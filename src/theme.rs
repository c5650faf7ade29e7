use std::marker::PhantomData;

use anyhow::Context as _;

use crate::document::{CHROME_META_NAMES, Document};
use crate::store::KvStore;

pub const MODE_KEY: &str = "mode";
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light.
    pub fn from_stored(value: Option<&str>) -> Mode {
        match value {
            Some("dark") => Mode::Dark,
            _ => Mode::Light,
        }
    }

    fn chrome_color(self) -> &'static str {
        match self {
            Mode::Light => "#fff",
            Mode::Dark => "#000",
        }
    }
}

/// The persisted mode, read without writing anything back.
pub fn stored_mode<S: KvStore>(store: &S) -> anyhow::Result<Mode> {
    let stored = store.get(MODE_KEY).context("read persisted theme")?;
    Ok(Mode::from_stored(stored.as_deref()))
}

/// The single-writer dark/light flag.
///
/// Owned by the shell and lent to views by reference; nothing reads it
/// through ambient state. Each transition updates the document and the
/// store before returning.
pub struct Theme<S> {
    is_dark: bool,
    store: S,
}

impl<S: KvStore> Theme<S> {
    /// Reads the persisted mode and applies it to `document`.
    ///
    /// The mode is written back to the store; a failed write is logged and
    /// the theme still loads.
    pub fn load(store: S, document: &mut Document) -> anyhow::Result<Self> {
        let mode = stored_mode(&store)?;
        let mut theme = Self {
            is_dark: mode == Mode::Dark,
            store,
        };
        if let Err(err) = theme.apply(document) {
            tracing::warn!(error = %format!("{err:#}"), "theme not written back");
        }
        tracing::debug!(mode = mode.as_str(), "theme loaded");
        Ok(theme)
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn mode(&self) -> Mode {
        if self.is_dark { Mode::Dark } else { Mode::Light }
    }

    /// Flips the flag. The document is updated even when persisting fails.
    pub fn toggle(&mut self, document: &mut Document) -> anyhow::Result<()> {
        self.is_dark = !self.is_dark;
        tracing::info!(mode = self.mode().as_str(), "theme toggled");
        self.apply(document)
    }

    pub fn set(&mut self, mode: Mode, document: &mut Document) -> anyhow::Result<()> {
        if self.mode() != mode {
            self.toggle(document)
        } else {
            self.apply(document)
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read access for views. Only obtainable from a loaded `Theme`.
    pub fn context(&self) -> ThemeContext<'_> {
        ThemeContext {
            is_dark: self.is_dark,
            _provider: PhantomData,
        }
    }

    fn apply(&mut self, document: &mut Document) -> anyhow::Result<()> {
        let mode = self.mode();
        document.set_class(DARK_CLASS, self.is_dark);
        for name in CHROME_META_NAMES {
            document.set_meta(name, mode.chrome_color());
        }
        self.store
            .set(MODE_KEY, mode.as_str())
            .context("persist theme")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThemeContext<'a> {
    is_dark: bool,
    _provider: PhantomData<&'a ()>,
}

impl ThemeContext<'_> {
    pub fn is_dark(self) -> bool {
        self.is_dark
    }

    pub fn toggle_label(self) -> &'static str {
        if self.is_dark {
            "Switch to light theme"
        } else {
            "Switch to dark theme"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn absent_value_defaults_to_light() {
        let mut doc = Document::new();
        let theme = Theme::load(MemoryStore::new(), &mut doc).unwrap();
        assert!(!theme.is_dark());
        assert!(!doc.has_class(DARK_CLASS));
        assert_eq!(doc.meta("theme-color"), Some("#fff"));
        assert_eq!(
            theme.store().get(MODE_KEY).unwrap().as_deref(),
            Some("light")
        );
    }

    #[test]
    fn unrecognized_value_reads_as_light() {
        assert_eq!(Mode::from_stored(Some("DARK")), Mode::Light);
        assert_eq!(Mode::from_stored(Some("")), Mode::Light);
        assert_eq!(Mode::from_stored(Some("dark")), Mode::Dark);
    }

    #[test]
    fn persisted_value_matches_toggle_parity() {
        for initial in [Mode::Light, Mode::Dark] {
            for toggles in 0..6 {
                let mut store = MemoryStore::new();
                store.set(MODE_KEY, initial.as_str()).unwrap();
                let mut doc = Document::new();
                let mut theme = Theme::load(store, &mut doc).unwrap();
                for _ in 0..toggles {
                    theme.toggle(&mut doc).unwrap();
                }

                let expect_dark = (initial == Mode::Dark) != (toggles % 2 == 1);
                let persisted = theme.store().get(MODE_KEY).unwrap();
                assert_eq!(persisted.as_deref() == Some("dark"), expect_dark);
                assert_eq!(doc.has_class(DARK_CLASS), expect_dark);
                for name in CHROME_META_NAMES {
                    let color = if expect_dark { "#000" } else { "#fff" };
                    assert_eq!(doc.meta(name), Some(color));
                }
            }
        }
    }

    /// Reads fine, refuses every write.
    struct ReadOnlyStore(MemoryStore);

    impl KvStore for ReadOnlyStore {
        fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("store is read-only")
        }
    }

    #[test]
    fn failed_write_back_still_loads() {
        let mut inner = MemoryStore::new();
        inner.set(MODE_KEY, "dark").unwrap();
        let mut doc = Document::new();
        let mut theme = Theme::load(ReadOnlyStore(inner), &mut doc).unwrap();
        assert!(theme.is_dark());
        assert!(doc.has_class(DARK_CLASS));

        assert!(theme.toggle(&mut doc).is_err());
        assert!(!theme.is_dark());
        assert!(!doc.has_class(DARK_CLASS));
    }

    #[test]
    fn stored_mode_does_not_write() {
        let store = MemoryStore::new();
        assert_eq!(stored_mode(&store).unwrap(), Mode::Light);
        assert_eq!(store.get(MODE_KEY).unwrap(), None);
    }

    #[test]
    fn set_is_a_no_op_when_already_in_mode() {
        let mut doc = Document::new();
        let mut theme = Theme::load(MemoryStore::new(), &mut doc).unwrap();
        theme.set(Mode::Light, &mut doc).unwrap();
        assert!(!theme.is_dark());
        theme.set(Mode::Dark, &mut doc).unwrap();
        assert!(theme.is_dark());
        assert!(doc.has_class(DARK_CLASS));
    }
}
