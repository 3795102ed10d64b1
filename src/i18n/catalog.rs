use std::{collections::HashMap, fs, path::Path};

use tracing::{debug, instrument};

use super::{I18nError, Translator};

/// In-memory message catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `key=value` lines.
    ///
    /// Lines starting with `#` and lines without a key are skipped. Keys are
    /// trimmed, values are kept verbatim.
    pub fn parse(text: &str) -> Self {
        let messages = text
            .lines()
            .filter(|line| !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), value))
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Self { messages }
    }

    /// Loads a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::Load` if the file cannot be read.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, I18nError> {
        let text = fs::read_to_string(path).map_err(|e| I18nError::Load {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let catalog = Self::parse(&text);
        debug!(path = %path.display(), count = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Adds or replaces a message.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(key.into(), text.into());
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the catalog has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for Catalog {
    fn fetch_text(&self, key: &str) -> Option<String> {
        self.messages.get(key).cloned()
    }
}
