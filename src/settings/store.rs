use std::{
    collections::BTreeMap,
    ffi::OsString,
    fmt,
    fs::{self, File},
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};

use super::{
    SettingsError,
    codec::{read_entries, write_entries},
};
use crate::{
    config::SettingsFormat,
    convert::{ConverterRegistry, Convertible},
};

/// Ordered string key/value store with change tracking.
///
/// Entries iterate in lexicographic key order. Every mutation marks the store
/// as changed; [`sync`](Self::sync) writes it back and clears the flag.
pub struct SettingsStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
    comment: Option<String>,
    changed: bool,
    format: SettingsFormat,
    converters: ConverterRegistry,
}

impl SettingsStore {
    /// Creates an empty in-memory store with the default format.
    pub fn new() -> Self {
        Self::with_format(SettingsFormat::default())
    }

    /// Creates an empty in-memory store using `format`.
    ///
    /// The date converter follows `format.date_format`.
    pub fn with_format(format: SettingsFormat) -> Self {
        let converters = ConverterRegistry::with_date_format(&format.date_format);
        Self {
            path: None,
            entries: BTreeMap::new(),
            comment: None,
            changed: false,
            format,
            converters,
        }
    }

    /// Opens the store backed by `path`.
    ///
    /// Loads the file if it exists, otherwise starts empty. The store is
    /// unchanged after opening either way.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Load` if an existing file cannot be read.
    #[instrument(skip(format))]
    pub fn open(path: &Path, format: SettingsFormat) -> Result<Self, SettingsError> {
        let mut store = Self::with_format(format);
        store.path = Some(path.to_path_buf());

        if path.exists() {
            let load_error = |e: std::io::Error| SettingsError::Load {
                path: path.to_path_buf(),
                details: e.to_string(),
            };
            let file = File::open(path).map_err(load_error)?;
            let count = read_entries(file, &store.format, &mut store.entries).map_err(load_error)?;
            debug!(count, "Loaded settings");
        } else {
            debug!("No settings file yet, starting empty");
        }

        Ok(store)
    }

    /// Opens `<dir>/<base_name><suffix>`.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open).
    pub fn open_in(
        dir: &Path,
        base_name: &str,
        format: SettingsFormat,
    ) -> Result<Self, SettingsError> {
        let path = dir.join(format.file_name(base_name));
        Self::open(&path, format)
    }

    /// Reads entries from `reader`, merging them over the current ones.
    ///
    /// Does not mark the store as changed.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Stream` if reading fails.
    pub fn load(&mut self, reader: impl Read) -> Result<(), SettingsError> {
        read_entries(reader, &self.format, &mut self.entries)?;
        Ok(())
    }

    /// Writes the comment header and all entries to `writer`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Stream` if writing fails.
    pub fn store(&self, writer: impl Write) -> Result<(), SettingsError> {
        write_entries(writer, &self.format, self.comment.as_deref(), &self.entries)?;
        Ok(())
    }

    /// Writes the store to its backing file and clears the change flag.
    ///
    /// The parent directory is created on demand. Content goes to a sibling
    /// `<file name>.tmp` first, which is then renamed over the target and
    /// removed again if writing fails.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NoBackingFile` for in-memory stores,
    /// `SettingsError::HomeDirCreate` if the directory cannot be created and
    /// `SettingsError::Persistence` if writing or renaming fails.
    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn sync(&mut self) -> Result<(), SettingsError> {
        let path = self.path.clone().ok_or(SettingsError::NoBackingFile)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SettingsError::HomeDirCreate {
                path: parent.to_path_buf(),
                details: e.to_string(),
            })?;
        }

        let temp_path = temp_path_for(&path);
        let persist_error = |target: &Path, details: String| SettingsError::Persistence {
            path: target.to_path_buf(),
            details,
        };

        let file =
            File::create(&temp_path).map_err(|e| persist_error(&temp_path, e.to_string()))?;
        let written = self
            .store(BufWriter::new(file))
            .map_err(|e| persist_error(&temp_path, e.to_string()))
            .and_then(|()| {
                fs::rename(&temp_path, &path).map_err(|e| persist_error(&path, e.to_string()))
            });
        if let Err(e) = written {
            if let Err(remove_error) = fs::remove_file(&temp_path) {
                debug!(error = %remove_error, "Could not remove temporary settings file");
            }
            return Err(e);
        }

        self.changed = false;
        info!(entries = self.entries.len(), "Settings saved");
        Ok(())
    }

    /// Syncs only if the store has unsaved changes.
    ///
    /// Returns whether anything was written.
    ///
    /// # Errors
    ///
    /// Same as [`sync`](Self::sync).
    pub fn sync_if_needed(&mut self) -> Result<bool, SettingsError> {
        if !self.changed {
            return Ok(false);
        }
        self.sync()?;
        Ok(true)
    }

    /// Typed read of `key`.
    ///
    /// Returns `default` if the key is missing, its raw value is empty or the
    /// raw value does not decode.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Convert` if no converter is registered for
    /// `T`, even when the key is missing.
    pub fn get<T: Convertible + Clone>(&self, key: &str, default: T) -> Result<T, SettingsError> {
        self.converters.lookup(T::KIND)?;
        match self.entries.get(key) {
            Some(raw) if !raw.is_empty() => Ok(self.converters.decode(raw, default)?),
            _ => Ok(default),
        }
    }

    /// Typed write of `key`. Always marks the store as changed.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Convert` if no converter is registered for `T`.
    pub fn set<T: Convertible>(&mut self, key: &str, value: T) -> Result<(), SettingsError> {
        let raw = self.converters.encode(value)?;
        self.set_raw(key, raw);
        Ok(())
    }

    /// Raw string value of `key`.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Sets the raw string value of `key`. Always marks the store as changed.
    pub fn set_raw(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
        self.changed = true;
    }

    /// Removes `key`, returning its raw value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.changed = true;
        }
        removed
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.changed = true;
    }

    /// Merges all entries of `other` into this store.
    ///
    /// With `remove_present` the current entries are dropped first.
    pub fn update(&mut self, other: &SettingsStore, remove_present: bool) {
        if remove_present {
            self.entries.clear();
        }
        self.entries
            .extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.changed = true;
    }

    /// Number of entries.
    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Keys in sorted order.
    pub fn item_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Read-only view of `(key, raw value)` pairs in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether `key` has an entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Comment written as a header on store.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Sets the header comment and marks the store as changed.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
        self.changed = true;
    }

    /// Drops the header comment and marks the store as changed.
    pub fn clear_comment(&mut self) {
        self.comment = None;
        self.changed = true;
    }

    /// Whether the store has unsaved changes.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File format used by load and store.
    pub fn format(&self) -> &SettingsFormat {
        &self.format
    }

    /// Converters used for typed access.
    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Mutable access for registering custom converters.
    pub fn converters_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.converters
    }
}

/// Sibling of `path` named `<file name>.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("path", &self.path)
            .field("entries", &self.entries)
            .field("comment", &self.comment)
            .field("changed", &self.changed)
            .finish_non_exhaustive()
    }
}
