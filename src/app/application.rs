use std::{
    cell::RefCell,
    error::Error,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::{debug, error, info, instrument};

use super::{AppPaths, CleanupId, CleanupRegistry};
use crate::{
    GafError, Result,
    config::RuntimeConfig,
    i18n::Translator,
    settings::{SettingsStore, SharedSettings},
};

/// Translation key of the pattern used to show error details at
/// [`DebugLevel::Echo`]. `{0}` is the error message.
pub const DEFAULT_ERROR_TIP_KEY: &str = "cli.error.details";

const DEFAULT_ERROR_TIP: &str = "details: {0}";

/// How much detail [`Application::report_error`] prints about the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugLevel {
    /// Only the description.
    None,

    /// The description and the error message.
    Echo,

    /// The description, the error and every source in its chain.
    #[default]
    Trace,
}

/// Application context passed explicitly to the parts that need it.
pub struct Application {
    name: String,
    version: Option<String>,
    arguments: Vec<String>,
    home: PathBuf,
    config: RuntimeConfig,
    cleanups: CleanupRegistry,
    translator: Option<Box<dyn Translator>>,
    debug_level: DebugLevel,
    error_tip_key: String,
}

impl Application {
    /// Creates an application homed at `$HOME/.<lowercase name>`.
    ///
    /// # Arguments
    ///
    /// * `name` - Application name, also the prefix of echoed messages
    /// * `version` - Version shown by `--version`
    /// * `arguments` - Command-line arguments without the program name
    ///
    /// # Errors
    ///
    /// Returns `GafError::HomeDir` if `HOME` is not set, or a configuration
    /// error if `<home>/runtime.toml` exists but cannot be loaded.
    pub fn new(
        name: impl Into<String>,
        version: Option<&str>,
        arguments: Vec<String>,
    ) -> Result<Self> {
        let name = name.into();
        let home = AppPaths::default_home(&name)?;
        Self::with_home(name, version, arguments, home)
    }

    /// Creates an application with an explicit home directory.
    ///
    /// The directory does not need to exist yet.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `<home>/runtime.toml` exists but
    /// cannot be loaded.
    #[instrument(skip_all, fields(home = %home.as_ref().display()))]
    pub fn with_home(
        name: impl Into<String>,
        version: Option<&str>,
        arguments: Vec<String>,
        home: impl AsRef<Path>,
    ) -> Result<Self> {
        let home = home.as_ref().to_path_buf();
        let config = RuntimeConfig::load_or_default(&AppPaths::runtime_config(&home))?;

        Ok(Self {
            name: name.into(),
            version: version.map(str::to_string),
            arguments,
            home,
            config,
            cleanups: CleanupRegistry::new(),
            translator: None,
            debug_level: DebugLevel::default(),
            error_tip_key: DEFAULT_ERROR_TIP_KEY.to_string(),
        })
    }

    /// Application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Application version, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Command-line arguments without the program name.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Home directory holding settings and runtime configuration.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Creates the home directory if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `GafError::HomeDir` if the directory cannot be created.
    pub fn ensure_home_exists(&self) -> Result<()> {
        if self.home.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.home).map_err(|e| GafError::home_dir(e, &self.home))?;
        info!(home = %self.home.display(), "Created home directory");
        Ok(())
    }

    /// Runtime configuration loaded from the home directory.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Opens `<home>/<base_name><suffix>` with the configured format.
    ///
    /// With `auto_sync`, a cleanup is registered that writes the store back
    /// on [`exit`](Self::exit) if it changed.
    ///
    /// # Errors
    ///
    /// Returns `GafError::Settings` if an existing file cannot be read.
    pub fn open_settings(&mut self, base_name: &str, auto_sync: bool) -> Result<SharedSettings> {
        let store = SettingsStore::open_in(&self.home, base_name, self.config.settings.clone())?;
        let settings = Rc::new(RefCell::new(store));

        if auto_sync {
            let name = format!("sync {base_name}");
            let target = Rc::clone(&settings);
            let cleanup_name = name.clone();
            self.add_cleanup(name, move || {
                let mut store = target.try_borrow_mut().map_err(|e| GafError::Cleanup {
                    name: cleanup_name,
                    details: e.to_string(),
                })?;
                store.sync_if_needed()?;
                Ok(())
            });
        }

        Ok(settings)
    }

    /// Registers a callback run once on [`exit`](Self::exit).
    pub fn add_cleanup(
        &mut self,
        name: impl Into<String>,
        callback: impl FnOnce() -> Result<()> + 'static,
    ) -> CleanupId {
        self.cleanups.add(name, callback)
    }

    /// Unregisters a pending cleanup.
    pub fn remove_cleanup(&mut self, id: CleanupId) -> bool {
        self.cleanups.remove(id)
    }

    /// Number of cleanups still pending.
    pub fn pending_cleanups(&self) -> usize {
        self.cleanups.len()
    }

    /// Installs the translator used for localized output.
    pub fn install_translator(&mut self, translator: impl Translator + 'static) {
        self.translator = Some(Box::new(translator));
    }

    /// Whether a translator is installed.
    pub fn has_translator(&self) -> bool {
        self.translator.is_some()
    }

    /// Detail level of error reports.
    pub fn debug_level(&self) -> DebugLevel {
        self.debug_level
    }

    /// Sets the detail level of error reports.
    pub fn set_debug_level(&mut self, level: DebugLevel) {
        self.debug_level = level;
    }

    /// Sets the translation key of the error detail pattern.
    pub fn set_error_tip_key(&mut self, key: impl Into<String>) {
        self.error_tip_key = key.into();
    }

    /// Prints `<name>: <text>` to stdout.
    pub fn echo(&self, text: impl Display) {
        println!("{}", self.prefixed(text));
    }

    /// Prints `<name>: <text>` to stderr.
    pub fn error(&self, text: impl Display) {
        eprintln!("{}", self.prefixed(text));
    }

    /// Echoes the localized text for `key`.
    ///
    /// # Errors
    ///
    /// Returns `I18nError::MissingText` if the key is unknown.
    pub fn localized_echo(&self, key: &str, args: &[&dyn Display]) -> Result<()> {
        self.echo(self.text_with(key, args)?);
        Ok(())
    }

    /// Reports `description`, then details of `err` per the debug level.
    pub fn report_error(&self, description: impl Display, err: &dyn Error) {
        error!(error = %err, "{description}");
        for line in self.error_report(description, err) {
            self.error(line);
        }
    }

    /// Lines [`report_error`](Self::report_error) prints, without the name
    /// prefix.
    pub fn error_report(&self, description: impl Display, err: &dyn Error) -> Vec<String> {
        let mut lines = vec![description.to_string()];

        match self.debug_level {
            DebugLevel::None => {}
            DebugLevel::Echo => {
                let tip = self.optional_text_with(&self.error_tip_key, DEFAULT_ERROR_TIP, &[&err]);
                lines.push(tip);
            }
            DebugLevel::Trace => {
                lines.push(err.to_string());
                let mut source = err.source();
                while let Some(cause) = source {
                    lines.push(format!("caused by: {cause}"));
                    source = cause.source();
                }
            }
        }

        lines
    }

    /// Runs every pending cleanup and returns `status` for the process
    /// boundary to exit with.
    pub fn exit(&mut self, status: i32) -> i32 {
        let failures = self.cleanups.run_all();
        debug!(status, failures, "Application exiting");
        status
    }

    fn prefixed(&self, text: impl Display) -> String {
        format!("{}: {text}", self.name)
    }
}

impl Translator for Application {
    fn fetch_text(&self, key: &str) -> Option<String> {
        self.translator.as_ref()?.fetch_text(key)
    }
}
