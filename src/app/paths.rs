use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{GafError, Result, config::RUNTIME_CONFIG_FILE};

/// Locations derived from the application home directory.
pub struct AppPaths;

impl AppPaths {
    /// Default home for an application: `$HOME/.<lowercase name>`.
    ///
    /// # Errors
    ///
    /// Returns `GafError::HomeDir` if `HOME` is not set.
    pub fn default_home(name: &str) -> Result<PathBuf> {
        let home = env::var("HOME").map_err(|e| {
            GafError::home_dir(format!("HOME environment variable: {e}"), Path::new("~"))
        })?;

        Ok(PathBuf::from(home).join(format!(".{}", name.to_lowercase())))
    }

    /// Runtime configuration file inside `home`.
    pub fn runtime_config(home: &Path) -> PathBuf {
        home.join(RUNTIME_CONFIG_FILE)
    }

    /// Log directory inside `home`.
    pub fn log_dir(home: &Path) -> PathBuf {
        home.join("logs")
    }
}
