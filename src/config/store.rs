//! Store location policy.
//!
//! The store is one `SQLite` file with a fixed name inside a per-installation
//! data directory. The location is resolved once at startup and passed
//! explicitly to everything that opens the store, so tests can point at a
//! temporary directory instead.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the store inside the data directory.
pub const STORE_FILE_NAME: &str = "rescue.db";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "RESCUE_DATA_DIR";

/// Optional settings file read from the working directory.
pub const SETTINGS_FILE: &str = "rescue.toml";

/// Directory used when neither the environment nor the settings file name one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Structure of `rescue.toml`
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// `[store]` table
    #[serde(default)]
    pub store: StoreSettings,
}

/// `[store]` table of `rescue.toml`
#[derive(Debug, Default, Deserialize)]
pub struct StoreSettings {
    /// Data directory holding the store file
    pub data_dir: Option<PathBuf>,
}

/// Loads `rescue.toml`-style settings from a path.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {SETTINGS_FILE}: {e}"),
    })
}

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    data_dir: PathBuf,
}

impl StoreLocation {
    /// Uses an explicit data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolves the data directory: `RESCUE_DATA_DIR`, then `[store] data_dir`
    /// in `rescue.toml` if that file exists, then `data`.
    ///
    /// # Errors
    /// Returns an error if `rescue.toml` exists but cannot be parsed.
    pub fn resolve() -> Result<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV)
            && !dir.trim().is_empty()
        {
            debug!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
            return Ok(Self::new(dir));
        }

        if Path::new(SETTINGS_FILE).exists() {
            let settings = load_settings(SETTINGS_FILE)?;
            if let Some(dir) = settings.store.data_dir {
                debug!("Using data directory from {}: {:?}", SETTINGS_FILE, dir);
                return Ok(Self::new(dir));
            }
        }

        Ok(Self::new(DEFAULT_DATA_DIR))
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    /// Connection URL that creates the file if it is missing.
    #[must_use]
    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.store_path().display())
    }

    /// Creates the data directory if needed. Safe to call repeatedly and from
    /// concurrent invocations: an existing directory counts as success.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<()> {
        if self.data_dir.is_dir() {
            return Ok(());
        }
        match std::fs::create_dir_all(&self.data_dir) {
            Ok(()) => {
                info!("Created data directory {:?}", self.data_dir);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && self.data_dir.is_dir() => {
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
