use crate::error::{self, Result};
use config::{Config, Environment, File};
use rastertiles_datatypes::tiles::TableName;
use rastertiles_operators::source::DatabaseRegistry;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use snafu::ResultExt;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const ENVIRONMENT_PREFIX: &str = "rastertiles";

/// The merged settings of the settings files and the environment.
///
/// Settings are loaded once by the caller and passed on explicitly.
#[derive(Debug, Clone)]
pub struct Settings {
    config: Config,
}

impl Settings {
    /// Loads the settings from the working directory and the environment
    pub fn load() -> Result<Self> {
        Self::from_dir(&retrieve_settings_dir()?)
    }

    /// Loads `Settings-default.toml` and `Settings.toml` from `dir` if they exist and applies the
    /// environment on top
    pub fn from_dir(dir: &Path) -> Result<Self> {
        #[cfg(test)]
        let files = ["Settings-default.toml", "Settings-test.toml"];

        #[cfg(not(test))]
        let files = ["Settings-default.toml", "Settings.toml"];

        let files: Vec<PathBuf> = files.iter().map(|f| dir.join(f)).collect();

        Self::from_sources(&files)
    }

    /// Merges the given settings files in order, skipping missing ones, and applies the environment.
    ///
    /// Environment variables start with `RASTERTILES__` and use `__` to separate groups,
    /// e.g. `RASTERTILES__LOGGING__LOG_SPEC=debug`.
    pub fn from_sources(files: &[PathBuf]) -> Result<Self> {
        let files: Vec<File<_, _>> = files
            .iter()
            .filter(|p| p.exists())
            .map(|p| File::from(p.as_path()))
            .collect();

        let config = Config::builder()
            .add_source(files)
            .add_source(Environment::with_prefix(ENVIRONMENT_PREFIX).separator("__"))
            .build()
            .context(error::Config)?;

        Ok(Self { config })
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.config.get::<T>(key).context(error::Config)
    }

    pub fn get_element<T: ConfigElement + DeserializeOwned>(&self) -> Result<T> {
        self.get(T::KEY)
    }

    /// The configured databases
    pub fn databases(&self) -> Result<DatabaseRegistry> {
        self.get_element()
    }
}

/// test may run in subdirectory
#[cfg(test)]
fn retrieve_settings_dir() -> Result<PathBuf> {
    use crate::error::Error;

    const MAX_PARENT_DIRS: usize = 1;

    let mut settings_dir = std::env::current_dir().context(error::MissingWorkingDirectory)?;

    for _ in 0..=MAX_PARENT_DIRS {
        if settings_dir.join("Settings-default.toml").exists() {
            return Ok(settings_dir);
        }

        // go to parent directory
        if !settings_dir.pop() {
            break;
        }
    }

    Err(Error::MissingSettingsDirectory)
}

#[cfg(not(test))]
fn retrieve_settings_dir() -> Result<PathBuf> {
    std::env::current_dir().context(error::MissingWorkingDirectory)
}

pub trait ConfigElement {
    const KEY: &'static str;
}

impl ConfigElement for DatabaseRegistry {
    const KEY: &'static str = "databases";
}

/// Which database and table tiles are opened from unless specified otherwise
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Raster {
    pub default_alias: String,
    pub default_table: TableName,
}

impl ConfigElement for Raster {
    const KEY: &'static str = "raster";
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub log_spec: String,
}

impl ConfigElement for Logging {
    const KEY: &'static str = "logging";
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gdal {
    pub allowed_drivers: HashSet<String>,
}

impl ConfigElement for Gdal {
    const KEY: &'static str = "gdal";
}
