use async_once_cell::OnceCell;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde_derive::{Deserialize, Serialize};
use std::fs::{self, create_dir_all};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::CLI_NAME;

lazy_static! {
    pub static ref SETTINGS: Arc<OnceCell<Settings>> = Arc::new(OnceCell::new());
}

static DEFAULT_DB_FILE: &str = "setlist.db";
static DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings global store is unitialized")]
    Uninitialized,

    #[error("Could not locate program directories")]
    Directories,

    #[error("Could not parse the config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not create the data directory {0:?}: {1}")]
    DataDir(PathBuf, io::Error),

    #[error("Could not convert path to string: {0:?}")]
    InvalidPath(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub db: String,
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db: String::new(),
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:5000".to_string()
}

fn project_dirs() -> Result<ProjectDirs, SettingsError> {
    ProjectDirs::from("com", "github", CLI_NAME).ok_or(SettingsError::Directories)
}

pub fn load(path: Option<PathBuf>) -> Result<Settings, SettingsError> {
    let path = match path {
        Some(path) => path,
        None => project_dirs()?.config_dir().join(DEFAULT_CONFIG_FILE),
    };
    tracing::info! {?path, "Loading config file"};
    let content = fs::read_to_string(&path).unwrap_or_default();
    let mut set: Settings = toml::from_str(content.as_str())?;
    set = generate_default(set)?;
    tracing::trace! {settings = ?set, "Loaded settings"};
    Ok(set)
}

pub fn generate_default(set: Settings) -> Result<Settings, SettingsError> {
    if set.db.is_empty() {
        let dirs = project_dirs()?;
        with_data_dir(set, dirs.data_dir())
    } else {
        Ok(set)
    }
}

/// Fills the database url with a sqlite file inside `data_dir` when unset.
pub fn with_data_dir(mut set: Settings, data_dir: &Path) -> Result<Settings, SettingsError> {
    if set.db.is_empty() {
        if let Err(e) = create_dir_all(data_dir) {
            if e.kind() != io::ErrorKind::AlreadyExists {
                return Err(SettingsError::DataDir(data_dir.to_path_buf(), e));
            }
        }
        let file = data_dir.join(DEFAULT_DB_FILE);
        let file = file
            .to_str()
            .ok_or_else(|| SettingsError::InvalidPath(file.clone()))?;
        set.db = format!("sqlite://{}?mode=rwc", file);
    }
    Ok(set)
}

pub fn get_settings() -> Result<&'static Settings, SettingsError> {
    SETTINGS.get().ok_or(SettingsError::Uninitialized)
}
