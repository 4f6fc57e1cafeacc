//! File-backed store.
//!
//! Implements both [`PetStore`] and [`ConfigPort`] on top of a data
//! directory:
//!
//! ```text
//! <data dir>/
//!   state.json    the pet (single slot, last writer wins)
//!   config.json   engine configuration
//! ```
//!
//! Writes go to a sibling `*.tmp` file first and are then renamed over
//! the target, so a crash mid-write leaves the previous file intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Serialize;

use crate::app::ports::{ConfigError, ConfigPort, PetStore, StoreError};
use crate::config::EngineConfig;
use crate::pet::PetState;

const STATE_FILE: &str = "state.json";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!("FileStore: using {}", dir.display());
        Ok(Self { dir })
    }

    /// Platform data directory, e.g. `~/.local/share/tamagotchi` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "tamagotchi", "tamagotchi")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }
}

/// Read a file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Write `value` as pretty JSON through a temp file and rename.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(value).map_err(io::Error::other)?;
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl PetStore for FileStore {
    fn load(&self) -> Result<Option<PetState>, StoreError> {
        let Some(text) = read_optional(&self.state_path())? else {
            debug!("FileStore: no saved pet");
            return Ok(None);
        };
        let state = serde_json::from_str(&text).map_err(|_| StoreError::Corrupted)?;
        Ok(Some(state))
    }

    fn save(&mut self, state: &PetState) -> Result<(), StoreError> {
        write_json_atomic(&self.state_path(), state)?;
        Ok(())
    }
}

impl ConfigPort for FileStore {
    fn load_config(&self) -> Result<EngineConfig, ConfigError> {
        let Some(text) = read_optional(&self.config_path())? else {
            info!("FileStore: no stored config, using defaults");
            return Ok(EngineConfig::default());
        };
        let config: EngineConfig =
            serde_json::from_str(&text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    fn save_config(&self, config: &EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        write_json_atomic(&self.config_path(), config)?;
        info!("FileStore: config saved");
        Ok(())
    }
}
