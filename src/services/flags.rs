use dashmap::DashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::AlertError;

/// Per-user record of whether the alert onboarding screen was dismissed.
pub trait SplashFlagStore: Send + Sync {
    fn has_seen_alert_splash(&self, user_key: &str) -> Result<bool, AlertError>;

    fn set_has_seen_alert_splash(&self, user_key: &str) -> Result<(), AlertError>;
}

/// In-process store; flags last as long as the value does.
#[derive(Default)]
pub struct MemorySplashFlagStore {
    seen: DashSet<String>,
}

impl MemorySplashFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SplashFlagStore for MemorySplashFlagStore {
    fn has_seen_alert_splash(&self, user_key: &str) -> Result<bool, AlertError> {
        Ok(self.seen.contains(user_key))
    }

    fn set_has_seen_alert_splash(&self, user_key: &str) -> Result<(), AlertError> {
        self.seen.insert(user_key.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FlagFile {
    #[serde(default)]
    seen_alert_splash: BTreeMap<String, bool>,
}

/// Store backed by a JSON file on the client machine.
pub struct FileSplashFlagStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSplashFlagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<FlagFile, AlertError> {
        if !self.path.exists() {
            return Ok(FlagFile::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(FlagFile::default());
        }
        match serde_json::from_str(&contents) {
            Ok(file) => Ok(file),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Flag file is corrupt; treating as empty.");
                Ok(FlagFile::default())
            }
        }
    }

    /// Writes through a temp file in the same directory so readers never see a partial file.
    fn write(&self, file: &FlagFile) -> Result<(), AlertError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(serde_json::to_string_pretty(file)?.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| AlertError::Io(e.error))?;
        Ok(())
    }
}

impl SplashFlagStore for FileSplashFlagStore {
    fn has_seen_alert_splash(&self, user_key: &str) -> Result<bool, AlertError> {
        let file = self.read()?;
        Ok(file.seen_alert_splash.get(user_key).copied().unwrap_or(false))
    }

    fn set_has_seen_alert_splash(&self, user_key: &str) -> Result<(), AlertError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut file = self.read()?;
        file.seen_alert_splash.insert(user_key.to_string(), true);
        self.write(&file)?;
        debug!(user_key, path = ?self.path, "Recorded alert splash as seen.");
        Ok(())
    }
}
