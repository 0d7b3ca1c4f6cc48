//! File-backed home preference
//!
//! A single JSON document holding the home location. A missing file means
//! no home is set; an unreadable or corrupt one is logged and treated the
//! same way.

use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::HomeStorePort;
use async_trait::async_trait;
use domain::Location;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use super::error::HomeStoreError;

const HOME_FILE: &str = "home.json";

/// Default store path
///
/// `$XDG_CONFIG_HOME/homerun/home.json`, else `~/.config/homerun/home.json`,
/// else `./home.json` when no home directory is known.
pub fn default_home_path() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|dir| !dir.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .map_or_else(
            || PathBuf::from(HOME_FILE),
            |config_dir| config_dir.join("homerun").join(HOME_FILE),
        )
}

/// On-disk shape of the stored home
#[derive(Debug, Serialize, Deserialize)]
struct StoredHome {
    lat: f64,
    lon: f64,
    name: String,
}

/// Home store persisting a JSON document on disk
#[derive(Debug, Clone)]
pub struct FileHomeStore {
    path: PathBuf,
}

impl FileHomeStore {
    /// Create a store at `path` (the file is created on first save)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn decode(&self, text: &str) -> Option<Location> {
        let stored = match serde_json::from_str::<StoredHome>(text) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt home file");
                return None;
            },
        };

        match Location::new(stored.lat, stored.lon, stored.name) {
            Ok(home) => Some(home),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring home with invalid coordinates");
                None
            },
        }
    }

    async fn write(&self, home: &Location) -> Result<(), HomeStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| HomeStoreError::io(parent, e))?;
        }

        let stored = StoredHome {
            lat: home.lat(),
            lon: home.lon(),
            name: home.name().to_string(),
        };
        let json = serde_json::to_vec_pretty(&stored)?;

        // write then rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| HomeStoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| HomeStoreError::io(&self.path, e))
    }
}

#[async_trait]
impl HomeStorePort for FileHomeStore {
    async fn load(&self) -> Result<Option<Location>, ApplicationError> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => Ok(self.decode(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No home stored");
                Ok(None)
            },
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Home file unreadable");
                Ok(None)
            },
        }
    }

    async fn save(&self, home: &Location) -> Result<(), ApplicationError> {
        self.write(home).await?;
        debug!(path = %self.path.display(), home = %home, "Home saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), ApplicationError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HomeStoreError::io(&self.path, e).into()),
        }
    }
}
