//! JSON state file persistence.
//!
//! One fixed file holds the whole dashboard. Loading happens once at
//! startup; a missing or corrupt file falls back wholesale to the seed
//! dataset, no migration. Saving runs after every mutation and is
//! best-effort: failures are logged and swallowed, the in-memory state
//! stays authoritative.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{DashError, Result};
use crate::seed;
use crate::store::Dashboard;

/// Handle to the state file location
#[derive(Clone, Debug)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `~/.dashctl/state.json`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(DashError::NoHomeDir)?;
        Ok(home.join(".dashctl").join("state.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dashboard, seeding on any failure. The search term is
    /// transient state and always starts empty.
    pub fn load_or_seed(&self) -> Dashboard {
        let mut dashboard = match self.try_load() {
            Ok(dashboard) => {
                debug!(path = %self.path.display(), "loaded state file");
                dashboard
            }
            Err(DashError::Io { source }) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file, seeding defaults");
                seed::default_dashboard()
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable state file, seeding defaults");
                seed::default_dashboard()
            }
        };
        dashboard.search_term.clear();
        dashboard
    }

    /// Persist the dashboard. Best-effort: a failed write is logged at
    /// warn and otherwise ignored.
    pub fn save(&self, dashboard: &Dashboard) {
        if let Err(err) = self.try_save(dashboard) {
            warn!(path = %self.path.display(), error = %err, "failed to save state file");
        }
    }

    fn try_load(&self) -> Result<Dashboard> {
        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| DashError::state_file(&self.path, e))
    }

    fn try_save(&self, dashboard: &Dashboard) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(dashboard)
            .map_err(|e| DashError::state_file(&self.path, e))?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "saved state file");
        Ok(())
    }
}
