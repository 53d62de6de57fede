//! Token store trait and its file-backed and in-memory implementations

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persisted session: the bearer token and whatever the server said about the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

/// Accessor/remover for the credentials attached to outgoing requests
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Current bearer token, if any
    fn token(&self) -> Option<String>;

    /// Forget the bearer token
    fn remove_token(&self);

    /// Forget the cached user profile
    fn remove_user_info(&self);
}

/// Session kept in a JSON file under the user's data directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/session.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("session.json"))
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Session, StoreError> {
        if !self.path.exists() {
            return Ok(Session::default());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Session::default());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(session).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, content).map_err(io_err)
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        let result = self.load().and_then(|mut session| {
            f(&mut session);
            self.save(&session)
        });
        if let Err(err) = result {
            tracing::warn!("Failed to update session: {err}");
        }
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Option<String> {
        match self.load() {
            Ok(session) => session.token.filter(|t| !t.is_empty()),
            Err(err) => {
                tracing::warn!("Ignoring unreadable session: {err}");
                None
            }
        }
    }

    fn remove_token(&self) {
        self.update(|s| s.token = None);
    }

    fn remove_user_info(&self) {
        self.update(|s| s.user = None);
    }
}

/// Session held in memory; used when no data directory is available
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Session>,
}

impl MemoryTokenStore {
    #[cfg(test)]
    pub fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        // A poisoned session is still a valid session
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.lock().token.clone().filter(|t| !t.is_empty())
    }

    fn remove_token(&self) {
        self.lock().token = None;
    }

    fn remove_user_info(&self) {
        self.lock().user = None;
    }
}
