// src/session.rs
//! Session storage abstraction
//!
//! The recipe page reads its bearer token and admin flag from session
//! storage and clears everything on logout. [`SessionStore`] is the small
//! key-value interface the sync module sees:
//! - [`MemorySession`]: process-local map, for tests and embedders
//! - [`FileSession`]: JSON file, so a token survives between CLI invocations

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key holding the bearer credential
pub const AUTH_TOKEN_KEY: &str = "auth-token";

/// Key holding the admin flag; only the exact string `"true"` counts
pub const IS_ADMIN_KEY: &str = "is-admin";

/// Key-value session storage
pub trait SessionStore: Send {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a single key
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Remove every key
    fn clear(&mut self) -> Result<()>;

    /// All entries in key order
    fn entries(&self) -> Vec<(String, String)>;

    /// The bearer token, if one is stored and non-empty
    fn auth_token(&self) -> Option<String> {
        self.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Whether the admin flag is set to `"true"`
    fn is_admin(&self) -> bool {
        self.get(IS_ADMIN_KEY).as_deref() == Some("true")
    }
}

/// In-memory session storage
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: BTreeMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already holding a bearer token
    pub fn with_token(token: &str) -> Self {
        let mut values = BTreeMap::new();
        values.insert(AUTH_TOKEN_KEY.to_string(), token.to_string());
        Self { values }
    }

    /// Builder-style insert
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        Ok(())
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Session storage persisted as a JSON object on disk
///
/// Every mutation rewrites the whole file through a temporary file and an
/// atomic rename. A missing file reads as an empty session.
#[derive(Debug)]
pub struct FileSession {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSession {
    /// Open (or lazily create) the session file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| {
                Error::Session(format!("Failed to read {}: {e}", path.display()))
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| {
                    Error::Session(format!("Failed to parse {}: {e}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened session file {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Session(format!("Failed to create directory {}: {e}", parent.display()))
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.values)
            .map_err(|e| Error::Session(format!("Failed to encode session: {e}")))?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, contents).map_err(|e| {
            Error::Session(format!("Failed to write {}: {e}", temp_path.display()))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            Error::Session(format!(
                "Failed to move {} to {}: {e}",
                temp_path.display(),
                self.path.display()
            ))
        })?;

        Ok(())
    }
}

impl SessionStore for FileSession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.values.clear();
        self.persist()
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
