// src/commands/mod.rs
//! Command handlers for the recipe-sync CLI

mod recipe;
mod register;
mod session;

pub use recipe::{cmd_add, cmd_delete, cmd_list, cmd_logout, cmd_update};
pub use register::cmd_register;
pub use session::{cmd_session_clear, cmd_session_set_token, cmd_session_show};

use anyhow::{Context, Result};
use recipe_sync::{ClientConfig, FileSession, HttpTransport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Resolved configuration shared by every command
pub struct CommandContext {
    pub config: ClientConfig,
}

impl CommandContext {
    /// Layer the config file, environment, and command-line overrides
    pub fn resolve(
        config_path: Option<PathBuf>,
        base_url: Option<String>,
        session_path: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = ClientConfig::load_or_default(config_path.as_deref())?.apply_env()?;
        if let Some(base_url) = base_url {
            config = config.with_base_url(base_url)?;
        }
        if let Some(path) = session_path {
            config = config.with_session_path(path);
        }
        debug!("Using backend {}", config.base_url);
        Ok(Self { config })
    }

    pub fn open_session(&self) -> Result<FileSession> {
        let path = self.config.resolved_session_path()?;
        FileSession::open(&path)
            .with_context(|| format!("Failed to open session file {}", path.display()))
    }

    pub fn transport(&self) -> Result<Arc<HttpTransport>> {
        let transport =
            HttpTransport::with_timeout(&self.config.base_url, self.config.request_timeout())?;
        Ok(Arc::new(transport))
    }
}
