// src/commands/session.rs
//! Session storage commands
//!
//! Stand in for the login flow, which writes the token and admin flag that
//! the recipe commands read.

use super::CommandContext;
use anyhow::Result;
use recipe_sync::{SessionStore, AUTH_TOKEN_KEY, IS_ADMIN_KEY};
use std::process::ExitCode;
use tracing::info;

/// Store a bearer token and the admin flag
pub fn cmd_session_set_token(ctx: &CommandContext, token: &str, admin: bool) -> Result<ExitCode> {
    let mut session = ctx.open_session()?;
    session.set(AUTH_TOKEN_KEY, token.trim())?;
    session.set(IS_ADMIN_KEY, if admin { "true" } else { "false" })?;
    info!("Stored session token in {}", session.path().display());
    println!("Session token stored");
    Ok(ExitCode::SUCCESS)
}

/// Print stored keys, masking the token
pub fn cmd_session_show(ctx: &CommandContext) -> Result<ExitCode> {
    let session = ctx.open_session()?;
    let entries = session.entries();
    if entries.is_empty() {
        println!("Session is empty ({})", session.path().display());
        return Ok(ExitCode::SUCCESS);
    }

    println!("Session ({}):", session.path().display());
    for (key, value) in entries {
        let shown = if key == AUTH_TOKEN_KEY {
            mask(&value)
        } else {
            value
        };
        println!("  {} = {}", key, shown);
    }
    Ok(ExitCode::SUCCESS)
}

/// Remove every stored key
pub fn cmd_session_clear(ctx: &CommandContext) -> Result<ExitCode> {
    let mut session = ctx.open_session()?;
    session.clear()?;
    println!("Session cleared");
    Ok(ExitCode::SUCCESS)
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
