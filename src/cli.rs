// src/cli.rs
//! CLI definitions for recipe-sync
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipe-sync")]
#[command(author = "Recipe Sync Contributors")]
#[command(version)]
#[command(about = "Manage recipes on a recipe backend from the terminal", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides the config file and RECIPE_SYNC_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Session file holding the auth token (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub session: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List recipes, optionally filtered by a name substring
    List {
        /// Only show recipes whose name contains this text
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Add a recipe
    Add {
        /// Recipe name
        name: String,

        /// Preparation instructions
        instructions: String,
    },

    /// Replace the instructions of an existing recipe
    Update {
        /// Name of the recipe to update
        name: String,

        /// New instructions
        instructions: String,
    },

    /// Delete a recipe by name
    Delete {
        /// Name of the recipe to delete
        name: String,
    },

    /// End the session on the backend and clear local session storage
    Logout,

    /// Register a new account
    Register {
        /// Username
        username: String,

        /// Email address (collected, not sent to the backend)
        email: String,

        /// Password
        password: String,

        /// Password again
        repeat_password: String,
    },

    /// Inspect or edit local session storage
    #[command(subcommand)]
    Session(SessionCommands),
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Store a bearer token obtained from the login flow
    SetToken {
        /// Bearer token
        token: String,

        /// Mark the session as an admin session
        #[arg(long)]
        admin: bool,
    },

    /// Show stored session keys (token masked)
    Show,

    /// Remove every stored key
    Clear,
}
