// src/main.rs

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;

use cli::{Cli, Commands, SessionCommands};
use commands::CommandContext;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let ctx = CommandContext::resolve(cli.config, cli.base_url, cli.session)?;

    match cli.command {
        Commands::List { name } => commands::cmd_list(&ctx, name).await,
        Commands::Add { name, instructions } => {
            commands::cmd_add(&ctx, &name, &instructions).await
        }
        Commands::Update { name, instructions } => {
            commands::cmd_update(&ctx, &name, &instructions).await
        }
        Commands::Delete { name } => commands::cmd_delete(&ctx, &name).await,
        Commands::Logout => commands::cmd_logout(&ctx).await,
        Commands::Register {
            username,
            email,
            password,
            repeat_password,
        } => commands::cmd_register(&ctx, &username, &email, &password, &repeat_password).await,
        Commands::Session(session_cmd) => match session_cmd {
            SessionCommands::SetToken { token, admin } => {
                commands::cmd_session_set_token(&ctx, &token, admin)
            }
            SessionCommands::Show => commands::cmd_session_show(&ctx),
            SessionCommands::Clear => commands::cmd_session_clear(&ctx),
        },
    }
}
