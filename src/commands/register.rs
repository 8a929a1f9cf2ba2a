// src/commands/register.rs
//! Account registration command

use super::CommandContext;
use anyhow::Result;
use recipe_sync::{Registrar, RegistrationInputs, TerminalNavigator, TerminalNotifier, TextInput};
use std::process::ExitCode;

/// Register a new account
pub async fn cmd_register(
    ctx: &CommandContext,
    username: &str,
    email: &str,
    password: &str,
    repeat_password: &str,
) -> Result<ExitCode> {
    let mut registrar = Registrar::new(
        ctx.transport()?,
        Box::new(TerminalNotifier),
        Box::new(TerminalNavigator::new(ctx.config.login_page.clone())),
    );

    let form = RegistrationInputs {
        username: TextInput::new(username),
        email: TextInput::new(email),
        password: TextInput::new(password),
        repeat_password: TextInput::new(repeat_password),
    };

    match registrar.register(&form).await {
        Ok(()) => {
            println!("Registered {}", username.trim());
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
