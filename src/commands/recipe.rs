// src/commands/recipe.rs
//! Recipe list, add, update, delete and logout commands
//!
//! Each invocation is one page session: the page is loaded (chrome from the
//! session, then the list), the action runs, and the resulting page is
//! printed. Failures have already been alerted on stderr by the time they
//! reach here, so they only turn into an exit code.

use super::CommandContext;
use anyhow::Result;
use recipe_sync::{Command, RecipeSync, TerminalNavigator, TerminalNotifier};
use std::process::ExitCode;
use tracing::info;

/// A recipe page action run after the page has loaded
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Show,
    Search(String),
    Add { name: String, instructions: String },
    Update { name: String, instructions: String },
    Delete(String),
    Logout,
}

fn open(ctx: &CommandContext) -> Result<RecipeSync> {
    let session = ctx.open_session()?;
    let transport = ctx.transport()?;
    Ok(RecipeSync::new(
        transport,
        Box::new(session),
        Box::new(TerminalNotifier),
        Box::new(TerminalNavigator::new(ctx.config.login_page.clone())),
    ))
}

/// Load the page, then fill the matching inputs and dispatch the action
async fn run(sync: &mut RecipeSync, action: &Action) -> recipe_sync::Result<()> {
    sync.dispatch(Command::Load).await?;

    let command = match action {
        Action::Show => return Ok(()),
        Action::Search(term) => {
            info!("Searching recipes for '{}'", term);
            sync.inputs_mut().search.set(term.as_str());
            Command::Search
        }
        Action::Add { name, instructions } => {
            sync.inputs_mut().add_name.set(name.as_str());
            sync.inputs_mut().add_instructions.set(instructions.as_str());
            Command::Add
        }
        Action::Update { name, instructions } => {
            sync.inputs_mut().update_name.set(name.as_str());
            sync.inputs_mut().update_instructions.set(instructions.as_str());
            Command::Update
        }
        Action::Delete(name) => {
            sync.inputs_mut().delete_name.set(name.as_str());
            Command::Delete
        }
        Action::Logout => Command::Logout,
    };

    sync.dispatch(command).await
}

/// Lines describing the page: chrome first, then the recipe list
fn page_lines(sync: &RecipeSync) -> Vec<String> {
    let mut lines = Vec::new();
    let chrome = sync.chrome();
    if chrome.admin_link_visible {
        lines.push("Signed in as admin".to_string());
    } else if chrome.logout_button_visible {
        lines.push("Signed in".to_string());
    } else {
        lines.push("Not signed in".to_string());
    }

    let display = sync.display();
    if display.is_empty() {
        lines.push("No recipes".to_string());
    } else {
        lines.push(format!("Recipes ({}):", display.len()));
        lines.extend(display.lines().into_iter().map(|line| format!("  {}", line)));
    }
    lines
}

async fn execute(ctx: &CommandContext, action: Action) -> Result<ExitCode> {
    let mut sync = open(ctx)?;

    match run(&mut sync, &action).await {
        Ok(()) => {
            match &action {
                Action::Add { name, .. } => println!("Added recipe: {}", name.trim()),
                Action::Update { name, .. } => println!("Updated recipe: {}", name.trim()),
                Action::Delete(name) => println!("Deleted recipe: {}", name.trim()),
                Action::Logout => println!("Logged out"),
                Action::Show | Action::Search(_) => {}
            }
            if action != Action::Logout {
                for line in page_lines(&sync) {
                    println!("{}", line);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

/// List or search recipes
pub async fn cmd_list(ctx: &CommandContext, name: Option<String>) -> Result<ExitCode> {
    let action = match name {
        Some(term) => Action::Search(term),
        None => Action::Show,
    };
    execute(ctx, action).await
}

/// Add a recipe
pub async fn cmd_add(ctx: &CommandContext, name: &str, instructions: &str) -> Result<ExitCode> {
    execute(
        ctx,
        Action::Add {
            name: name.to_string(),
            instructions: instructions.to_string(),
        },
    )
    .await
}

/// Update a recipe by name
pub async fn cmd_update(ctx: &CommandContext, name: &str, instructions: &str) -> Result<ExitCode> {
    execute(
        ctx,
        Action::Update {
            name: name.to_string(),
            instructions: instructions.to_string(),
        },
    )
    .await
}

/// Delete a recipe by name
pub async fn cmd_delete(ctx: &CommandContext, name: &str) -> Result<ExitCode> {
    execute(ctx, Action::Delete(name.to_string())).await
}

/// Log out
pub async fn cmd_logout(ctx: &CommandContext) -> Result<ExitCode> {
    execute(ctx, Action::Logout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_sync::transport::{Method, StatusCode};
    use recipe_sync::{
        IS_ADMIN_KEY, MemorySession, MockTransport, RecordingNavigator, RecordingNotifier,
    };
    use serde_json::json;
    use std::sync::Arc;

    fn sync_with(mock: &MockTransport, session: MemorySession) -> RecipeSync {
        RecipeSync::new(
            Arc::new(mock.clone()),
            Box::new(session),
            Box::new(RecordingNotifier::new()),
            Box::new(RecordingNavigator::new()),
        )
    }

    fn soup() -> serde_json::Value {
        json!([{"id": 1, "name": "Soup", "instructions": "Boil"}])
    }

    #[tokio::test]
    async fn test_every_action_loads_first() {
        let actions = vec![
            Action::Show,
            Action::Search("so".to_string()),
            Action::Add {
                name: "Pie".to_string(),
                instructions: "Bake".to_string(),
            },
            Action::Update {
                name: "Soup".to_string(),
                instructions: "Stir".to_string(),
            },
            Action::Delete("Soup".to_string()),
            Action::Logout,
        ];

        for action in actions {
            let mock = MockTransport::new();
            mock.push_json(StatusCode::OK, soup());
            let mut sync = sync_with(&mock, MemorySession::with_token("tok"));

            // Load succeeds; whatever the action sends next fails
            let _ = run(&mut sync, &action).await;

            let first = &mock.requests()[0];
            assert_eq!(first.method, Method::GET, "{:?}", action);
            assert_eq!(first.path, "/recipes", "{:?}", action);
            assert!(first.query.is_empty(), "{:?}", action);
            assert!(sync.chrome().logout_button_visible, "{:?}", action);
        }
    }

    #[tokio::test]
    async fn test_add_sends_after_load() {
        let mock = MockTransport::new();
        mock.push_json(StatusCode::OK, soup());
        mock.push_status(StatusCode::CREATED);
        mock.push_json(
            StatusCode::OK,
            json!([
                {"id": 1, "name": "Soup", "instructions": "Boil"},
                {"id": 2, "name": "Pie", "instructions": "Bake"}
            ]),
        );
        let mut sync = sync_with(&mock, MemorySession::with_token("tok"));

        run(
            &mut sync,
            &Action::Add {
                name: "Pie".to_string(),
                instructions: "Bake".to_string(),
            },
        )
        .await
        .unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].method, Method::POST);
        assert_eq!(
            page_lines(&sync),
            vec!["Signed in", "Recipes (2):", "  Soup: Boil", "  Pie: Bake"]
        );
    }

    #[tokio::test]
    async fn test_failed_load_stops_the_action() {
        let mock = MockTransport::new();
        mock.push_status(StatusCode::INTERNAL_SERVER_ERROR);
        let mut sync = sync_with(&mock, MemorySession::with_token("tok"));

        let result = run(&mut sync, &Action::Delete("Soup".to_string())).await;

        assert!(result.is_err());
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_search_prints_admin_chrome() {
        let mock = MockTransport::new();
        mock.push_json(StatusCode::OK, soup());
        mock.push_json(StatusCode::OK, json!([]));
        let session = MemorySession::with_token("tok").with_entry(IS_ADMIN_KEY, "true");
        let mut sync = sync_with(&mock, session);

        run(&mut sync, &Action::Search("pie".to_string()))
            .await
            .unwrap();

        assert_eq!(
            mock.requests()[1].query,
            vec![("name".to_string(), "pie".to_string())]
        );
        assert_eq!(page_lines(&sync), vec!["Signed in as admin", "No recipes"]);
    }

    #[test]
    fn test_page_lines_anonymous() {
        let mock = MockTransport::new();
        let sync = sync_with(&mock, MemorySession::new());
        assert_eq!(page_lines(&sync), vec!["Not signed in", "No recipes"]);
    }
}
