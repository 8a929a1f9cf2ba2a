// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: recipe name
fn name_arg() -> Arg {
    Arg::new("name").required(true).help("Recipe name")
}

/// Common argument: recipe instructions
fn instructions_arg() -> Arg {
    Arg::new("instructions").required(true).help("Preparation instructions")
}

fn build_cli() -> Command {
    Command::new("recipe-sync")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Recipe Sync Contributors")
        .about("Manage recipes on a recipe backend from the terminal")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("base_url")
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Backend base URL (overrides the config file and RECIPE_SYNC_BASE_URL)"),
        )
        .arg(
            Arg::new("session")
                .long("session")
                .value_name("PATH")
                .global(true)
                .help("Session file holding the auth token (overrides the config file)"),
        )
        .subcommand(
            Command::new("list")
                .about("List recipes, optionally filtered by a name substring")
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("Only show recipes whose name contains this text"),
                ),
        )
        .subcommand(
            Command::new("add")
                .about("Add a recipe")
                .arg(name_arg())
                .arg(instructions_arg()),
        )
        .subcommand(
            Command::new("update")
                .about("Replace the instructions of an existing recipe")
                .arg(Arg::new("name").required(true).help("Name of the recipe to update"))
                .arg(Arg::new("instructions").required(true).help("New instructions")),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a recipe by name")
                .arg(Arg::new("name").required(true).help("Name of the recipe to delete")),
        )
        .subcommand(
            Command::new("logout")
                .about("End the session on the backend and clear local session storage"),
        )
        .subcommand(
            Command::new("register")
                .about("Register a new account")
                .arg(Arg::new("username").required(true).help("Username"))
                .arg(
                    Arg::new("email")
                        .required(true)
                        .help("Email address (collected, not sent to the backend)"),
                )
                .arg(Arg::new("password").required(true).help("Password"))
                .arg(Arg::new("repeat_password").required(true).help("Password again")),
        )
        .subcommand(
            Command::new("session")
                .about("Inspect or edit local session storage")
                .subcommand(
                    Command::new("set-token")
                        .about("Store a bearer token obtained from the login flow")
                        .arg(Arg::new("token").required(true).help("Bearer token"))
                        .arg(
                            Arg::new("admin")
                                .long("admin")
                                .action(clap::ArgAction::SetTrue)
                                .help("Mark the session as an admin session"),
                        ),
                )
                .subcommand(Command::new("show").about("Show stored session keys (token masked)"))
                .subcommand(Command::new("clear").about("Remove every stored key")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/cli.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("recipe-sync.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
