// src/ui.rs
//! UI handles injected into the sync and registration modules
//!
//! Nothing here knows about HTML. The page is reduced to what the modules
//! actually touch: text inputs they read and clear, a display container they
//! rebuild, a blocking notification, a redirect, and two visibility flags.

use std::sync::{Arc, Mutex};
use tracing::info;

/// A single-line text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Raw value as typed
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Value with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Every input on the recipe page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeInputs {
    pub add_name: TextInput,
    pub add_instructions: TextInput,
    pub update_name: TextInput,
    pub update_instructions: TextInput,
    pub delete_name: TextInput,
    pub search: TextInput,
}

/// Every input on the registration page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationInputs {
    pub username: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub repeat_password: TextInput,
}

/// One rendered list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    pub name: String,
    pub instructions: String,
}

impl std::fmt::Display for DisplayNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.instructions)
    }
}

/// The region rebuilt from the in-memory list on every render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListContainer {
    nodes: Vec<DisplayNode>,
}

impl ListContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn append(&mut self, node: DisplayNode) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[DisplayNode] {
        &self.nodes
    }

    /// Each node as `"name: instructions"`
    pub fn lines(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Visibility of the page's session-dependent controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageChrome {
    pub logout_button_visible: bool,
    pub admin_link_visible: bool,
}

/// Pages the client can redirect to
///
/// Logout and successful registration both end on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
}

impl Page {
    /// Default relative location of the page
    pub fn default_path(self) -> &'static str {
        match self {
            Page::Login => "login-page.html",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Page::Login => write!(f, "login"),
        }
    }
}

/// Blocking user notification
pub trait Notifier: Send {
    fn alert(&mut self, message: &str);
}

/// Page redirect
pub trait Navigator: Send {
    fn navigate(&mut self, page: Page);
}

/// Prints alerts to stderr
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Reports redirects on stdout
///
/// A terminal has no pages; the redirect target is printed so a wrapper
/// script can act on it.
#[derive(Debug, Clone)]
pub struct TerminalNavigator {
    login_page: String,
}

impl TerminalNavigator {
    pub fn new(login_page: impl Into<String>) -> Self {
        Self {
            login_page: login_page.into(),
        }
    }

    fn path_for(&self, page: Page) -> &str {
        match page {
            Page::Login => self.login_page.as_str(),
        }
    }
}

impl Default for TerminalNavigator {
    fn default() -> Self {
        Self::new(Page::Login.default_path())
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, page: Page) {
        info!("Navigating to {} page", page);
        println!("-> {}", self.path_for(page));
    }
}

/// Notifier that keeps every alert; clones share the log
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    alerts: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<String> {
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}

/// Navigator that keeps every redirect; clones share the log
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Arc<Mutex<Vec<Page>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Page> {
        self.visited.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, page: Page) {
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(page);
    }
}
