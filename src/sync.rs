// src/sync.rs

//! Recipe sync: keeps a local recipe list in step with the backend
//!
//! [`RecipeSync`] owns the in-memory list and every handle it needs
//! (transport, session storage, inputs, display, notifier, navigator), so a
//! page, a CLI or a test can drive it without globals.
//!
//! # Behaviour
//!
//! - Every successful fetch or mutation replaces the whole list and
//!   re-renders; nothing is patched incrementally
//! - `update` and `delete` resolve names against the last fetched snapshot,
//!   so a concurrent change on the backend can make the snapshot stale
//! - Failures are alerted through the [`Notifier`] and also returned
//! - No retries, no cancellation, no deadline unless the transport sets one
//!
//! # Example
//!
//! ```ignore
//! let transport = Arc::new(HttpTransport::new("http://localhost:8081")?);
//! let mut sync = RecipeSync::new(
//!     transport,
//!     Box::new(MemorySession::with_token("tok")),
//!     Box::new(TerminalNotifier),
//!     Box::new(TerminalNavigator::default()),
//! );
//!
//! sync.load().await?;
//! sync.create("Pie", "Bake").await?;
//! for line in sync.display().lines() {
//!     println!("{line}");
//! }
//! ```

use crate::error::{Error, ErrorKind, Operation, Result};
use crate::model::{find_by_name, Recipe, RecipeDraft, RecipeId};
use crate::session::SessionStore;
use crate::transport::{ApiRequest, ApiResponse, StatusCode, Transport};
use crate::ui::{DisplayNode, ListContainer, Navigator, Notifier, Page, PageChrome, RecipeInputs};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const RECIPES_PATH: &str = "/recipes";
const LOGOUT_PATH: &str = "/logout";

/// One user action on the recipe page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Page load: set chrome visibility, then fetch
    Load,
    /// Search button
    Search,
    /// Add form submit
    Add,
    /// Update form submit
    Update,
    /// Delete form submit
    Delete,
    /// Logout button
    Logout,
}

/// Client-side cache of backend records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    recipes: Vec<Recipe>,
}

impl ClientState {
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Replace the whole list
    pub fn replace(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
    }

    /// Resolve a name to its id using the current snapshot
    pub fn lookup(&self, name: &str) -> Option<&RecipeId> {
        find_by_name(&self.recipes, name).map(|r| &r.id)
    }
}

/// Log an error at a level matching its kind, alert the user, and hand the
/// error back for the caller to return
pub(crate) fn surface(notifier: &mut dyn Notifier, err: Error) -> Error {
    match (&err, err.kind()) {
        (Error::Http { operation, status }, _) => {
            warn!("{} returned HTTP {}", operation, status);
        }
        (_, ErrorKind::Validation) => debug!("Rejected before sending: {}", err),
        (_, ErrorKind::Http) => warn!("{}", err),
        (_, ErrorKind::Transport) | (_, ErrorKind::Local) => error!("{}", err),
    }
    notifier.alert(&err.user_message());
    err
}

/// The recipe page's sync module
pub struct RecipeSync {
    transport: Arc<dyn Transport>,
    session: Box<dyn SessionStore>,
    notifier: Box<dyn Notifier>,
    navigator: Box<dyn Navigator>,
    state: ClientState,
    inputs: RecipeInputs,
    display: ListContainer,
    chrome: PageChrome,
}

impl RecipeSync {
    /// Create a sync module with empty inputs and an empty list
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Box<dyn SessionStore>,
        notifier: Box<dyn Notifier>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        debug!("Recipe sync using {} transport", transport.name());
        Self {
            transport,
            session,
            notifier,
            navigator,
            state: ClientState::default(),
            inputs: RecipeInputs::default(),
            display: ListContainer::new(),
            chrome: PageChrome::default(),
        }
    }

    /// Start with pre-filled inputs
    pub fn with_inputs(mut self, inputs: RecipeInputs) -> Self {
        self.inputs = inputs;
        self
    }

    /// Current in-memory list
    pub fn recipes(&self) -> &[Recipe] {
        self.state.recipes()
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn display(&self) -> &ListContainer {
        &self.display
    }

    pub fn inputs(&self) -> &RecipeInputs {
        &self.inputs
    }

    pub fn inputs_mut(&mut self) -> &mut RecipeInputs {
        &mut self.inputs
    }

    pub fn chrome(&self) -> PageChrome {
        self.chrome
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    /// Run the operation bound to a user action, reading its arguments from
    /// the injected inputs
    pub async fn dispatch(&mut self, command: Command) -> Result<()> {
        debug!("Dispatching {:?}", command);
        match command {
            Command::Load => self.load().await,
            Command::Search => self.search().await,
            Command::Add => {
                let name = self.inputs.add_name.value().to_string();
                let instructions = self.inputs.add_instructions.value().to_string();
                self.create(&name, &instructions).await
            }
            Command::Update => {
                let name = self.inputs.update_name.value().to_string();
                let instructions = self.inputs.update_instructions.value().to_string();
                self.update(&name, &instructions).await
            }
            Command::Delete => {
                let name = self.inputs.delete_name.value().to_string();
                self.delete(&name).await
            }
            Command::Logout => self.logout().await,
        }
    }

    /// Page load: show the logout button when a token exists, the admin
    /// link when the admin flag is `"true"`, then fetch the list
    pub async fn load(&mut self) -> Result<()> {
        self.refresh_chrome();
        self.list(None).await
    }

    /// Recompute control visibility from session storage
    pub fn refresh_chrome(&mut self) -> PageChrome {
        self.chrome = PageChrome {
            logout_button_visible: self.session.auth_token().is_some(),
            admin_link_visible: self.session.is_admin(),
        };
        self.chrome
    }

    /// Search using the trimmed search input
    pub async fn search(&mut self) -> Result<()> {
        let term = self.inputs.search.trimmed().to_string();
        self.list(Some(&term)).await
    }

    /// Fetch the list, optionally filtered by name, and re-render
    ///
    /// On any failure the previous list and display are kept.
    pub async fn list(&mut self, filter: Option<&str>) -> Result<()> {
        match self.fetch(filter).await {
            Ok(recipes) => {
                info!("Fetched {} recipes", recipes.len());
                self.state.replace(recipes);
                self.render();
                Ok(())
            }
            Err(e) => Err(surface(self.notifier.as_mut(), e)),
        }
    }

    /// Create a recipe; only HTTP 201 counts as success
    pub async fn create(&mut self, name: &str, instructions: &str) -> Result<()> {
        let draft = match Self::draft(name, instructions, "Name and instructions are required.") {
            Ok(draft) => draft,
            Err(e) => return Err(surface(self.notifier.as_mut(), e)),
        };

        let result = self
            .send_draft(Operation::Create, ApiRequest::post(RECIPES_PATH), &draft)
            .await
            .and_then(|response| {
                if response.status == StatusCode::CREATED {
                    Ok(())
                } else {
                    Err(Error::Http {
                        operation: Operation::Create,
                        status: response.status,
                    })
                }
            });

        if let Err(e) = result {
            return Err(surface(self.notifier.as_mut(), e));
        }

        info!("Created recipe '{}'", draft.name);
        self.inputs.add_name.clear();
        self.inputs.add_instructions.clear();
        self.list(None).await
    }

    /// Update the recipe whose name matches, addressed by its id
    pub async fn update(&mut self, name: &str, instructions: &str) -> Result<()> {
        let draft = match Self::draft(
            name,
            instructions,
            "Both name and updated instructions are required.",
        ) {
            Ok(draft) => draft,
            Err(e) => return Err(surface(self.notifier.as_mut(), e)),
        };

        let id = match self.resolve(&draft.name) {
            Ok(id) => id,
            Err(e) => return Err(surface(self.notifier.as_mut(), e)),
        };

        let result = self
            .send_draft(Operation::Update, ApiRequest::put(recipe_path(&id)), &draft)
            .await
            .and_then(|response| expect_success(Operation::Update, &response));

        if let Err(e) = result {
            return Err(surface(self.notifier.as_mut(), e));
        }

        info!("Updated recipe '{}' ({})", draft.name, id);
        self.inputs.update_name.clear();
        self.inputs.update_instructions.clear();
        self.list(None).await
    }

    /// Delete the recipe whose name matches, addressed by its id
    pub async fn delete(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        let id = match self.resolve(name) {
            Ok(id) => id,
            Err(e) => return Err(surface(self.notifier.as_mut(), e)),
        };

        let request = ApiRequest::delete(recipe_path(&id)).with_bearer(self.bearer());
        let result = self
            .send(Operation::Delete, request)
            .await
            .and_then(|response| expect_success(Operation::Delete, &response));

        if let Err(e) = result {
            return Err(surface(self.notifier.as_mut(), e));
        }

        info!("Deleted recipe '{}' ({})", name, id);
        self.inputs.delete_name.clear();
        self.list(None).await
    }

    /// Rebuild the display from the in-memory list
    pub fn render(&mut self) {
        self.display.clear();
        for recipe in self.state.recipes() {
            self.display.append(DisplayNode {
                name: recipe.name.clone(),
                instructions: recipe.instructions.clone(),
            });
        }
    }

    /// End the session; on success clear storage and go to the login page
    pub async fn logout(&mut self) -> Result<()> {
        let request = ApiRequest::post(LOGOUT_PATH).with_bearer(self.bearer());
        let result = self
            .send(Operation::Logout, request)
            .await
            .and_then(|response| expect_success(Operation::Logout, &response));

        if let Err(e) = result {
            return Err(surface(self.notifier.as_mut(), e));
        }

        if let Err(e) = self.session.clear() {
            return Err(surface(self.notifier.as_mut(), e));
        }

        info!("Logged out");
        self.chrome = PageChrome::default();
        self.navigator.navigate(Page::Login);
        Ok(())
    }

    async fn fetch(&self, filter: Option<&str>) -> Result<Vec<Recipe>> {
        let (operation, request) = match filter {
            Some(term) => (
                Operation::Search,
                ApiRequest::get(RECIPES_PATH).with_query("name", term),
            ),
            None => (Operation::Fetch, ApiRequest::get(RECIPES_PATH)),
        };

        let response = self.send(operation, request).await?;
        expect_success(operation, &response)?;

        serde_json::from_str(&response.body).map_err(|source| Error::Json { operation, source })
    }

    async fn send(&self, operation: Operation, request: ApiRequest) -> Result<ApiResponse> {
        self.transport
            .send(request)
            .await
            .map_err(|source| Error::Transport { operation, source })
    }

    async fn send_draft(
        &self,
        operation: Operation,
        request: ApiRequest,
        draft: &RecipeDraft,
    ) -> Result<ApiResponse> {
        let request = request
            .with_bearer(self.bearer())
            .with_json(draft)
            .map_err(|source| Error::Json { operation, source })?;
        self.send(operation, request).await
    }

    /// Bearer token read from session storage at call time
    fn bearer(&self) -> Option<String> {
        let token = self.session.auth_token();
        if token.is_none() {
            warn!("No auth token in session; sending request without Authorization header");
        }
        token
    }

    fn resolve(&self, name: &str) -> Result<RecipeId> {
        self.state
            .lookup(name)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                name: name.to_string(),
            })
    }

    fn draft(name: &str, instructions: &str, required_message: &str) -> Result<RecipeDraft> {
        let name = name.trim();
        let instructions = instructions.trim();
        if name.is_empty() || instructions.is_empty() {
            return Err(Error::validation(required_message));
        }
        Ok(RecipeDraft {
            name: name.to_string(),
            instructions: instructions.to_string(),
        })
    }
}

/// Path of a single recipe; the id is percent-encoded as one segment
fn recipe_path(id: &RecipeId) -> String {
    format!("{}/{}", RECIPES_PATH, urlencoding::encode(&id.to_string()))
}

fn expect_success(operation: Operation, response: &ApiResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(Error::Http {
            operation,
            status: response.status,
        })
    }
}
