// src/lib.rs

//! Recipe Sync
//!
//! Client for the recipe management REST backend. Binds form inputs to the
//! backend's recipe, logout and registration endpoints and keeps a rendered
//! list in step with the server.
//!
//! # Architecture
//!
//! - Explicit state: the recipe list lives in [`RecipeSync`], not in globals
//! - Injected handles: transport, session storage, inputs, display,
//!   notifier and navigator are all passed in and replaceable in tests
//! - Wholesale refresh: every successful fetch or mutation replaces the
//!   whole list and re-renders
//! - No retries: every failure is reported once and ends the action

pub mod config;
mod error;
pub mod model;
pub mod register;
pub mod session;
pub mod sync;
pub mod transport;
pub mod ui;

pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Operation, Result, TransportError};
pub use model::{Recipe, RecipeDraft, RecipeId, RegisterRequest};
pub use register::Registrar;
pub use session::{FileSession, MemorySession, SessionStore, AUTH_TOKEN_KEY, IS_ADMIN_KEY};
pub use sync::{ClientState, Command, RecipeSync};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, MockTransport, Transport};
pub use ui::{
    DisplayNode, ListContainer, Navigator, Notifier, Page, PageChrome, RecipeInputs,
    RecordingNavigator, RecordingNotifier, RegistrationInputs, TerminalNavigator,
    TerminalNotifier, TextInput,
};
