// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use recipe_sync::transport::StatusCode;
use recipe_sync::{
    MemorySession, MockTransport, RecipeSync, RecordingNavigator, RecordingNotifier,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// A sync module wired to recording doubles.
///
/// The mock, notifier and navigator are clones sharing state with the ones
/// owned by `sync`, so tests can script and inspect them.
pub struct Harness {
    pub sync: RecipeSync,
    pub mock: MockTransport,
    pub alerts: RecordingNotifier,
    pub navigator: RecordingNavigator,
}

pub fn harness_with(session: MemorySession) -> Harness {
    let mock = MockTransport::new();
    let alerts = RecordingNotifier::new();
    let navigator = RecordingNavigator::new();

    let sync = RecipeSync::new(
        Arc::new(mock.clone()),
        Box::new(session),
        Box::new(alerts.clone()),
        Box::new(navigator.clone()),
    );

    Harness {
        sync,
        mock,
        alerts,
        navigator,
    }
}

/// Harness with a logged-in session holding token `tok-123`
pub fn harness() -> Harness {
    harness_with(MemorySession::with_token("tok-123"))
}

pub fn soup() -> Value {
    json!([{"id": 1, "name": "Soup", "instructions": "Boil"}])
}

pub fn soup_and_pie() -> Value {
    json!([
        {"id": 1, "name": "Soup", "instructions": "Boil"},
        {"id": 2, "name": "Pie", "instructions": "Bake"}
    ])
}

/// Load the harness with `body` as the current backend list
pub async fn seed(h: &mut Harness, body: Value) {
    h.mock.push_json(StatusCode::OK, body);
    h.sync.list(None).await.unwrap();
}
