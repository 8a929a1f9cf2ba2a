// tests/registration.rs

//! Registration form submission against a scripted backend.

use recipe_sync::transport::{Method, StatusCode};
use recipe_sync::{
    Error, ErrorKind, MockTransport, Operation, Page, RecordingNavigator, RecordingNotifier,
    Registrar, RegistrationInputs, TextInput,
};
use serde_json::json;
use std::sync::Arc;

struct Fixture {
    registrar: Registrar,
    mock: MockTransport,
    alerts: RecordingNotifier,
    navigator: RecordingNavigator,
}

fn fixture() -> Fixture {
    let mock = MockTransport::new();
    let alerts = RecordingNotifier::new();
    let navigator = RecordingNavigator::new();
    let registrar = Registrar::new(
        Arc::new(mock.clone()),
        Box::new(alerts.clone()),
        Box::new(navigator.clone()),
    );
    Fixture {
        registrar,
        mock,
        alerts,
        navigator,
    }
}

fn form(username: &str, password: &str, repeat: &str) -> RegistrationInputs {
    RegistrationInputs {
        username: TextInput::new(username),
        email: TextInput::new("cook@example.com"),
        password: TextInput::new(password),
        repeat_password: TextInput::new(repeat),
    }
}

#[tokio::test]
async fn test_register_201_navigates_to_login() {
    let mut f = fixture();
    f.mock.push_status(StatusCode::CREATED);

    f.registrar
        .register(&form(" cook ", "secret", "secret"))
        .await
        .unwrap();

    let requests = f.mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].path, "/register");
    assert!(requests[0].bearer.is_none());
    assert_eq!(
        requests[0].body,
        Some(json!({"username": "cook", "password": "secret"}))
    );
    assert_eq!(f.navigator.visited(), vec![Page::Login]);
    assert!(f.alerts.alerts().is_empty());
}

#[tokio::test]
async fn test_register_409_is_conflict() {
    let mut f = fixture();
    f.mock.push_status(StatusCode::CONFLICT);

    let err = f
        .registrar
        .register(&form("cook", "secret", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Conflict));
    assert_eq!(f.alerts.alerts(), vec!["Username or email already exists."]);
    assert!(f.navigator.visited().is_empty());
}

#[tokio::test]
async fn test_register_other_status_is_generic_failure() {
    let mut f = fixture();
    f.mock.push_status(StatusCode::OK);
    f.mock.push_status(StatusCode::INTERNAL_SERVER_ERROR);

    let first = f
        .registrar
        .register(&form("cook", "secret", "secret"))
        .await
        .unwrap_err();
    let second = f
        .registrar
        .register(&form("cook", "secret", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(
        first,
        Error::Http {
            operation: Operation::Register,
            ..
        }
    ));
    assert_eq!(second.kind(), ErrorKind::Http);
    assert_eq!(
        f.alerts.alerts(),
        vec![
            "Registration failed. Please try again.",
            "Registration failed. Please try again."
        ]
    );
    assert!(f.navigator.visited().is_empty());
}

#[tokio::test]
async fn test_register_transport_failure() {
    let mut f = fixture();
    f.mock.push_failure("connection refused");

    let err = f
        .registrar
        .register(&form("cook", "secret", "secret"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(
        f.alerts.alerts(),
        vec!["An unexpected error occurred during registration."]
    );
}

#[tokio::test]
async fn test_register_invalid_form_sends_nothing() {
    let mut f = fixture();

    f.registrar.register(&form("", "pw", "pw")).await.unwrap_err();
    f.registrar
        .register(&form("cook", "pw", "wp"))
        .await
        .unwrap_err();

    assert_eq!(f.mock.request_count(), 0);
    assert_eq!(
        f.alerts.alerts(),
        vec!["Please fill in all fields.", "Passwords do not match."]
    );
}
