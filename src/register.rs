// src/register.rs
//! Account registration
//!
//! Validates the registration form and posts the new account. 201 sends
//! the user to the login page, 409 means the username or email is taken.

use crate::error::{Error, Operation, Result};
use crate::model::RegisterRequest;
use crate::sync::surface;
use crate::transport::{ApiRequest, StatusCode, Transport};
use crate::ui::{Navigator, Notifier, Page, RegistrationInputs};
use std::sync::Arc;
use tracing::info;

const REGISTER_PATH: &str = "/register";

/// Registration page controller
pub struct Registrar {
    transport: Arc<dyn Transport>,
    notifier: Box<dyn Notifier>,
    navigator: Box<dyn Navigator>,
}

impl Registrar {
    pub fn new(
        transport: Arc<dyn Transport>,
        notifier: Box<dyn Notifier>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            notifier,
            navigator,
        }
    }

    /// Validate the form and register the account
    ///
    /// The username is trimmed; passwords are compared exactly as typed.
    /// The email field is collected by the form but not sent.
    pub async fn register(&mut self, form: &RegistrationInputs) -> Result<()> {
        let body = match validate(form) {
            Ok(body) => body,
            Err(e) => return Err(surface(self.notifier.as_mut(), e)),
        };
        let username = body.username.clone();

        let result = match ApiRequest::post(REGISTER_PATH).with_json(&body) {
            Ok(request) => self.transport.send(request).await.map_err(|source| {
                Error::Transport {
                    operation: Operation::Register,
                    source,
                }
            }),
            Err(source) => Err(Error::Json {
                operation: Operation::Register,
                source,
            }),
        };

        let outcome = result.and_then(|response| match response.status {
            StatusCode::CREATED => Ok(()),
            StatusCode::CONFLICT => Err(Error::Conflict),
            status => Err(Error::Http {
                operation: Operation::Register,
                status,
            }),
        });

        if let Err(e) = outcome {
            return Err(surface(self.notifier.as_mut(), e));
        }

        info!("Registered user '{}'", username);
        self.navigator.navigate(Page::Login);
        Ok(())
    }
}

fn validate(form: &RegistrationInputs) -> Result<RegisterRequest> {
    let username = form.username.trimmed();
    let password = form.password.value();
    let repeat_password = form.repeat_password.value();

    if username.is_empty() || password.is_empty() || repeat_password.is_empty() {
        return Err(Error::validation("Please fill in all fields."));
    }

    if password != repeat_password {
        return Err(Error::validation("Passwords do not match."));
    }

    Ok(RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
}
