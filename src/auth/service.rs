//! Authentication operations
//!
//! `AuthService` sits on top of an injected [`ApiClient`] and folds every
//! normalized API result into an [`AuthOutcome`]. None of its operations can
//! fail: errors come back as `AuthOutcome::Failure`.

use crate::api::{ApiClient, ApiError};
use crate::auth::models::{
    known_field_errors, AuthData, AuthOutcome, AuthResponse, LoginCredentials, SignupCredentials,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const CURRENT_USER_PATH: &str = "/auth/me";

const CURRENT_USER_FAILED: &str = "Failed to get user";

/// Credential-submitting operations and their user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Register,
    Login,
}

impl Operation {
    fn path(self) -> &'static str {
        match self {
            Operation::Register => REGISTER_PATH,
            Operation::Login => LOGIN_PATH,
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            Operation::Register => "Registration successful",
            Operation::Login => "Login successful",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Operation::Register => "Registration failed",
            Operation::Login => "Login failed",
        }
    }
}

/// Register, login and session placeholders over a shared API client
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Register a new user. Credentials are expected to be validated already.
    pub async fn register(&self, credentials: &SignupCredentials) -> AuthOutcome {
        tracing::info!(email = %credentials.email, "User registration attempt");
        self.submit(Operation::Register, credentials).await
    }

    /// Log in an existing user. Credentials are expected to be validated already.
    pub async fn login(&self, credentials: &LoginCredentials) -> AuthOutcome {
        tracing::info!(email = %credentials.email, "Login attempt");
        self.submit(Operation::Login, credentials).await
    }

    /// Placeholder until tokens are stored client-side
    pub async fn logout(&self) {
        tracing::info!("Logout called");
    }

    /// Placeholder: returns the server's outcome-shaped payload for `/auth/me`
    pub async fn get_current_user(&self) -> AuthOutcome {
        match self.client.get::<AuthResponse>(CURRENT_USER_PATH, None).await {
            Ok(response) => AuthOutcome::from_response(response, CURRENT_USER_FAILED),
            Err(error) => {
                tracing::info!(
                    error_type = error.error_type(),
                    status = error.status_code(),
                    "Failed to get current user"
                );
                AuthOutcome::failure(
                    Some(error.message()),
                    CURRENT_USER_FAILED,
                    Default::default(),
                )
            }
        }
    }

    async fn submit<B: Serialize>(&self, operation: Operation, body: &B) -> AuthOutcome {
        let result = self
            .client
            .post::<Value, B>(operation.path(), Some(body), None)
            .await;

        match result {
            Ok(body) => {
                tracing::info!(operation = ?operation, "Authentication succeeded");
                AuthOutcome::success(AuthData::from_body(&body), operation.success_message())
            }
            Err(error) => fold_error(operation, &error),
        }
    }
}

fn fold_error(operation: Operation, error: &ApiError) -> AuthOutcome {
    tracing::warn!(
        operation = ?operation,
        error_type = error.error_type(),
        status = error.status_code(),
        message = %error.message(),
        "Authentication failed"
    );

    let errors = error
        .field_errors()
        .map(known_field_errors)
        .unwrap_or_default();

    AuthOutcome::failure(Some(error.message()), operation.failure_message(), errors)
}
