//! Form submission flow
//!
//! Headless version of the signup and login screens' submit handlers:
//! validate the raw input, run the operation, and decide whether the result
//! belongs next to a field or in a blocking alert.

use crate::api::UNEXPECTED_ERROR_MESSAGE;
use crate::auth::models::{AuthData, AuthOutcome, FieldErrors, LoginCredentials, SignupCredentials};
use crate::auth::service::AuthService;
use crate::auth::validators::{validate_email, validate_name, validate_password, ValidationResult};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinError;

pub const SIGNUP_ACCEPTED_MESSAGE: &str = "Account created successfully! Please login.";

const ALERT_TITLE: &str = "Error";

/// Raw input of the signup form
#[derive(Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl SignupForm {
    /// Validate name, email, then password; stop at the first failing field
    pub fn validate(&self) -> Result<SignupCredentials, FieldErrors> {
        first_failure([
            validate_name(&self.name),
            validate_email(&self.email),
            validate_password(&self.password),
        ])?;

        Ok(SignupCredentials {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Raw input of the login form
#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl LoginForm {
    /// Validate email, then password; stop at the first failing field
    pub fn validate(&self) -> Result<LoginCredentials, FieldErrors> {
        first_failure([validate_email(&self.email), validate_password(&self.password)])?;

        Ok(LoginCredentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

fn first_failure<const N: usize>(results: [ValidationResult; N]) -> Result<(), FieldErrors> {
    match results.into_iter().find_map(Result::err) {
        Some(error) => Err(FieldErrors::from([(error.field(), error.to_string())])),
        None => Ok(()),
    }
}

/// What the form should show after a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Local validation failed; nothing was sent
    Invalid(FieldErrors),
    /// Another submission from this form is still in flight
    Busy,
    /// The operation succeeded
    Accepted {
        message: String,
        data: Option<AuthData>,
    },
    /// The server rejected individual fields
    FieldRejected(FieldErrors),
    /// Operation-level failure shown as a blocking alert
    Alert { title: String, message: String },
}

/// Drives submissions and blocks resubmission while one is in flight
#[derive(Debug, Clone)]
pub struct FormSubmitter {
    service: Arc<AuthService>,
    loading: Arc<AtomicBool>,
}

impl FormSubmitter {
    pub fn new(service: Arc<AuthService>) -> Self {
        Self {
            service,
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a submission is currently in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn submit_signup(&self, form: &SignupForm) -> SubmissionOutcome {
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => return SubmissionOutcome::Invalid(errors),
        };

        let Some(_guard) = LoadingGuard::acquire(&self.loading) else {
            return SubmissionOutcome::Busy;
        };

        let service = Arc::clone(&self.service);
        let joined = tokio::spawn(async move { service.register(&credentials).await }).await;

        settle(joined, Some(SIGNUP_ACCEPTED_MESSAGE))
    }

    pub async fn submit_login(&self, form: &LoginForm) -> SubmissionOutcome {
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => return SubmissionOutcome::Invalid(errors),
        };

        let Some(_guard) = LoadingGuard::acquire(&self.loading) else {
            return SubmissionOutcome::Busy;
        };

        let service = Arc::clone(&self.service);
        let joined = tokio::spawn(async move { service.login(&credentials).await }).await;

        settle(joined, None)
    }
}

/// Clears the loading flag when the submission finishes, however it ends
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Map a finished operation onto what the form shows
fn settle(
    joined: Result<AuthOutcome, JoinError>,
    accepted_message: Option<&str>,
) -> SubmissionOutcome {
    let outcome = match joined {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "Submission task did not complete");
            return alert(UNEXPECTED_ERROR_MESSAGE);
        }
    };

    match outcome {
        AuthOutcome::Success { data, message } => SubmissionOutcome::Accepted {
            message: accepted_message
                .map(str::to_string)
                .or(message)
                .unwrap_or_default(),
            data,
        },
        AuthOutcome::Failure { errors, .. } if !errors.is_empty() => {
            SubmissionOutcome::FieldRejected(errors)
        }
        AuthOutcome::Failure { message, .. } => alert(&message),
    }
}

fn alert(message: &str) -> SubmissionOutcome {
    SubmissionOutcome::Alert {
        title: ALERT_TITLE.to_string(),
        message: message.to_string(),
    }
}
