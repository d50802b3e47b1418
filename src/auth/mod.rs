//! Authentication module
//!
//! This module provides authentication functionality including:
//! - Client-side field validation
//! - User registration and login against the API
//! - The uniform outcome shape returned to forms
//! - Form submission with double-submit protection

pub mod form;
pub mod models;
pub mod service;
pub mod validators;

pub use form::{FormSubmitter, LoginForm, SignupForm, SubmissionOutcome};
pub use models::{
    AuthData, AuthOutcome, AuthResponse, Field, FieldErrors, LoginCredentials, SignupCredentials,
    User, UserId,
};
pub use service::AuthService;
pub use validators::{
    validate_email, validate_name, validate_password, ValidationError, ValidationResult,
};
