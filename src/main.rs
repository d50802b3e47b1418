//! TrackNext authentication client - command-line entry point
//!
//! Builds the API client once and hands it down to the authentication
//! service and the form submitter.

use tracknext_auth::auth::{
    AuthOutcome, AuthService, FieldErrors, FormSubmitter, LoginForm, SignupForm,
    SubmissionOutcome,
};
use tracknext_auth::cli::{CliArgs, Command};
use tracknext_auth::{core, ApiClient};

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CliArgs::parse();

    let config = match core::Config::load(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print error to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let _logger = match core::Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!(
        version = tracknext_auth::VERSION,
        base_url = %config.api.base_url,
        "Starting auth client"
    );

    let client = match ApiClient::from_config(&config.api) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error_type = e.error_type(), "Failed to build API client: {}", e);
            return Err(e.into());
        }
    };
    let service = Arc::new(AuthService::new(client));
    let submitter = FormSubmitter::new(Arc::clone(&service));

    let succeeded = match args.command {
        Command::Signup { name, email, password } => {
            let form = SignupForm { name, email, password };
            render_submission(submitter.submit_signup(&form).await)
        }
        Command::Login { email, password } => {
            let form = LoginForm { email, password };
            render_submission(submitter.submit_login(&form).await)
        }
        Command::Me => render_current_user(&service.get_current_user().await)?,
        Command::Logout => {
            service.logout().await;
            println!("Logged out");
            true
        }
    };

    Ok(if succeeded { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn render_submission(outcome: SubmissionOutcome) -> bool {
    match outcome {
        SubmissionOutcome::Accepted { message, data } => {
            println!("{}", message);
            if let Some(data) = data {
                if let Some(user) = &data.user {
                    println!("Signed in as {} <{}>", user.name, user.email);
                }
                if data.token.is_some() {
                    println!("Session token received");
                }
            }
            true
        }
        SubmissionOutcome::Invalid(errors) | SubmissionOutcome::FieldRejected(errors) => {
            render_field_errors(&errors);
            false
        }
        SubmissionOutcome::Alert { title, message } => {
            eprintln!("{}: {}", title, message);
            false
        }
        SubmissionOutcome::Busy => {
            eprintln!("A submission is already in progress");
            false
        }
    }
}

fn render_field_errors(errors: &FieldErrors) {
    for (field, reason) in errors {
        eprintln!("{}: {}", field.label(), reason);
    }
}

fn render_current_user(outcome: &AuthOutcome) -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(outcome.is_success())
}
