//! Command-line interface definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments; the global flags override configuration
#[derive(Debug, Parser)]
#[command(name = "tracknext-auth")]
#[command(about = "TrackNext authentication client", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

// Field flags default to empty so missing input reaches the validators.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new account
    Signup {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Log in to an existing account
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Show the current user
    Me,
    /// Log out
    Logout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signup() {
        let args = CliArgs::try_parse_from([
            "tracknext-auth",
            "--base-url",
            "http://localhost:9000",
            "signup",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
        ])
        .unwrap();

        assert_eq!(args.base_url.as_deref(), Some("http://localhost:9000"));
        match args.command {
            Command::Signup { name, email, password } => {
                assert_eq!(name, "Ada");
                assert_eq!(email, "ada@example.com");
                assert!(password.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            CliArgs::try_parse_from(["tracknext-auth", "me", "--log-level", "debug"]).unwrap();

        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(matches!(args.command, Command::Me));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["tracknext-auth"]).is_err());
    }
}
