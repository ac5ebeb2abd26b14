// ABOUTME: Centralized CLI output utilities for consistent user-facing error messages
// ABOUTME: Classifies failures into usage and runtime errors for the process exit code

use easy8_sdk::Easy8Error;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use thiserror::Error;

use crate::constants::exit_codes;

/// An invocation problem detected by the CLI itself (missing flag, no filter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

impl UsageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Exit code for a failed command: 2 for usage errors, 1 for everything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<UsageError>().is_some() {
        return exit_codes::USAGE_ERROR;
    }
    match err.downcast_ref::<Easy8Error>() {
        Some(sdk_err) if sdk_err.is_usage_error() => exit_codes::USAGE_ERROR,
        _ => exit_codes::RUNTIME_ERROR,
    }
}

/// Centralized CLI output utilities for consistent formatting
pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Create CLI output utility with explicit color setting
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Render an error and its hint, as printed to stderr
    pub fn format_error(&self, err: &anyhow::Error) -> String {
        let label = if self.use_color {
            "error:".red().bold().to_string()
        } else {
            "error:".to_string()
        };
        let mut message = format!("{label} {err:#}");

        if let Some(help) = err.downcast_ref::<Easy8Error>().and_then(Easy8Error::help_text) {
            let help = if self.use_color {
                help.dimmed().to_string()
            } else {
                help.to_string()
            };
            message.push_str(&format!("\n\n{help}"));
        }

        message
    }

    /// Display an error message
    pub fn error(&self, err: &anyhow::Error) {
        eprintln!("{}", self.format_error(err));
    }
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use easy8_sdk::Dimension;

    #[test]
    fn test_cli_output_creation() {
        let cli_color = CliOutput::with_color(true);
        assert!(cli_color.use_color);

        let cli_no_color = CliOutput::with_color(false);
        assert!(!cli_no_color.use_color);
    }

    #[test]
    fn test_api_error_message() {
        let err = anyhow::Error::from(Easy8Error::Api {
            status: 500,
            body: "boom".to_string(),
            url: "https://example.com/issues.json".to_string(),
        });

        let output = CliOutput::with_color(false).format_error(&err);
        assert_eq!(output, "error: API error 500: boom");
    }

    #[test]
    fn test_error_with_help_text() {
        let err = anyhow::Error::from(Easy8Error::MissingApiKey);

        let output = CliOutput::with_color(false).format_error(&err);
        assert!(output.starts_with("error: Missing API key"));
        assert!(output.contains("EASY8_API_KEY"));
    }

    #[test]
    fn test_context_is_kept() {
        let err = Err::<(), _>(std::io::Error::other("denied"))
            .context("Failed to read config file: easy8.toml")
            .unwrap_err();

        let output = CliOutput::with_color(false).format_error(&err);
        assert_eq!(
            output,
            "error: Failed to read config file: easy8.toml: denied"
        );
    }

    #[test]
    fn test_usage_error_message() {
        let err = UsageError::new("--id is required");
        assert_eq!(err.to_string(), "--id is required");

        let wrapped = anyhow::Error::from(err.clone());
        assert_eq!(wrapped.downcast_ref::<UsageError>(), Some(&err));
        assert_eq!(
            CliOutput::with_color(false).format_error(&wrapped),
            "error: --id is required"
        );
    }

    #[test]
    fn test_exit_codes() {
        let usage = anyhow::Error::from(UsageError::new("--subject is required"));
        assert_eq!(exit_code(&usage), 2);

        let not_found = anyhow::Error::from(Easy8Error::NotFound {
            dimension: Dimension::Status,
            name: "Blocked".to_string(),
        });
        assert_eq!(exit_code(&not_found), 2);

        let api = anyhow::Error::from(Easy8Error::Api {
            status: 500,
            body: String::new(),
            url: String::new(),
        });
        assert_eq!(exit_code(&api), 1);

        assert_eq!(exit_code(&anyhow::anyhow!("anything else")), 1);
    }
}
