//! Error types for dbaasctl
//!
//! Structured error types using thiserror, with user-facing suggestions for
//! the common failure modes.

use thiserror::Error;

/// Main error type for the dbaasctl application
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profile configured. Use 'dbaasctl profile set' to configure a profile.")]
    NoProfileConfigured,

    #[error("No cloud project given. Pass --service, set it on the profile, or export DBAAS_SERVICE.")]
    NoServiceName,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

/// Result type for dbaasctl operations
pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            CliError::ProfileNotFound { name } => vec![
                "List available profiles: dbaasctl profile list".to_string(),
                format!("Create profile '{}': dbaasctl profile set {} --api-key <key> --api-secret <secret>", name, name),
            ],
            CliError::NoProfileConfigured => vec![
                "Create a profile: dbaasctl profile set <name> --api-key <key> --api-secret <secret>".to_string(),
                "View profile documentation: dbaasctl profile --help".to_string(),
            ],
            CliError::NoServiceName => vec![
                "Pass the project explicitly: dbaasctl database list --service <project> --engine <engine>".to_string(),
                "Store it on the profile: dbaasctl profile set <name> --service <project> ...".to_string(),
            ],
            CliError::AuthenticationFailed { .. } => vec![
                "Check your credentials: dbaasctl profile show <profile>".to_string(),
                "Verify the API key and secret are correct".to_string(),
                "Ensure the API endpoint URL is correct".to_string(),
            ],
            CliError::NotFound { .. } => vec![
                "Verify the resource id is correct".to_string(),
                "List available resources to find the correct id".to_string(),
                "Check that you're using the correct profile and project".to_string(),
            ],
            CliError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the API URL is correct: dbaasctl profile show <profile>".to_string(),
            ],
            CliError::Timeout { .. } => vec![
                "Increase the wait budget: --wait-timeout <seconds>".to_string(),
                "Check the cluster status manually: dbaasctl database get <id>".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Format the error with its suggestions for terminal display
    pub fn display_with_suggestions(&self) -> String {
        let mut out = format!("Error: {}", self);
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\n\nSuggestions:");
            for suggestion in suggestions {
                out.push_str(&format!("\n  - {}", suggestion));
            }
        }
        out
    }
}

impl From<dbaasctl_core::CoreError> for CliError {
    fn from(err: dbaasctl_core::CoreError) -> Self {
        use dbaasctl_core::CoreError;
        match err {
            CoreError::NotFound(path) => CliError::NotFound {
                message: format!("resource at {} does not exist", path),
            },
            CoreError::AuthenticationFailed(message) => {
                CliError::AuthenticationFailed { message }
            }
            CoreError::PollTimeout { id, timeout } => CliError::Timeout {
                message: format!(
                    "resource {} did not reach its target status within {} seconds",
                    id,
                    timeout.as_secs()
                ),
            },
            CoreError::Connection(message) => CliError::ConnectionError { message },
            CoreError::Config(message) => CliError::Configuration(message),
            _ => CliError::ApiError {
                message: err.to_string(),
            },
        }
    }
}

impl From<dbaasctl_core::ConfigError> for CliError {
    fn from(err: dbaasctl_core::ConfigError) -> Self {
        match err {
            dbaasctl_core::ConfigError::ProfileNotFound { name } => {
                CliError::ProfileNotFound { name }
            }
            dbaasctl_core::ConfigError::NoProfiles { .. } => CliError::NoProfileConfigured,
            _ => CliError::Configuration(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timeout_maps_from_core() {
        let core = dbaasctl_core::CoreError::PollTimeout {
            id: "c1".into(),
            timeout: Duration::from_secs(120),
        };
        let cli = CliError::from(core);
        assert!(matches!(cli, CliError::Timeout { .. }));
        assert!(cli.to_string().contains("120"));
    }

    #[test]
    fn test_suggestions_mention_profile_commands() {
        let err = CliError::NoProfileConfigured;
        let display = err.display_with_suggestions();
        assert!(display.contains("dbaasctl profile set"));
    }
}
