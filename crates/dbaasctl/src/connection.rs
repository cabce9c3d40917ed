//! Connection management for authenticated API clients

use anyhow::Context;
use dbaasctl_core::{CloudClient, Config};
use tracing::{debug, info, trace};

use crate::error::{CliError, Result as CliResult};

/// User agent string for dbaasctl HTTP requests
const DBAASCTL_USER_AGENT: &str = concat!("dbaasctl/", env!("CARGO_PKG_VERSION"));

const DEFAULT_API_URL: &str = "https://api.dbaas.cloud/v1";

/// Connection manager for creating authenticated clients
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<std::path::PathBuf>,
}

impl ConnectionManager {
    /// Create a new connection manager with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// Create a new connection manager with a custom config path
    pub fn with_config_path(config: Config, config_path: Option<std::path::PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Save the configuration to the appropriate location
    pub fn save_config(&self) -> CliResult<()> {
        if let Some(ref path) = self.config_path {
            self.config
                .save_to_path(path)
                .context("Failed to save configuration")?;
        } else {
            self.config.save().context("Failed to save configuration")?;
        }
        Ok(())
    }

    /// Create an API client from profile credentials with environment
    /// variable override support.
    ///
    /// When --config-file is explicitly specified, environment variables are
    /// ignored so that test runs against an isolated config see only that
    /// config. Otherwise the precedence is env vars > profile values.
    pub fn create_client(&self, profile_name: Option<&str>) -> CliResult<CloudClient> {
        debug!("Creating API client");
        trace!("Profile name: {:?}", profile_name);

        let use_env_vars = self.config_path.is_none();
        if !use_env_vars {
            info!("--config-file specified explicitly, ignoring environment variables");
        }

        let env_api_key = if use_env_vars {
            std::env::var("DBAAS_API_KEY").ok()
        } else {
            None
        };
        let env_api_secret = if use_env_vars {
            std::env::var("DBAAS_API_SECRET").ok()
        } else {
            None
        };
        let env_api_url = if use_env_vars {
            std::env::var("DBAAS_API_URL").ok()
        } else {
            None
        };

        let (api_key, api_secret, api_url) =
            if let (Some(key), Some(secret)) = (&env_api_key, &env_api_secret) {
                info!("Using API credentials from environment variables");
                let url = env_api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
                (key.clone(), secret.clone(), url)
            } else {
                let resolved = self.config.resolve_profile(profile_name)?;
                info!("Using profile: {}", resolved);
                let profile = self.config.profile(&resolved)?;

                // Partial env overrides still apply on top of the profile
                let key = env_api_key.unwrap_or_else(|| profile.api_key.clone());
                let secret = env_api_secret.unwrap_or_else(|| profile.api_secret.clone());
                let url = env_api_url.unwrap_or_else(|| profile.api_url.clone());
                (key, secret, url)
            };

        info!("Connecting to API: {}", api_url);
        // Truncate on char boundaries; keys are user input and may be non-ASCII
        trace!("API key: {}...", api_key.chars().take(8).collect::<String>());

        let client = CloudClient::builder()
            .base_url(api_url)
            .api_key(api_key)
            .api_secret(api_secret)
            .user_agent(DBAASCTL_USER_AGENT)
            .build()?;

        debug!("API client created successfully");
        Ok(client)
    }

    /// Resolve the cloud project to operate on.
    ///
    /// Precedence: --service flag, then the profile's service_name, then the
    /// DBAAS_SERVICE environment variable.
    pub fn resolve_service_name(
        &self,
        explicit: Option<&str>,
        profile_name: Option<&str>,
    ) -> CliResult<String> {
        if let Some(service) = explicit {
            return Ok(service.to_string());
        }

        if let Ok(resolved) = self.config.resolve_profile(profile_name) {
            if let Ok(profile) = self.config.profile(&resolved) {
                if let Some(ref service) = profile.service_name {
                    debug!("Using project from profile {}: {}", resolved, service);
                    return Ok(service.clone());
                }
            }
        }

        if self.config_path.is_none() {
            if let Ok(service) = std::env::var("DBAAS_SERVICE") {
                debug!("Using project from DBAAS_SERVICE: {}", service);
                return Ok(service);
            }
        }

        Err(CliError::NoServiceName)
    }
}
