//! Profile management command implementations

use dbaasctl_core::{Config, Profile};
use serde_json::json;
use tracing::debug;

use crate::cli::{OutputFormat, ProfileCommands};
use crate::connection::ConnectionManager;
use crate::error::{CliError, Result as CliResult};
use crate::output::print_output;

/// Handle profile management commands
pub async fn handle_profile_command(
    command: &ProfileCommands,
    conn_mgr: &ConnectionManager,
    output: OutputFormat,
) -> CliResult<()> {
    use ProfileCommands::*;

    match command {
        List => handle_list(conn_mgr, output),
        Show { name } => handle_show(conn_mgr, name, output),
        Set {
            name,
            api_key,
            api_secret,
            api_url,
            service,
        } => handle_set(conn_mgr, name, api_key, api_secret, api_url, service),
        Remove { name } => handle_remove(conn_mgr, name),
        Default { name } => handle_default(conn_mgr, name),
        Path => handle_path(conn_mgr),
    }
}

/// Profile summary for display; credentials never appear here
fn profile_summary(name: &str, profile: &Profile, is_default: bool) -> serde_json::Value {
    json!({
        "name": name,
        "api_url": profile.api_url,
        "service": profile.service_name,
        "default": is_default,
    })
}

fn handle_list(conn_mgr: &ConnectionManager, output: OutputFormat) -> CliResult<()> {
    debug!("Listing all configured profiles");
    let profiles = conn_mgr.config.list_profiles();

    if profiles.is_empty() && matches!(output, OutputFormat::Auto | OutputFormat::Table) {
        println!("No profiles configured.");
        println!("Create one: dbaasctl profile set <name> --api-key <key> --api-secret <secret>");
        return Ok(());
    }

    let rows: Vec<serde_json::Value> = profiles
        .iter()
        .map(|(name, profile)| {
            let is_default = conn_mgr.config.default_profile.as_deref() == Some(name.as_str());
            profile_summary(name, profile, is_default)
        })
        .collect();
    print_output(&rows, output.into())?;
    Ok(())
}

fn handle_show(conn_mgr: &ConnectionManager, name: &str, output: OutputFormat) -> CliResult<()> {
    let profile = conn_mgr.config.profile(name)?;
    let is_default = conn_mgr.config.default_profile.as_deref() == Some(name);
    print_output(&profile_summary(name, profile, is_default), output.into())?;
    Ok(())
}

fn handle_set(
    conn_mgr: &ConnectionManager,
    name: &str,
    api_key: &str,
    api_secret: &str,
    api_url: &Option<String>,
    service: &Option<String>,
) -> CliResult<()> {
    let mut config = conn_mgr.config.clone();

    let existing = config.profiles.get(name);
    let profile = Profile {
        api_url: api_url
            .clone()
            .or_else(|| existing.map(|p| p.api_url.clone()))
            .unwrap_or_else(|| "https://api.dbaas.cloud/v1".to_string()),
        api_key: api_key.to_string(),
        api_secret: api_secret.to_string(),
        service_name: service
            .clone()
            .or_else(|| existing.and_then(|p| p.service_name.clone())),
    };

    config.set_profile(name.to_string(), profile);
    if config.default_profile.is_none() {
        // The first profile becomes the default
        config.default_profile = Some(name.to_string());
    }

    let updated = ConnectionManager::with_config_path(config, conn_mgr.config_path.clone());
    updated.save_config()?;
    println!("Profile '{}' saved", name);
    Ok(())
}

fn handle_remove(conn_mgr: &ConnectionManager, name: &str) -> CliResult<()> {
    let mut config = conn_mgr.config.clone();
    if config.remove_profile(name).is_none() {
        return Err(CliError::ProfileNotFound {
            name: name.to_string(),
        });
    }

    let updated = ConnectionManager::with_config_path(config, conn_mgr.config_path.clone());
    updated.save_config()?;
    println!("Profile '{}' removed", name);
    Ok(())
}

fn handle_default(conn_mgr: &ConnectionManager, name: &str) -> CliResult<()> {
    let mut config = conn_mgr.config.clone();
    config.profile(name)?;
    config.default_profile = Some(name.to_string());

    let updated = ConnectionManager::with_config_path(config, conn_mgr.config_path.clone());
    updated.save_config()?;
    println!("Default profile set to '{}'", name);
    Ok(())
}

fn handle_path(conn_mgr: &ConnectionManager) -> CliResult<()> {
    if let Some(ref path) = conn_mgr.config_path {
        println!("{}", path.display());
    } else {
        println!("{}", Config::config_path()?.display());
    }
    Ok(())
}
