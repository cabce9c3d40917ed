use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use dbaasctl_core::Config;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::CliError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    // Load configuration from specified path or default location
    let (config, config_path) = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        let config = Config::load_from_path(&path)?;
        (config, Some(path))
    } else {
        debug!("Loading config from default location");
        (Config::load()?, None)
    };
    let conn_mgr = ConnectionManager::with_config_path(config, config_path);

    if let Err(e) = execute_command(&cli, &conn_mgr).await {
        eprintln!("{}", e.display_with_suggestions());
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over the verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "dbaasctl=warn,dbaasctl_core=warn",
            1 => "dbaasctl=info,dbaasctl_core=info",
            2 => "dbaasctl=debug,dbaasctl_core=debug",
            _ => "dbaasctl=trace,dbaasctl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &ConnectionManager) -> Result<(), CliError> {
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            match cli.output {
                cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    output::print_output(output_data, cli.output.into())?;
                }
                _ => {
                    println!("dbaasctl {}", env!("CARGO_PKG_VERSION"));
                }
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }
        Commands::Profile { command } => {
            commands::profile::handle_profile_command(command, conn_mgr, cli.output).await
        }
        Commands::Database { command } => {
            commands::database::handle_database_command(
                command,
                conn_mgr,
                cli.profile.as_deref(),
                cli.output,
            )
            .await
        }
        Commands::User { command } => {
            commands::user::handle_user_command(
                command,
                conn_mgr,
                cli.profile.as_deref(),
                cli.output,
            )
            .await
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Generate shell completions
fn generate_completions(shell: cli::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without sensitive data)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Profile { command } => {
            use cli::ProfileCommands::*;
            match command {
                List => "profile list".to_string(),
                Path => "profile path".to_string(),
                Show { name } => format!("profile show {}", name),
                Set { name, .. } => format!("profile set {} [credentials redacted]", name),
                Remove { name } => format!("profile remove {}", name),
                Default { name } => format!("profile default {}", name),
            }
        }
        Commands::Database { command } => {
            use cli::DatabaseCommands::*;
            match command {
                List { scope } => format!("database list --engine {}", scope.engine),
                Get { scope, id } => format!("database get --engine {} {}", scope.engine, id),
                Create { scope, .. } => format!("database create --engine {}", scope.engine),
                Update { scope, id, .. } => {
                    format!("database update --engine {} {}", scope.engine, id)
                }
                Delete { scope, id, .. } => {
                    format!("database delete --engine {} {}", scope.engine, id)
                }
            }
        }
        Commands::User { command } => {
            use cli::UserCommands::*;
            match command {
                List { cluster, .. } => format!("user list --cluster {}", cluster),
                Get { cluster, id, .. } => format!("user get --cluster {} {}", cluster, id),
                Create { cluster, name, .. } => {
                    format!("user create --cluster {} {}", cluster, name)
                }
                Update { cluster, id, .. } => format!("user update --cluster {} {}", cluster, id),
                Delete { cluster, id, .. } => format!("user delete --cluster {} {}", cluster, id),
            }
        }
    }
}
