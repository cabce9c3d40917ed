//! Command line interface definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::async_utils::AsyncOperationArgs;

#[derive(Parser, Debug)]
#[command(name = "dbaasctl")]
#[command(about = "Manage cloud database service clusters and their users")]
#[command(version)]
pub struct Cli {
    /// Profile to use from the config file
    #[arg(short, long, global = true, env = "DBAASCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to config file (defaults to platform config directory)
    #[arg(long, global = true)]
    pub config_file: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-friendly tables, JSON where a table makes no sense
    #[default]
    Auto,
    Json,
    Yaml,
    Table,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage database service clusters
    #[command(visible_alias = "db")]
    Database {
        #[command(subcommand)]
        command: DatabaseCommands,
    },

    /// Manage service users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage configuration profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Show version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments shared by every command that addresses a project + engine
#[derive(clap::Args, Debug, Clone)]
pub struct ScopeArgs {
    /// Cloud project the clusters belong to (falls back to the profile's
    /// service_name, then the DBAAS_SERVICE environment variable)
    #[arg(long)]
    pub service: Option<String>,

    /// Database engine (e.g. redis, postgresql, mysql)
    #[arg(long, short)]
    pub engine: String,
}

#[derive(Subcommand, Debug)]
pub enum DatabaseCommands {
    /// List cluster ids for one engine
    List {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Show one cluster
    Get {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Cluster id
        id: String,
    },

    /// Create a cluster
    Create {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Service plan (e.g. essential, business)
        #[arg(long)]
        plan: String,

        /// Engine version (e.g. 7.2)
        #[arg(long)]
        version: String,

        /// Human-readable description
        #[arg(long)]
        description: Option<String>,

        /// Node flavor
        #[arg(long, requires = "region", requires = "nodes")]
        flavor: Option<String>,

        /// Region to place nodes in
        #[arg(long, requires = "flavor")]
        region: Option<String>,

        /// Number of nodes
        #[arg(long, requires = "flavor")]
        nodes: Option<u32>,

        /// Private network id to attach the cluster to
        #[arg(long)]
        network_id: Option<String>,

        /// Subnet id within the private network
        #[arg(long, requires = "network_id")]
        subnet_id: Option<String>,

        #[command(flatten)]
        async_ops: AsyncOperationArgs,
    },

    /// Update a cluster
    Update {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Cluster id
        id: String,

        /// New service plan
        #[arg(long)]
        plan: Option<String>,

        /// New engine version
        #[arg(long)]
        version: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Node flavor
        #[arg(long, requires = "region", requires = "nodes")]
        flavor: Option<String>,

        /// Region to place nodes in
        #[arg(long, requires = "flavor")]
        region: Option<String>,

        /// Number of nodes
        #[arg(long, requires = "flavor")]
        nodes: Option<u32>,

        #[command(flatten)]
        async_ops: AsyncOperationArgs,
    },

    /// Delete a cluster
    Delete {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Cluster id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        #[command(flatten)]
        async_ops: AsyncOperationArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users of a cluster
    List {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Cluster id
        #[arg(long)]
        cluster: String,
    },

    /// Show one user
    Get {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Cluster id
        #[arg(long)]
        cluster: String,

        /// User id
        id: String,
    },

    /// Create a user
    Create {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Cluster id
        #[arg(long)]
        cluster: String,

        /// User name
        name: String,

        /// ACL command categories (redis engines only)
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<String>>,

        /// ACL commands (redis engines only)
        #[arg(long, value_delimiter = ',')]
        commands: Option<Vec<String>>,

        /// ACL key patterns (redis engines only)
        #[arg(long, value_delimiter = ',')]
        keys: Option<Vec<String>>,

        /// ACL pub/sub channel patterns (redis engines only)
        #[arg(long, value_delimiter = ',')]
        channels: Option<Vec<String>>,

        #[command(flatten)]
        async_ops: AsyncOperationArgs,
    },

    /// Update a user's ACLs
    Update {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Cluster id
        #[arg(long)]
        cluster: String,

        /// User id
        id: String,

        /// ACL command categories (redis engines only)
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<String>>,

        /// ACL commands (redis engines only)
        #[arg(long, value_delimiter = ',')]
        commands: Option<Vec<String>>,

        /// ACL key patterns (redis engines only)
        #[arg(long, value_delimiter = ',')]
        keys: Option<Vec<String>>,

        /// ACL pub/sub channel patterns (redis engines only)
        #[arg(long, value_delimiter = ',')]
        channels: Option<Vec<String>>,

        #[command(flatten)]
        async_ops: AsyncOperationArgs,
    },

    /// Delete a user
    Delete {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Cluster id
        #[arg(long)]
        cluster: String,

        /// User id
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        #[command(flatten)]
        async_ops: AsyncOperationArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List configured profiles
    List,

    /// Show one profile (credentials redacted)
    Show {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,

        /// API key
        #[arg(long)]
        api_key: String,

        /// API secret
        #[arg(long)]
        api_secret: String,

        /// API base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Default cloud project for this profile
        #[arg(long)]
        service: Option<String>,
    },

    /// Remove a profile
    Remove {
        /// Profile name
        name: String,
    },

    /// Set the default profile
    Default {
        /// Profile name
        name: String,
    },

    /// Print the config file path
    Path,
}
