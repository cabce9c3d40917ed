//! # dbaasctl-core
//!
//! Core library behind the `dbaasctl` CLI: the Cloud Databases API client,
//! the state poller used after every asynchronous mutation, wait-for-state
//! workflows, and the profile/configuration subsystem.
//!
//! ## Layers
//!
//! - [`client`] — authenticated REST client ([`CloudClient`])
//! - [`databases`] — typed models, per-resource handlers, and `*_and_wait`
//!   workflows for service clusters and their users
//! - [`poll`] — the generic poll-until-target-status loop
//! - [`config`] — TOML profiles and config file handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use dbaasctl_core::{CloudClient, databases};
//! use dbaasctl_core::databases::{ServiceCreateRequest, WaitBounds};
//!
//! let client = CloudClient::builder()
//!     .base_url("https://api.dbaas.cloud/v1")
//!     .api_key(key)
//!     .api_secret(secret)
//!     .build()?;
//!
//! let request = ServiceCreateRequest {
//!     plan: "essential".into(),
//!     version: "7.2".into(),
//!     ..Default::default()
//! };
//! let service = databases::create_service_and_wait(
//!     &client, "my-project", "redis", &request, WaitBounds::default(), None,
//! )
//! .await?;
//! println!("cluster {} is {}", service.id, service.status);
//! ```

pub mod client;
pub mod config;
pub mod databases;
pub mod error;
pub mod poll;

pub use client::CloudClient;
pub use config::{Config, ConfigError, Profile};
pub use error::{CoreError, Result};
pub use poll::{DELETED, PollOptions, ProgressCallback, ProgressEvent, StatusSource, poll_status};
