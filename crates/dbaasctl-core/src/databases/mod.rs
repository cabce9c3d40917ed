//! Database service clusters and their users
//!
//! Handlers issue single REST calls; workflows compose a mutating call with
//! the state poller for `--wait` semantics.

pub mod service;
pub mod types;
pub mod user;
pub mod workflows;

pub use service::ServiceHandler;
pub use types::*;
pub use user::UserHandler;
pub use workflows::*;
