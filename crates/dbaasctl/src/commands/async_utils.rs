//! Shared handling for asynchronous operations with --wait flag support
//!
//! Wraps the core wait workflows with progress spinner output and
//! CLI-specific formatting.

use std::time::Duration;

use clap::Args;
use dbaasctl_core::databases::WaitBounds;
use dbaasctl_core::{ProgressCallback, ProgressEvent};
use indicatif::{ProgressBar, ProgressStyle};

/// Common CLI arguments for async operations
#[derive(Args, Debug, Clone)]
pub struct AsyncOperationArgs {
    /// Wait for the operation to complete
    #[arg(long)]
    pub wait: bool,

    /// Maximum time to wait in seconds
    #[arg(long, default_value = "1200", requires = "wait")]
    pub wait_timeout: u64,

    /// Polling interval in seconds
    #[arg(long, default_value = "3", requires = "wait")]
    pub wait_interval: u64,
}

impl AsyncOperationArgs {
    /// Translate the flags into core wait bounds
    pub fn bounds(&self) -> WaitBounds {
        WaitBounds {
            timeout: Duration::from_secs(self.wait_timeout),
            min_interval: Duration::from_secs(self.wait_interval),
            ..WaitBounds::default()
        }
    }
}

/// A progress spinner wired to poll events, shown while waiting
pub struct WaitSpinner {
    bar: ProgressBar,
}

impl WaitSpinner {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed_precise}]")
        {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(message.to_string());
        Self { bar }
    }

    /// Build the callback that keeps the spinner message current
    pub fn callback(&self) -> ProgressCallback {
        let bar = self.bar.clone();
        Box::new(move |event: ProgressEvent| match event {
            ProgressEvent::Started { .. } => {}
            ProgressEvent::Polling { id, status, elapsed } => {
                bar.set_message(format!("{}: {} ({}s elapsed)", id, status, elapsed.as_secs()));
            }
            ProgressEvent::Completed { id, status } => {
                bar.set_message(format!("{}: {}", id, status));
            }
            ProgressEvent::Failed { id, error } => {
                bar.set_message(format!("{}: {}", id, error));
            }
        })
    }

    pub fn finish_and_clear(self) {
        self.bar.finish_and_clear();
    }
}
