//! Status polling for asynchronous Cloud Databases operations
//!
//! Create, update and delete calls return immediately while the remote
//! service converges in the background. This module provides the single
//! generic poll-until-target loop used by every workflow, with optional
//! progress callbacks for UI updates.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{CoreError, Result};

/// Synthetic status used as the target when confirming a deletion.
///
/// The API never reports it; a deleted resource answers 404 instead, which
/// the poller translates into this status.
pub const DELETED: &str = "DELETED";

/// Anything the poller can fetch: an object that carries a status string.
///
/// Status values are owned entirely by the remote service; this trait only
/// exposes them, it does not enumerate them.
pub trait StatusSource {
    fn status(&self) -> &str;
}

/// Progress events emitted while waiting for a state transition
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Polling has begun for a resource
    Started { id: String },
    /// One poll iteration with the currently reported status
    Polling {
        id: String,
        status: String,
        elapsed: Duration,
    },
    /// The resource reached a target status
    Completed { id: String, status: String },
    /// Polling aborted
    Failed { id: String, error: String },
}

/// Callback type for progress updates
///
/// The CLI uses this to drive spinners; library callers typically pass `None`.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Timing and status-set parameters for one polling run
#[derive(Debug, Clone, Copy)]
pub struct PollOptions<'a> {
    /// Statuses that mean "still in progress"
    pub pending: &'a [&'a str],
    /// Statuses that mean "operation complete"
    pub target: &'a [&'a str],
    /// Total time budget; polling aborts once it is exceeded
    pub timeout: Duration,
    /// Wait before the first poll
    pub delay: Duration,
    /// Minimum time between consecutive polls
    pub min_interval: Duration,
}

impl<'a> PollOptions<'a> {
    /// Options with the service's default wait bounds (20 min total,
    /// 5 s before the first poll, 3 s between polls).
    #[must_use]
    pub fn new(pending: &'a [&'a str], target: &'a [&'a str]) -> Self {
        Self {
            pending,
            target,
            timeout: Duration::from_secs(20 * 60),
            delay: Duration::from_secs(5),
            min_interval: Duration::from_secs(3),
        }
    }

    /// Override the total timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the initial delay
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Override the minimum poll interval
    #[must_use]
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }
}

fn contains(set: &[&str], status: &str) -> bool {
    set.iter().any(|s| s.eq_ignore_ascii_case(status))
}

fn emit(callback: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}

/// Poll a resource until it reaches a target status.
///
/// `fetch` is invoked once per iteration and must return the current state
/// of the resource identified by `id`. The loop:
///
/// - waits `opts.delay`, then polls at least `opts.min_interval` apart;
/// - returns `Ok(Some(state))` once the reported status is in `opts.target`;
/// - returns `Ok(None)` if `fetch` fails with a not-found error while
///   [`DELETED`] is in the target set (delete confirmation);
/// - aborts on any other fetch error without retrying;
/// - aborts with [`CoreError::UnexpectedStatus`] on a status in neither set;
/// - aborts with [`CoreError::PollTimeout`] once `opts.timeout` has elapsed.
///
/// # Example
///
/// ```rust,ignore
/// let opts = PollOptions::new(&["PENDING", "CREATING"], &["READY"]);
/// let service = poll_status(&id, &opts, || handler.get(&service_name, "redis", &id), None)
///     .await?
///     .expect("ready polling always yields a final object");
/// ```
pub async fn poll_status<T, F, Fut>(
    id: &str,
    opts: &PollOptions<'_>,
    mut fetch: F,
    on_progress: Option<ProgressCallback>,
) -> Result<Option<T>>
where
    T: StatusSource,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let deleting = contains(opts.target, DELETED);

    emit(
        &on_progress,
        ProgressEvent::Started { id: id.to_string() },
    );

    tokio::time::sleep(opts.delay).await;

    loop {
        let elapsed = start.elapsed();
        if elapsed > opts.timeout {
            emit(
                &on_progress,
                ProgressEvent::Failed {
                    id: id.to_string(),
                    error: format!("timed out after {:?}", opts.timeout),
                },
            );
            return Err(CoreError::PollTimeout {
                id: id.to_string(),
                timeout: opts.timeout,
            });
        }

        let state = match fetch().await {
            Ok(state) => state,
            Err(err) if err.is_not_found() && deleting => {
                emit(
                    &on_progress,
                    ProgressEvent::Completed {
                        id: id.to_string(),
                        status: DELETED.to_string(),
                    },
                );
                return Ok(None);
            }
            // Transport and API errors are fatal; the poll loop is not a
            // retry mechanism.
            Err(err) => {
                emit(
                    &on_progress,
                    ProgressEvent::Failed {
                        id: id.to_string(),
                        error: err.to_string(),
                    },
                );
                return Err(err);
            }
        };

        let status = state.status().to_string();
        emit(
            &on_progress,
            ProgressEvent::Polling {
                id: id.to_string(),
                status: status.clone(),
                elapsed,
            },
        );

        if contains(opts.target, &status) {
            emit(
                &on_progress,
                ProgressEvent::Completed {
                    id: id.to_string(),
                    status,
                },
            );
            return Ok(Some(state));
        }

        if !contains(opts.pending, &status) {
            emit(
                &on_progress,
                ProgressEvent::Failed {
                    id: id.to_string(),
                    error: format!("unexpected status {:?}", status),
                },
            );
            return Err(CoreError::UnexpectedStatus {
                id: id.to_string(),
                status,
            });
        }

        tokio::time::sleep(opts.min_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct State {
        status: String,
    }

    impl State {
        fn new(status: &str) -> Self {
            Self {
                status: status.to_string(),
            }
        }
    }

    impl StatusSource for State {
        fn status(&self) -> &str {
            &self.status
        }
    }

    /// Fetch function that replays a scripted sequence of results.
    /// Once the script is exhausted, the last entry repeats.
    struct Script {
        steps: Arc<Mutex<VecDeque<Result<State>>>>,
        last: State,
        calls: Arc<AtomicUsize>,
    }

    impl Script {
        fn new(steps: Vec<Result<State>>) -> Self {
            Self {
                steps: Arc::new(Mutex::new(steps.into())),
                last: State::new("PENDING"),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn fetch(&self) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<State>>>> {
            let steps = Arc::clone(&self.steps);
            let calls = Arc::clone(&self.calls);
            let fallback = self.last.clone();
            move || {
                let steps = Arc::clone(&steps);
                let calls = Arc::clone(&calls);
                let fallback = fallback.clone();
                Box::pin(async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    steps
                        .lock()
                        .unwrap()
                        .pop_front()
                        .unwrap_or(Ok(fallback))
                })
            }
        }
    }

    fn fast(pending: &'static [&'static str], target: &'static [&'static str]) -> PollOptions<'static> {
        PollOptions::new(pending, target)
            .with_timeout(Duration::from_millis(200))
            .with_delay(Duration::from_millis(1))
            .with_min_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn reaches_target_on_third_poll() {
        let script = Script::new(vec![
            Ok(State::new("CREATING")),
            Ok(State::new("CREATING")),
            Ok(State::new("READY")),
        ]);
        let opts = fast(&["PENDING", "CREATING"], &["READY"]);

        let result = poll_status("db-1", &opts, script.fetch(), None).await.unwrap();
        assert_eq!(result, Some(State::new("READY")));
        assert_eq!(script.calls(), 3);
    }

    #[tokio::test]
    async fn status_comparison_is_case_insensitive() {
        let script = Script::new(vec![Ok(State::new("ready"))]);
        let opts = fast(&["PENDING"], &["READY"]);

        let result = poll_status("db-1", &opts, script.fetch(), None).await.unwrap();
        assert_eq!(result, Some(State::new("ready")));
    }

    #[tokio::test]
    async fn stays_pending_until_timeout() {
        let script = Script::new(vec![]);
        let opts = fast(&["PENDING"], &["READY"])
            .with_timeout(Duration::from_millis(40))
            .with_min_interval(Duration::from_millis(10));

        let err = poll_status("db-1", &opts, script.fetch(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::PollTimeout { .. }));
        assert!(err.to_string().contains("db-1"));
        // Never more than ceil(timeout / min_interval) + 1 attempts.
        assert!(script.calls() <= 40 / 10 + 1, "polled {} times", script.calls());
    }

    #[tokio::test]
    async fn delay_longer_than_timeout_polls_zero_times() {
        let script = Script::new(vec![]);
        let opts = fast(&["PENDING"], &["READY"])
            .with_timeout(Duration::from_millis(5))
            .with_delay(Duration::from_millis(20));

        let err = poll_status("db-1", &opts, script.fetch(), None)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(script.calls(), 0);
    }

    #[tokio::test]
    async fn not_found_counts_as_deleted_when_targeted() {
        let script = Script::new(vec![
            Ok(State::new("DELETING")),
            Err(CoreError::NotFound("/db/abc".into())),
        ]);
        let opts = fast(&["DELETING"], &[DELETED]);

        let result = poll_status("db-1", &opts, script.fetch(), None).await.unwrap();
        assert_eq!(result, None);
        assert_eq!(script.calls(), 2);
    }

    #[tokio::test]
    async fn not_found_is_fatal_when_not_waiting_for_deletion() {
        let script = Script::new(vec![Err(CoreError::NotFound("/db/abc".into()))]);
        let opts = fast(&["PENDING"], &["READY"]);

        let err = poll_status("db-1", &opts, script.fetch(), None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test]
    async fn fetch_error_aborts_without_retry() {
        let script = Script::new(vec![Err(CoreError::Api {
            status: 500,
            message: "boom".into(),
        })]);
        let opts = fast(&["PENDING"], &["READY"]);

        let err = poll_status("db-1", &opts, script.fetch(), None)
            .await
            .unwrap_err();
        assert!(err.is_server_error());
        // Exactly one fetch: the failing call itself, nothing after.
        assert_eq!(script.calls(), 1);
    }

    #[tokio::test]
    async fn unexpected_status_aborts() {
        let script = Script::new(vec![Ok(State::new("CREATING")), Ok(State::new("ERROR"))]);
        let opts = fast(&["PENDING", "CREATING"], &["READY"]);

        let err = poll_status("db-1", &opts, script.fetch(), None)
            .await
            .unwrap_err();
        match err {
            CoreError::UnexpectedStatus { id, status } => {
                assert_eq!(id, "db-1");
                assert_eq!(status, "ERROR");
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
        assert_eq!(script.calls(), 2);
    }

    #[tokio::test]
    async fn emits_progress_events_in_order() {
        let script = Script::new(vec![Ok(State::new("CREATING")), Ok(State::new("READY"))]);
        let opts = fast(&["CREATING"], &["READY"]);

        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let callback: ProgressCallback = Box::new(move |event| {
            let tag = match event {
                ProgressEvent::Started { .. } => "started".to_string(),
                ProgressEvent::Polling { status, .. } => format!("polling:{status}"),
                ProgressEvent::Completed { status, .. } => format!("completed:{status}"),
                ProgressEvent::Failed { .. } => "failed".to_string(),
            };
            sink.lock().unwrap().push(tag);
        });

        poll_status("db-1", &opts, script.fetch(), Some(callback))
            .await
            .unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "started",
                "polling:CREATING",
                "polling:READY",
                "completed:READY"
            ]
        );
    }
}
