//! Wait-for-state workflows
//!
//! Each workflow issues one mutating call and then polls until the resource
//! reaches its target status: `READY` after create/update, confirmed gone
//! after delete. The pending/target sets are the only thing that differs
//! between the scenarios; the loop itself lives in [`crate::poll`].

use std::time::Duration;

use crate::client::CloudClient;
use crate::error::{CoreError, Result};
use crate::poll::{DELETED, PollOptions, ProgressCallback, poll_status};

use super::service::ServiceHandler;
use super::types::{
    DatabaseService, ServiceCreateRequest, ServiceUpdateRequest, ServiceUser, UserCreateRequest,
    UserUpdateRequest,
};
use super::user::UserHandler;

const CREATE_PENDING: &[&str] = &["PENDING", "CREATING"];
const UPDATE_PENDING: &[&str] = &["PENDING", "UPDATING"];
const READY: &[&str] = &["READY"];
const DELETE_PENDING: &[&str] = &["DELETING"];
const GONE: &[&str] = &[DELETED];

/// Timing bounds for one wait cycle
#[derive(Debug, Clone, Copy)]
pub struct WaitBounds {
    /// Total time budget
    pub timeout: Duration,
    /// Wait before the first poll
    pub delay: Duration,
    /// Minimum time between polls
    pub min_interval: Duration,
}

impl Default for WaitBounds {
    /// The service's defaults: 20 min total, 5 s delay, 3 s between polls
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20 * 60),
            delay: Duration::from_secs(5),
            min_interval: Duration::from_secs(3),
        }
    }
}

impl WaitBounds {
    fn options<'a>(&self, pending: &'a [&'a str], target: &'a [&'a str]) -> PollOptions<'a> {
        PollOptions::new(pending, target)
            .with_timeout(self.timeout)
            .with_delay(self.delay)
            .with_min_interval(self.min_interval)
    }
}

/// A ready-wait always ends on a fetched object; `None` can only come out of
/// delete-confirmation polling.
fn expect_final<T>(id: &str, state: Option<T>) -> Result<T> {
    state.ok_or_else(|| CoreError::UnexpectedStatus {
        id: id.to_string(),
        status: DELETED.to_string(),
    })
}

/// Create a database service cluster and wait until it is `READY`
pub async fn create_service_and_wait(
    client: &CloudClient,
    service_name: &str,
    engine: &str,
    request: &ServiceCreateRequest,
    bounds: WaitBounds,
    on_progress: Option<ProgressCallback>,
) -> Result<DatabaseService> {
    let handler = ServiceHandler::new(client.clone());

    let created = handler.create(service_name, engine, request).await?;
    let id = created.id.clone();

    let opts = bounds.options(CREATE_PENDING, READY);
    let state = poll_status(
        &id,
        &opts,
        || handler.get(service_name, engine, &id),
        on_progress,
    )
    .await?;
    expect_final(&id, state)
}

/// Update a database service cluster and wait until it is `READY` again
pub async fn update_service_and_wait(
    client: &CloudClient,
    service_name: &str,
    engine: &str,
    id: &str,
    request: &ServiceUpdateRequest,
    bounds: WaitBounds,
    on_progress: Option<ProgressCallback>,
) -> Result<DatabaseService> {
    let handler = ServiceHandler::new(client.clone());

    handler.update(service_name, engine, id, request).await?;

    let opts = bounds.options(UPDATE_PENDING, READY);
    let state = poll_status(
        id,
        &opts,
        || handler.get(service_name, engine, id),
        on_progress,
    )
    .await?;
    expect_final(id, state)
}

/// Delete a database service cluster and wait until it reports not-found
///
/// A cluster that is already gone when the delete is issued counts as
/// successfully deleted.
pub async fn delete_service_and_wait(
    client: &CloudClient,
    service_name: &str,
    engine: &str,
    id: &str,
    bounds: WaitBounds,
    on_progress: Option<ProgressCallback>,
) -> Result<()> {
    let handler = ServiceHandler::new(client.clone());

    match handler.delete(service_name, engine, id).await {
        Ok(()) => {}
        Err(err) if err.is_not_found() => return Ok(()),
        Err(err) => return Err(err),
    }

    let opts = bounds.options(DELETE_PENDING, GONE);
    poll_status(
        id,
        &opts,
        || handler.get(service_name, engine, id),
        on_progress,
    )
    .await?;
    Ok(())
}

/// Create a service user and wait until it is `READY`
///
/// The returned user keeps the one-time password from the creation
/// response; re-fetches during polling never include it.
pub async fn create_user_and_wait(
    client: &CloudClient,
    service_name: &str,
    engine: &str,
    cluster_id: &str,
    request: &UserCreateRequest,
    bounds: WaitBounds,
    on_progress: Option<ProgressCallback>,
) -> Result<ServiceUser> {
    let handler = UserHandler::new(client.clone());

    let created = handler
        .create(service_name, engine, cluster_id, request)
        .await?;
    let id = created.id.clone();
    let password = created.password;

    let opts = bounds.options(CREATE_PENDING, READY);
    let state = poll_status(
        &id,
        &opts,
        || handler.get(service_name, engine, cluster_id, &id),
        on_progress,
    )
    .await?;

    let mut user = expect_final(&id, state)?;
    user.password = password;
    Ok(user)
}

/// Update a service user's ACLs and wait until it is `READY` again
pub async fn update_user_and_wait(
    client: &CloudClient,
    service_name: &str,
    engine: &str,
    cluster_id: &str,
    id: &str,
    request: &UserUpdateRequest,
    bounds: WaitBounds,
    on_progress: Option<ProgressCallback>,
) -> Result<ServiceUser> {
    let handler = UserHandler::new(client.clone());

    handler
        .update(service_name, engine, cluster_id, id, request)
        .await?;

    let opts = bounds.options(UPDATE_PENDING, READY);
    let state = poll_status(
        id,
        &opts,
        || handler.get(service_name, engine, cluster_id, id),
        on_progress,
    )
    .await?;
    expect_final(id, state)
}

/// Delete a service user and wait until it reports not-found
pub async fn delete_user_and_wait(
    client: &CloudClient,
    service_name: &str,
    engine: &str,
    cluster_id: &str,
    id: &str,
    bounds: WaitBounds,
    on_progress: Option<ProgressCallback>,
) -> Result<()> {
    let handler = UserHandler::new(client.clone());

    match handler.delete(service_name, engine, cluster_id, id).await {
        Ok(()) => {}
        Err(err) if err.is_not_found() => return Ok(()),
        Err(err) => return Err(err),
    }

    let opts = bounds.options(DELETE_PENDING, GONE);
    poll_status(
        id,
        &opts,
        || handler.get(service_name, engine, cluster_id, id),
        on_progress,
    )
    .await?;
    Ok(())
}
