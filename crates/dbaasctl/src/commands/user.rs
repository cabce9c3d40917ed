//! Service user command implementations

use dbaasctl_core::databases::{
    UserCreateRequest, UserHandler, UserUpdateRequest, create_user_and_wait, delete_user_and_wait,
    update_user_and_wait,
};
use tracing::debug;

use crate::cli::{OutputFormat, ScopeArgs, UserCommands};
use crate::commands::async_utils::{AsyncOperationArgs, WaitSpinner};
use crate::commands::confirm_deletion;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::print_output;

/// Handle service user commands
pub async fn handle_user_command(
    command: &UserCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output: OutputFormat,
) -> CliResult<()> {
    use UserCommands::*;

    match command {
        List { scope, cluster } => handle_list(conn_mgr, profile, scope, cluster, output).await,
        Get { scope, cluster, id } => {
            handle_get(conn_mgr, profile, scope, cluster, id, output).await
        }
        Create {
            scope,
            cluster,
            name,
            categories,
            commands,
            keys,
            channels,
            async_ops,
        } => {
            let request = UserCreateRequest {
                name: name.clone(),
                categories: categories.clone(),
                commands: commands.clone(),
                keys: keys.clone(),
                channels: channels.clone(),
            };
            handle_create(conn_mgr, profile, scope, cluster, &request, async_ops, output).await
        }
        Update {
            scope,
            cluster,
            id,
            categories,
            commands,
            keys,
            channels,
            async_ops,
        } => {
            let request = UserUpdateRequest {
                categories: categories.clone(),
                commands: commands.clone(),
                keys: keys.clone(),
                channels: channels.clone(),
            };
            handle_update(
                conn_mgr, profile, scope, cluster, id, &request, async_ops, output,
            )
            .await
        }
        Delete {
            scope,
            cluster,
            id,
            yes,
            async_ops,
        } => handle_delete(conn_mgr, profile, scope, cluster, id, *yes, async_ops).await,
    }
}

async fn handle_list(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    scope: &ScopeArgs,
    cluster: &str,
    output: OutputFormat,
) -> CliResult<()> {
    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    debug!("Listing users of cluster {} in {}", cluster, service);
    let ids = UserHandler::new(client)
        .list(&service, &scope.engine, cluster)
        .await?;

    match output {
        OutputFormat::Auto | OutputFormat::Table => {
            for id in &ids {
                println!("{}", id);
            }
        }
        _ => print_output(&ids, output.into())?,
    }
    Ok(())
}

async fn handle_get(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    scope: &ScopeArgs,
    cluster: &str,
    id: &str,
    output: OutputFormat,
) -> CliResult<()> {
    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    let user = UserHandler::new(client)
        .get(&service, &scope.engine, cluster, id)
        .await?;
    print_output(&user, output.into())?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn handle_create(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    scope: &ScopeArgs,
    cluster: &str,
    request: &UserCreateRequest,
    async_ops: &AsyncOperationArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    let user = if async_ops.wait {
        let spinner = WaitSpinner::start("Creating user");
        let result = create_user_and_wait(
            &client,
            &service,
            &scope.engine,
            cluster,
            request,
            async_ops.bounds(),
            Some(spinner.callback()),
        )
        .await;
        spinner.finish_and_clear();
        result?
    } else {
        UserHandler::new(client)
            .create(&service, &scope.engine, cluster, request)
            .await?
    };

    match output {
        OutputFormat::Auto | OutputFormat::Table => {
            println!("User {} ({}) is {}", user.name, user.id, user.status);
            // The password is shown exactly once; it cannot be fetched again.
            if let Some(ref password) = user.password {
                println!("Password: {}", password);
                println!("Store it now; it will not be shown again.");
            }
        }
        _ => print_output(&user, output.into())?,
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn handle_update(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    scope: &ScopeArgs,
    cluster: &str,
    id: &str,
    request: &UserUpdateRequest,
    async_ops: &AsyncOperationArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    let user = if async_ops.wait {
        let spinner = WaitSpinner::start("Updating user");
        let result = update_user_and_wait(
            &client,
            &service,
            &scope.engine,
            cluster,
            id,
            request,
            async_ops.bounds(),
            Some(spinner.callback()),
        )
        .await;
        spinner.finish_and_clear();
        result?
    } else {
        UserHandler::new(client)
            .update(&service, &scope.engine, cluster, id, request)
            .await?
    };

    print_output(&user, output.into())?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn handle_delete(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    scope: &ScopeArgs,
    cluster: &str,
    id: &str,
    yes: bool,
    async_ops: &AsyncOperationArgs,
) -> CliResult<()> {
    confirm_deletion(&format!("user {}", id), yes)?;

    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    if async_ops.wait {
        let spinner = WaitSpinner::start("Deleting user");
        let result = delete_user_and_wait(
            &client,
            &service,
            &scope.engine,
            cluster,
            id,
            async_ops.bounds(),
            Some(spinner.callback()),
        )
        .await;
        spinner.finish_and_clear();
        result?;
        println!("User {} deleted", id);
    } else {
        UserHandler::new(client)
            .delete(&service, &scope.engine, cluster, id)
            .await?;
        println!("Deletion of user {} requested", id);
    }
    Ok(())
}
