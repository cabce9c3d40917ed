//! Database cluster command implementations

use dbaasctl_core::databases::{
    NodesPattern, ServiceCreateRequest, ServiceHandler, ServiceUpdateRequest,
    create_service_and_wait, delete_service_and_wait, update_service_and_wait,
};
use tracing::debug;

use crate::cli::{DatabaseCommands, OutputFormat, ScopeArgs};
use crate::commands::async_utils::{AsyncOperationArgs, WaitSpinner};
use crate::commands::confirm_deletion;
use crate::connection::ConnectionManager;
use crate::error::{CliError, Result as CliResult};
use crate::output::print_output;

/// Handle database cluster commands
pub async fn handle_database_command(
    command: &DatabaseCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output: OutputFormat,
) -> CliResult<()> {
    use DatabaseCommands::*;

    match command {
        List { scope } => handle_list(conn_mgr, profile, scope, output).await,
        Get { scope, id } => handle_get(conn_mgr, profile, scope, id, output).await,
        Create {
            scope,
            plan,
            version,
            description,
            flavor,
            region,
            nodes,
            network_id,
            subnet_id,
            async_ops,
        } => {
            let request = ServiceCreateRequest {
                description: description.clone(),
                plan: plan.clone(),
                version: version.clone(),
                nodes_pattern: nodes_pattern_from(flavor, region, nodes)?,
                network_id: network_id.clone(),
                subnet_id: subnet_id.clone(),
            };
            handle_create(conn_mgr, profile, scope, &request, async_ops, output).await
        }
        Update {
            scope,
            id,
            plan,
            version,
            description,
            flavor,
            region,
            nodes,
            async_ops,
        } => {
            let request = ServiceUpdateRequest {
                description: description.clone(),
                plan: plan.clone(),
                version: version.clone(),
                nodes_pattern: nodes_pattern_from(flavor, region, nodes)?,
            };
            handle_update(conn_mgr, profile, scope, id, &request, async_ops, output).await
        }
        Delete {
            scope,
            id,
            yes,
            async_ops,
        } => handle_delete(conn_mgr, profile, scope, id, *yes, async_ops).await,
    }
}

fn nodes_pattern_from(
    flavor: &Option<String>,
    region: &Option<String>,
    nodes: &Option<u32>,
) -> CliResult<Option<NodesPattern>> {
    match (flavor, region, nodes) {
        (Some(flavor), Some(region), Some(number)) => Ok(Some(NodesPattern {
            flavor: flavor.clone(),
            region: region.clone(),
            number: *number,
        })),
        (None, None, None) => Ok(None),
        _ => Err(CliError::InvalidInput {
            message: "--flavor, --region and --nodes must be given together".to_string(),
        }),
    }
}

async fn handle_list(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    scope: &ScopeArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    debug!("Listing {} clusters in {}", scope.engine, service);
    let ids = ServiceHandler::new(client).list(&service, &scope.engine).await?;

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
    id: &str,
    output: OutputFormat,
) -> CliResult<()> {
    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    let cluster = ServiceHandler::new(client)
        .get(&service, &scope.engine, id)
        .await?;
    print_output(&cluster, output.into())?;
    Ok(())
}

async fn handle_create(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    scope: &ScopeArgs,
    request: &ServiceCreateRequest,
    async_ops: &AsyncOperationArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    if async_ops.wait {
        let spinner = WaitSpinner::start("Creating cluster");
        let result = create_service_and_wait(
            &client,
            &service,
            &scope.engine,
            request,
            async_ops.bounds(),
            Some(spinner.callback()),
        )
        .await;
        spinner.finish_and_clear();

        let cluster = result?;
        print_output(&cluster, output.into())?;
    } else {
        let cluster = ServiceHandler::new(client)
            .create(&service, &scope.engine, request)
            .await?;
        if matches!(output, OutputFormat::Auto | OutputFormat::Table) {
            println!("Cluster {} is {}", cluster.id, cluster.status);
            println!(
                "Check its status: dbaasctl database get --engine {} {}",
                scope.engine, cluster.id
            );
        } else {
            print_output(&cluster, output.into())?;
        }
    }
    Ok(())
}

async fn handle_update(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    scope: &ScopeArgs,
    id: &str,
    request: &ServiceUpdateRequest,
    async_ops: &AsyncOperationArgs,
    output: OutputFormat,
) -> CliResult<()> {
    if request.is_empty() {
        return Err(CliError::InvalidInput {
            message: "nothing to update; pass at least one of --plan, --version, --description or a node pattern".to_string(),
        });
    }

    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    if async_ops.wait {
        let spinner = WaitSpinner::start("Updating cluster");
        let result = update_service_and_wait(
            &client,
            &service,
            &scope.engine,
            id,
            request,
            async_ops.bounds(),
            Some(spinner.callback()),
        )
        .await;
        spinner.finish_and_clear();

        let cluster = result?;
        print_output(&cluster, output.into())?;
    } else {
        let cluster = ServiceHandler::new(client)
            .update(&service, &scope.engine, id, request)
            .await?;
        print_output(&cluster, output.into())?;
    }
    Ok(())
}

async fn handle_delete(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    scope: &ScopeArgs,
    id: &str,
    yes: bool,
    async_ops: &AsyncOperationArgs,
) -> CliResult<()> {
    confirm_deletion(&format!("cluster {}", id), yes)?;

    let service = conn_mgr.resolve_service_name(scope.service.as_deref(), profile)?;
    let client = conn_mgr.create_client(profile)?;

    if async_ops.wait {
        let spinner = WaitSpinner::start("Deleting cluster");
        let result = delete_service_and_wait(
            &client,
            &service,
            &scope.engine,
            id,
            async_ops.bounds(),
            Some(spinner.callback()),
        )
        .await;
        spinner.finish_and_clear();
        result?;
        println!("Cluster {} deleted", id);
    } else {
        ServiceHandler::new(client)
            .delete(&service, &scope.engine, id)
            .await?;
        println!("Deletion of cluster {} requested", id);
    }
    Ok(())
}
