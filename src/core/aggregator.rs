// src/core/aggregator.rs

use futures::future::try_join_all;
use thiserror::Error;

use crate::{
    models::{AppInfo, StackSnapshot},
    system::gateway::{GatewayError, StackGateway},
};

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("No configured stacks, use add-stack to configure a stack id.")]
    NoStacksConfigured,
    #[error(transparent)]
    Remote(#[from] GatewayError),
}

/// Fetches a full snapshot of every stack in `stack_ids`.
///
/// All stacks are fetched concurrently and the result keeps the order of
/// `stack_ids`. The first failing remote call aborts the whole aggregation;
/// partial results are never returned.
pub async fn fetch_all<G>(
    gateway: &G,
    stack_ids: &[String],
) -> Result<Vec<StackSnapshot>, AggregateError>
where
    G: StackGateway + ?Sized,
{
    if stack_ids.is_empty() {
        return Err(AggregateError::NoStacksConfigured);
    }

    log::debug!("Aggregating {} stack(s).", stack_ids.len());
    let snapshots = try_join_all(stack_ids.iter().map(|id| fetch_stack(gateway, id))).await?;
    Ok(snapshots)
}

/// Describes one stack: metadata, apps and instances in parallel, then the
/// latest deployment of each app.
pub async fn fetch_stack<G>(gateway: &G, stack_id: &str) -> Result<StackSnapshot, GatewayError>
where
    G: StackGateway + ?Sized,
{
    log::debug!("Describing stack '{}'.", stack_id);
    let (stack, mut apps, instances) = tokio::try_join!(
        gateway.describe_stack(stack_id),
        gateway.describe_apps(stack_id),
        gateway.describe_instances(stack_id),
    )?;

    if !apps.is_empty() {
        attach_latest_deployments(gateway, &mut apps).await?;
    }

    Ok(StackSnapshot {
        stack,
        apps,
        instances,
    })
}

async fn attach_latest_deployments<G>(
    gateway: &G,
    apps: &mut [AppInfo],
) -> Result<(), GatewayError>
where
    G: StackGateway + ?Sized,
{
    let histories =
        try_join_all(apps.iter().map(|app| gateway.describe_deployments(&app.id))).await?;

    // `try_join_all` yields results in input order, so histories line up with apps.
    for (app, history) in apps.iter_mut().zip(histories) {
        app.latest_deployment = history.into_iter().next();
        if app.latest_deployment.is_none() {
            log::warn!("App '{}' has never been deployed.", app.short_name);
        }
    }
    Ok(())
}
