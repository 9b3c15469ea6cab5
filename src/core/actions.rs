// src/core/actions.rs

use thiserror::Error;

use crate::{
    core::{
        aggregator::{self, AggregateError},
        config::{Config, ConfigError},
        resolver::{self, Resolution},
    },
    models::{NamedEntity, OperationAck, StackSnapshot},
    system::gateway::{GatewayError, StackGateway},
};

#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
    #[error(transparent)]
    Remote(#[from] GatewayError),
    #[error("Could not find an instance with the supplied arguments: {tokens}")]
    InstanceNotFound { tokens: String },
    #[error(
        "Found more than one instance with the supplied arguments: {tokens}\n{}\nInclude the stack name to clarify.",
        format_candidates(.candidates)
    )]
    AmbiguousInstance {
        tokens: String,
        candidates: Vec<NamedEntity>,
    },
    #[error("Could not find an app with the supplied arguments: {tokens}")]
    AppNotFound { tokens: String },
    #[error(
        "App and instance must belong to the same stack: app '{app}' is on '{app_stack}', instance '{instance}' is on '{instance_stack}'."
    )]
    StackMismatch {
        app: String,
        app_stack: String,
        instance: String,
        instance_stack: String,
    },
}

fn format_candidates(candidates: &[NamedEntity]) -> String {
    candidates
        .iter()
        .map(|c| format!("    {} : {}", c.display_name, c.stack_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A start or stop request the service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceAction {
    pub instance: NamedEntity,
    pub ack: OperationAck,
}

/// A deployment request the service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployAction {
    pub app: NamedEntity,
    pub instance: NamedEntity,
    pub comment: String,
    pub ack: OperationAck,
}

/// Orchestrates commands: fresh aggregation, name resolution, validation,
/// then a single gateway write. Nothing waits for the write to complete.
#[derive(Debug)]
pub struct StackService<'a, G: StackGateway + ?Sized> {
    gateway: &'a G,
    config: &'a Config,
}

impl<'a, G: StackGateway + ?Sized> StackService<'a, G> {
    pub fn new(gateway: &'a G, config: &'a Config) -> Self {
        Self { gateway, config }
    }

    /// Snapshots of every configured stack, in configuration order.
    pub async fn list(&self) -> Result<Vec<StackSnapshot>, ActionError> {
        Ok(aggregator::fetch_all(self.gateway, &self.config.stack_ids).await?)
    }

    pub async fn start<S: AsRef<str> + Sync>(
        &self,
        tokens: &[S],
    ) -> Result<InstanceAction, ActionError> {
        let snapshots = self.list().await?;
        let instance = resolve_instance(tokens, &snapshots)?;

        log::info!("Starting instance '{}' ({}).", instance.display_name, instance.id);
        let ack = self.gateway.start_instance(&instance.id).await?;
        Ok(InstanceAction { instance, ack })
    }

    pub async fn stop<S: AsRef<str> + Sync>(
        &self,
        tokens: &[S],
    ) -> Result<InstanceAction, ActionError> {
        let snapshots = self.list().await?;
        let instance = resolve_instance(tokens, &snapshots)?;

        log::info!("Stopping instance '{}' ({}).", instance.display_name, instance.id);
        let ack = self.gateway.stop_instance(&instance.id).await?;
        Ok(InstanceAction { instance, ack })
    }

    /// Deploys the first app named by `tokens` onto the instance they resolve to.
    ///
    /// App and instance must live in the same stack; otherwise nothing is sent.
    pub async fn deploy<S: AsRef<str> + Sync>(
        &self,
        tokens: &[S],
        comment: Option<&str>,
    ) -> Result<DeployAction, ActionError> {
        let snapshots = self.list().await?;
        let instance = resolve_instance(tokens, &snapshots)?;

        let app = resolver::find_first_app(tokens, &snapshots).ok_or_else(|| {
            ActionError::AppNotFound {
                tokens: join_tokens(tokens),
            }
        })?;

        if app.stack_id != instance.stack_id {
            return Err(ActionError::StackMismatch {
                app: app.display_name,
                app_stack: app.stack_name,
                instance: instance.display_name,
                instance_stack: instance.stack_name,
            });
        }

        let comment = comment.unwrap_or_default().to_string();
        log::info!(
            "Deploying app '{}' to instance '{}' on stack '{}'.",
            app.id,
            instance.id,
            app.stack_id
        );
        let ack = self
            .gateway
            .create_deployment(
                &app.stack_id,
                &app.id,
                std::slice::from_ref(&instance.id),
                &comment,
            )
            .await?;

        Ok(DeployAction {
            app,
            instance,
            comment,
            ack,
        })
    }
}

/// Appends `stack_id` to the configuration and persists it.
pub fn add_stack_id(config: &mut Config, stack_id: &str) -> Result<(), ActionError> {
    config.add_stack_id(stack_id)?;
    log::info!("Added stack id '{}'.", stack_id.trim());
    Ok(())
}

fn resolve_instance<S: AsRef<str>>(
    tokens: &[S],
    snapshots: &[StackSnapshot],
) -> Result<NamedEntity, ActionError> {
    match resolver::resolve_single_instance(tokens, snapshots) {
        Resolution::Resolved(instance) => Ok(instance),
        Resolution::NotFound => Err(ActionError::InstanceNotFound {
            tokens: join_tokens(tokens),
        }),
        Resolution::Ambiguous(candidates) => Err(ActionError::AmbiguousInstance {
            tokens: join_tokens(tokens),
            candidates,
        }),
    }
}
