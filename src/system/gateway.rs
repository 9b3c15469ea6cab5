// src/system/gateway.rs

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::models::{AppInfo, DeploymentInfo, InstanceInfo, OperationAck, StackInfo};

/// Any failure talking to the orchestration service. Never retried.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("The stack service failed '{action}': {message}")]
    Service { action: String, message: String },
    #[error("Could not build the '{action}' request: {message}")]
    InvalidRequest { action: String, message: String },
    #[error("Stack '{stack_id}' was not found by the stack service.")]
    StackNotFound { stack_id: String },
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// The operations the core consumes from the orchestration service.
///
/// Implementations own transport concerns (credentials, signing, timeouts);
/// callers issue at most one attempt per call.
#[async_trait]
pub trait StackGateway: Send + Sync + fmt::Debug {
    /// Describes a single stack.
    async fn describe_stack(&self, stack_id: &str) -> GatewayResult<StackInfo>;

    /// Lists the apps of a stack.
    async fn describe_apps(&self, stack_id: &str) -> GatewayResult<Vec<AppInfo>>;

    /// Lists the instances of a stack.
    async fn describe_instances(&self, stack_id: &str) -> GatewayResult<Vec<InstanceInfo>>;

    /// Deployment history of an app, most recent first.
    async fn describe_deployments(&self, app_id: &str) -> GatewayResult<Vec<DeploymentInfo>>;

    async fn start_instance(&self, instance_id: &str) -> GatewayResult<OperationAck>;

    async fn stop_instance(&self, instance_id: &str) -> GatewayResult<OperationAck>;

    /// Requests a deploy of `app_id` onto `instance_ids`.
    async fn create_deployment(
        &self,
        stack_id: &str,
        app_id: &str,
        instance_ids: &[String],
        comment: &str,
    ) -> GatewayResult<OperationAck>;
}
