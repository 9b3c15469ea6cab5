// src/system/opsworks.rs

use async_trait::async_trait;
use aws_config::{
    BehaviorVersion, ConfigLoader, SdkConfig, retry::RetryConfig, timeout::TimeoutConfig,
};
use aws_sdk_opsworks::{
    Client,
    config::Region,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::{App, Deployment, DeploymentCommand, DeploymentCommandName, Instance, Stack},
};
use std::{error::Error as StdError, fmt, time::Duration};

use crate::{
    constants::REQUEST_TIMEOUT_SECS,
    models::{AppInfo, DeploymentInfo, InstanceInfo, OperationAck, StackInfo},
    system::gateway::{GatewayError, GatewayResult, StackGateway},
};

/// Gateway backed by the AWS SDK.
///
/// Credentials come from the standard AWS chain (environment, profile, SSO,
/// instance metadata) and every request is SigV4-signed by the SDK.
#[derive(Debug, Clone)]
pub struct OpsWorksClient {
    client: Client,
}

/// Shared SDK settings: the configured region, an optional endpoint
/// override, a single attempt per call and the request timeout.
pub fn config_loader(region: &str, endpoint: Option<&str>) -> ConfigLoader {
    let timeouts = TimeoutConfig::builder()
        .operation_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build();
    let loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .retry_config(RetryConfig::disabled())
        .timeout_config(timeouts);

    match endpoint {
        Some(url) => loader.endpoint_url(url),
        None => loader,
    }
}

impl OpsWorksClient {
    /// Loads credentials and builds a client for `region`.
    pub async fn connect(region: &str, endpoint: Option<&str>) -> Self {
        let sdk_config = config_loader(region, endpoint).load().await;
        Self::from_sdk_config(&sdk_config)
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

/// `Code: message` from the service's error metadata, when it sent any.
fn describe_service_error(code: Option<&str>, message: Option<&str>) -> Option<String> {
    match (code, message) {
        (Some(c), Some(m)) => Some(format!("{}: {}", c, m)),
        (Some(c), None) => Some(c.to_string()),
        (None, Some(m)) => Some(m.to_string()),
        (None, None) => None,
    }
}

fn service_error<E, R>(action: &str, err: SdkError<E, R>) -> GatewayError
where
    E: ProvideErrorMetadata + StdError + 'static,
    R: fmt::Debug,
{
    if let Some(message) = err
        .as_service_error()
        .and_then(|e| describe_service_error(e.code(), e.message()))
    {
        return GatewayError::Service {
            action: action.to_string(),
            message,
        };
    }
    GatewayError::Service {
        action: action.to_string(),
        message: DisplayErrorContext(err).to_string(),
    }
}

// --- SDK shapes to models ---

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn stack_info(stack: &Stack) -> StackInfo {
    StackInfo {
        id: text(stack.stack_id()),
        name: text(stack.name()),
    }
}

fn app_info(app: &App) -> AppInfo {
    AppInfo {
        id: text(app.app_id()),
        short_name: text(app.shortname()),
        stack_id: text(app.stack_id()),
        latest_deployment: None,
    }
}

fn instance_info(instance: &Instance) -> InstanceInfo {
    InstanceInfo {
        id: text(instance.instance_id()),
        hostname: text(instance.hostname()),
        stack_id: text(instance.stack_id()),
        status: text(instance.status()).into(),
        public_ip: instance.public_ip().map(str::to_string),
        private_ip: instance.private_ip().map(str::to_string),
    }
}

fn deployment_info(deployment: &Deployment) -> DeploymentInfo {
    DeploymentInfo {
        app_id: text(deployment.app_id()),
        status: text(deployment.status()),
        completed_at: deployment.completed_at().map(str::to_string),
        duration_seconds: deployment.duration().and_then(|d| u64::try_from(d).ok()),
    }
}

#[async_trait]
impl StackGateway for OpsWorksClient {
    async fn describe_stack(&self, stack_id: &str) -> GatewayResult<StackInfo> {
        log::debug!("-> DescribeStacks {}", stack_id);
        let output = self
            .client
            .describe_stacks()
            .stack_ids(stack_id)
            .send()
            .await
            .map_err(|e| service_error("DescribeStacks", e))?;
        output
            .stacks()
            .first()
            .map(stack_info)
            .ok_or_else(|| GatewayError::StackNotFound {
                stack_id: stack_id.to_string(),
            })
    }

    async fn describe_apps(&self, stack_id: &str) -> GatewayResult<Vec<AppInfo>> {
        log::debug!("-> DescribeApps {}", stack_id);
        let output = self
            .client
            .describe_apps()
            .stack_id(stack_id)
            .send()
            .await
            .map_err(|e| service_error("DescribeApps", e))?;
        Ok(output.apps().iter().map(app_info).collect())
    }

    async fn describe_instances(&self, stack_id: &str) -> GatewayResult<Vec<InstanceInfo>> {
        log::debug!("-> DescribeInstances {}", stack_id);
        let output = self
            .client
            .describe_instances()
            .stack_id(stack_id)
            .send()
            .await
            .map_err(|e| service_error("DescribeInstances", e))?;
        Ok(output.instances().iter().map(instance_info).collect())
    }

    async fn describe_deployments(&self, app_id: &str) -> GatewayResult<Vec<DeploymentInfo>> {
        log::debug!("-> DescribeDeployments {}", app_id);
        let output = self
            .client
            .describe_deployments()
            .app_id(app_id)
            .send()
            .await
            .map_err(|e| service_error("DescribeDeployments", e))?;
        Ok(output.deployments().iter().map(deployment_info).collect())
    }

    async fn start_instance(&self, instance_id: &str) -> GatewayResult<OperationAck> {
        log::debug!("-> StartInstance {}", instance_id);
        self.client
            .start_instance()
            .instance_id(instance_id)
            .send()
            .await
            .map_err(|e| service_error("StartInstance", e))?;
        Ok(OperationAck::default())
    }

    async fn stop_instance(&self, instance_id: &str) -> GatewayResult<OperationAck> {
        log::debug!("-> StopInstance {}", instance_id);
        self.client
            .stop_instance()
            .instance_id(instance_id)
            .send()
            .await
            .map_err(|e| service_error("StopInstance", e))?;
        Ok(OperationAck::default())
    }

    async fn create_deployment(
        &self,
        stack_id: &str,
        app_id: &str,
        instance_ids: &[String],
        comment: &str,
    ) -> GatewayResult<OperationAck> {
        log::debug!("-> CreateDeployment {} {} {:?}", stack_id, app_id, instance_ids);
        let command = DeploymentCommand::builder()
            .name(DeploymentCommandName::Deploy)
            .build()
            .map_err(|e| GatewayError::InvalidRequest {
                action: "CreateDeployment".to_string(),
                message: e.to_string(),
            })?;

        let output = self
            .client
            .create_deployment()
            .stack_id(stack_id)
            .app_id(app_id)
            .set_instance_ids(Some(instance_ids.to_vec()))
            .command(command)
            .comment(comment)
            .send()
            .await
            .map_err(|e| service_error("CreateDeployment", e))?;

        Ok(OperationAck {
            deployment_id: output.deployment_id().map(str::to_string),
        })
    }
}
