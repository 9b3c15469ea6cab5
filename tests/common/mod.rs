// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use opie::{
    core::config::Config,
    models::{
        AppInfo, DeploymentInfo, InstanceInfo, InstanceStatus, OperationAck, StackInfo,
    },
    system::gateway::{GatewayError, GatewayResult, StackGateway},
};

/// Every gateway call, in the order it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DescribeStack(String),
    DescribeApps(String),
    DescribeInstances(String),
    DescribeDeployments(String),
    StartInstance(String),
    StopInstance(String),
    CreateDeployment {
        stack_id: String,
        app_id: String,
        instance_ids: Vec<String>,
        comment: String,
    },
}

#[derive(Debug, Clone)]
struct FakeStack {
    info: StackInfo,
    apps: Vec<AppInfo>,
    instances: Vec<InstanceInfo>,
}

/// In-memory gateway that records calls and can delay or fail per stack.
#[derive(Debug, Default)]
pub struct FakeGateway {
    stacks: HashMap<String, FakeStack>,
    deployments: HashMap<String, Vec<DeploymentInfo>>,
    delays: HashMap<String, Duration>,
    app_delays: HashMap<String, Duration>,
    failing_stacks: Vec<String>,
    calls: Arc<Mutex<Vec<Call>>>,
    finished_deployment_reads: Arc<Mutex<Vec<String>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack(mut self, id: &str, name: &str) -> Self {
        self.stacks.insert(
            id.to_string(),
            FakeStack {
                info: StackInfo {
                    id: id.to_string(),
                    name: name.to_string(),
                },
                apps: Vec::new(),
                instances: Vec::new(),
            },
        );
        self
    }

    pub fn with_instance(mut self, stack_id: &str, id: &str, hostname: &str) -> Self {
        self.stack_mut(stack_id).instances.push(InstanceInfo {
            id: id.to_string(),
            hostname: hostname.to_string(),
            stack_id: stack_id.to_string(),
            status: InstanceStatus::Online,
            public_ip: None,
            private_ip: None,
        });
        self
    }

    pub fn with_app(mut self, stack_id: &str, id: &str, short_name: &str) -> Self {
        self.stack_mut(stack_id).apps.push(AppInfo {
            id: id.to_string(),
            short_name: short_name.to_string(),
            stack_id: stack_id.to_string(),
            latest_deployment: None,
        });
        self
    }

    /// History for `app_id`, most recent first.
    pub fn with_deployments(mut self, app_id: &str, statuses: &[&str]) -> Self {
        let history = statuses
            .iter()
            .map(|status| DeploymentInfo {
                app_id: app_id.to_string(),
                status: status.to_string(),
                completed_at: None,
                duration_seconds: None,
            })
            .collect();
        self.deployments.insert(app_id.to_string(), history);
        self
    }

    pub fn with_delay(mut self, stack_id: &str, millis: u64) -> Self {
        self.delays
            .insert(stack_id.to_string(), Duration::from_millis(millis));
        self
    }

    /// Delays the deployment history read of one app.
    pub fn with_app_delay(mut self, app_id: &str, millis: u64) -> Self {
        self.app_delays
            .insert(app_id.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn failing(mut self, stack_id: &str) -> Self {
        self.failing_stacks.push(stack_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// A handle on the call log that outlives the gateway, for when the
    /// gateway is boxed into an `AppContext`.
    pub fn call_log(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    /// App ids in the order their deployment history reads completed.
    pub fn finished_deployment_reads(&self) -> Vec<String> {
        self.finished_deployment_reads.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| predicate(c)).count()
    }

    fn stack_mut(&mut self, stack_id: &str) -> &mut FakeStack {
        self.stacks
            .get_mut(stack_id)
            .expect("declare the stack before its members")
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn lookup(&self, stack_id: &str) -> GatewayResult<FakeStack> {
        if let Some(delay) = self.delays.get(stack_id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_stacks.iter().any(|id| id == stack_id) {
            return Err(GatewayError::Service {
                action: "DescribeStacks".to_string(),
                message: "InternalFailure: boom".to_string(),
            });
        }
        self.stacks
            .get(stack_id)
            .cloned()
            .ok_or_else(|| GatewayError::StackNotFound {
                stack_id: stack_id.to_string(),
            })
    }
}

#[async_trait]
impl StackGateway for FakeGateway {
    async fn describe_stack(&self, stack_id: &str) -> GatewayResult<StackInfo> {
        self.record(Call::DescribeStack(stack_id.to_string()));
        Ok(self.lookup(stack_id).await?.info)
    }

    async fn describe_apps(&self, stack_id: &str) -> GatewayResult<Vec<AppInfo>> {
        self.record(Call::DescribeApps(stack_id.to_string()));
        Ok(self.lookup(stack_id).await?.apps)
    }

    async fn describe_instances(&self, stack_id: &str) -> GatewayResult<Vec<InstanceInfo>> {
        self.record(Call::DescribeInstances(stack_id.to_string()));
        Ok(self.lookup(stack_id).await?.instances)
    }

    async fn describe_deployments(&self, app_id: &str) -> GatewayResult<Vec<DeploymentInfo>> {
        self.record(Call::DescribeDeployments(app_id.to_string()));
        if let Some(delay) = self.app_delays.get(app_id) {
            tokio::time::sleep(*delay).await;
        }
        self.finished_deployment_reads
            .lock()
            .unwrap()
            .push(app_id.to_string());
        Ok(self.deployments.get(app_id).cloned().unwrap_or_default())
    }

    async fn start_instance(&self, instance_id: &str) -> GatewayResult<OperationAck> {
        self.record(Call::StartInstance(instance_id.to_string()));
        Ok(OperationAck::default())
    }

    async fn stop_instance(&self, instance_id: &str) -> GatewayResult<OperationAck> {
        self.record(Call::StopInstance(instance_id.to_string()));
        Ok(OperationAck::default())
    }

    async fn create_deployment(
        &self,
        stack_id: &str,
        app_id: &str,
        instance_ids: &[String],
        comment: &str,
    ) -> GatewayResult<OperationAck> {
        self.record(Call::CreateDeployment {
            stack_id: stack_id.to_string(),
            app_id: app_id.to_string(),
            instance_ids: instance_ids.to_vec(),
            comment: comment.to_string(),
        });
        Ok(OperationAck {
            deployment_id: Some("d-0001".to_string()),
        })
    }
}

/// A configuration listing `stack_ids`, never written to disk.
pub fn config_with(stack_ids: &[&str]) -> Config {
    let mut config = Config::new("/nonexistent/.opie.json");
    config.stack_ids = stack_ids.iter().map(|s| s.to_string()).collect();
    config
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// prod (s1) and staging (s2) each run a `web1` and an `api` app.
pub fn prod_and_staging() -> FakeGateway {
    FakeGateway::new()
        .with_stack("s1", "prod")
        .with_instance("s1", "i-prod-web1", "web1")
        .with_app("s1", "a-prod-api", "api")
        .with_stack("s2", "staging")
        .with_instance("s2", "i-staging-web1", "web1")
        .with_instance("s2", "i-staging-worker", "worker")
        .with_app("s2", "a-staging-api", "api")
}
