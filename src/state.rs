// src/state.rs

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};

use crate::{
    core::{actions::StackService, config::Config},
    system::{gateway::StackGateway, opsworks::OpsWorksClient},
};

/// Everything a command handler needs for one invocation: the loaded
/// configuration, a single-threaded async runtime and the remote gateway.
///
/// The gateway is built on first use, so commands that never talk to the
/// service (`add-stack`) work without a reachable endpoint.
#[derive(Debug)]
pub struct AppContext {
    config: Config,
    gateway: Option<Box<dyn StackGateway>>,
    runtime: Runtime,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start the async runtime")?;
        Ok(Self {
            config,
            gateway: None,
            runtime,
        })
    }

    /// A context with a pre-built gateway instead of the HTTP client.
    pub fn with_gateway(config: Config, gateway: Box<dyn StackGateway>) -> Result<Self> {
        let mut context = Self::new(config)?;
        context.gateway = Some(gateway);
        Ok(context)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The runtime to drive the service with, and the service itself.
    pub fn service(&mut self) -> Result<(&Runtime, StackService<'_, dyn StackGateway>)> {
        if self.gateway.is_none() {
            let endpoint = self.config.endpoint_override();
            log::debug!(
                "Connecting to stack service in '{}' (endpoint: {}).",
                self.config.region,
                endpoint.as_deref().unwrap_or("regional default")
            );
            let client = self.runtime.block_on(OpsWorksClient::connect(
                &self.config.region,
                endpoint.as_deref(),
            ));
            self.gateway = Some(Box::new(client));
        }
        let gateway = self
            .gateway
            .as_deref()
            .context("Stack gateway is not available")?;
        Ok((&self.runtime, StackService::new(gateway, &self.config)))
    }
}
