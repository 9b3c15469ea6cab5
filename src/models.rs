// src/models.rs

use std::fmt;

// --- REMOTE ENTITIES ---
// Plain views of what the orchestration service reports. The gateway maps
// the service's own shapes into these.

/// Identity of a stack as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackInfo {
    pub id: String,
    /// The human-readable stack name.
    pub name: String,
}

/// A deployable application definition belonging to a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub id: String,
    pub short_name: String,
    pub stack_id: String,
    /// Filled in by the aggregator.
    pub latest_deployment: Option<DeploymentInfo>,
}

/// A compute node belonging to a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    pub id: String,
    pub hostname: String,
    pub stack_id: String,
    pub status: InstanceStatus,
    pub public_ip: Option<String>,
    pub private_ip: Option<String>,
}

/// Lifecycle state of an instance. The service reports many transitional
/// states (`booting`, `stopping`, ...); only the two stable ones matter here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceStatus {
    Online,
    Stopped,
    Other(String),
}

impl InstanceStatus {
    /// The command that flips this instance to its opposite state.
    pub fn opposite_action(&self) -> &'static str {
        match self {
            Self::Stopped => "start",
            _ => "stop",
        }
    }
}

impl From<String> for InstanceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "online" => Self::Online,
            "stopped" => Self::Stopped,
            _ => Self::Other(value),
        }
    }
}

impl From<InstanceStatus> for String {
    fn from(value: InstanceStatus) -> Self {
        value.to_string()
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => f.write_str("online"),
            Self::Stopped => f.write_str("stopped"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// One app-deploy operation with its status and timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentInfo {
    pub app_id: String,
    pub status: String,
    pub completed_at: Option<String>,
    pub duration_seconds: Option<u64>,
}

/// Acknowledgement that the service accepted a state-changing request.
/// Completion is never awaited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationAck {
    /// Present for deployments only.
    pub deployment_id: Option<String>,
}

// --- AGGREGATED VIEW ---

/// Everything known about one stack for the duration of a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSnapshot {
    pub stack: StackInfo,
    pub apps: Vec<AppInfo>,
    pub instances: Vec<InstanceInfo>,
}

// --- RESOLUTION ---

/// The kind of entity a user token may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Stack,
    App,
    Instance,
}

/// A flattened, name-addressable row derived from a `StackSnapshot`.
/// Display names are only unique per kind within a single stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntity {
    pub id: String,
    pub display_name: String,
    pub stack_id: String,
    pub stack_name: String,
    pub kind: EntityKind,
}
