// src/constants.rs

/// The binary name, used when building hint commands for the user.
pub const CLI_NAME: &str = "opie";

/// The name of the configuration file in the user's home directory.
pub const CONFIG_FILENAME: &str = ".opie.json";

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "OPIE_CONFIG";

/// Environment variable that overrides the service endpoint.
pub const ENDPOINT_ENV: &str = "OPIE_ENDPOINT";

/// Region written to a freshly created configuration.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Placeholder shown in table cells that have no value.
pub const EMPTY_CELL: &str = "---";

/// Per-request timeout applied by the HTTP gateway, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
