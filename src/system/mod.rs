//! # Remote Service Layer
//!
//! The boundary between the resolution core and the orchestration service.
//!
//! ## Modules
//!
//! - **`gateway`**: the `StackGateway` trait every remote read and write goes through,
//!   plus the `GatewayError` that wraps any remote failure.
//! - **`opsworks`**: the production gateway, an async HTTP client speaking the service's
//!   JSON protocol.

pub mod gateway;
pub mod opsworks;
