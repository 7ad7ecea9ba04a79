//! Shared library for cross-cutting concerns in the in-cluster Vault helpers.
//!
//! This crate provides centralized implementations for:
//! - A platform error type with retryability classification
//! - HTTP transport configuration and building
//! - Tracing subscriber initialisation

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod tracing_config;

pub use error::PlatformError;
pub use http::{HttpConfig, build_http_client};
pub use tracing_config::{TracingConfig, init_tracing};
