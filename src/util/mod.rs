//! Utility modules for dotnet-publish
//!
//! - Structured logging setup and configuration

pub mod logging;

pub use logging::{init_logging, json_from_env, parse_level, LoggingConfig};
