//! Configuration and logging shared by the server and the CLI
//!
//! - [`config`] - layered service configuration (defaults, TOML file, env)
//! - [`logging`] - `tracing` subscriber setup

pub mod config;
pub mod logging;

pub use config::ServiceConfig;
pub use logging::{init_logging, LogFormat};
