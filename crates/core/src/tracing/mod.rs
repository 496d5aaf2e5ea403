//! Native tracing setup for processes hosting an auth state manager

pub mod config;
pub mod init;

pub use config::{InstrumentationConfig, LogFormat};
pub use init::{init_default, init_dev, init_tracing};
