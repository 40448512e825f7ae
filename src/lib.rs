pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{DryRunRunner, LocalStorage, ProcessRunner};
pub use config::{toml_config::ToolConfig, CliConfig, Command};
pub use core::dispatcher::Dispatcher;
pub use utils::error::{DeployError, Result};
