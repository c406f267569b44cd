//! Pre-defined provider configurations.

mod config;

pub use config::{github_config, gitlab_config, ProviderConfig};
