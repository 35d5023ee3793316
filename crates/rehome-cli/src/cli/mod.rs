mod config;

pub use config::{CliConfig, ViewerConfig};
