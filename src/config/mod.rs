mod loader;

pub use loader::{Config, OutputConfig, DEFAULT_CONFIG_PATH};
