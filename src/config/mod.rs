pub mod settings;

pub use settings::{Config, ConfigError, MessageConfig, RulesConfig, REPO_CONFIG_FILE};
