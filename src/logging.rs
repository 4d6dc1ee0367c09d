use std::collections::HashMap;

use serde::Deserialize;
use tracing_subscriber::{
    EnvFilter,
    fmt
};


#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error or off
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub color: bool,
    /// Per-module levels, e.g. `"timeproperty::property": "trace"`.
    #[serde(default)]
    pub modules: HashMap<String, String>
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: default_log_level(), color: false, modules: HashMap::new() }
    }
}

impl LoggingConfig {
    /// Filter directives built from the configured levels, sorted by module.
    pub fn directives(&self) -> String {
        let mut modules: Vec<(&String, &String)> = self.modules.iter().collect();
        modules.sort();
        let mut directives = vec![self.level.clone()];
        directives.extend(modules.into_iter().map(|(module, level)| format!("{}={}", module, level)));
        directives.join(",")
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured levels.
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directives()))
        .unwrap_or_else(|_| EnvFilter::new(default_log_level()));
    fmt()
        .with_env_filter(filter)
        .with_ansi(config.color)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: LoggingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.directives(), "info");
    }

    #[test]
    fn test_module_directives() {
        let config: LoggingConfig = serde_json::from_str(
            r#"{"level": "warn", "modules": {"timeproperty::time": "trace", "timeproperty::property": "debug"}}"#
        ).unwrap();
        assert_eq!(config.directives(), "warn,timeproperty::property=debug,timeproperty::time=trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        init_logging(&config);
        assert!(!init_logging(&config));
    }
}
