//! Console configuration.
//!
//! The embedded default can be overridden by a TOML document stored in
//! localStorage under [`CONFIG_STORAGE_KEY`].

use contracts::workflow::{QuoteApprovalPolicy, ResolverOptions};
use serde::Deserialize;

pub const CONFIG_STORAGE_KEY: &str = "punto_evento_config";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub port: u16,
    /// Prepended to every API path, e.g. "/punto-evento"
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub quote_approval: QuoteApprovalPolicy,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 8080
prefix = ""

[logging]
level = "debug"

[workflow]
quote_approval = "pending_or_in_progress"
"#;

impl Config {
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            quote_approval: self.workflow.quote_approval,
        }
    }

    /// Unknown levels fall back to `Debug`
    pub fn log_level(&self) -> log::Level {
        self.logging
            .level
            .parse::<log::Level>()
            .unwrap_or(log::Level::Debug)
    }
}

pub fn default_config() -> Config {
    match toml::from_str(DEFAULT_CONFIG) {
        Ok(config) => config,
        // covered by test_default_config_loads
        Err(_) => Config {
            api: ApiConfig {
                port: 8080,
                prefix: String::new(),
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
            workflow: WorkflowConfig::default(),
        },
    }
}

/// Parse an override document; errors fall back to the embedded default
pub fn parse_config(contents: &str) -> Config {
    match toml::from_str::<Config>(contents) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Invalid configuration override, using defaults: {}", e);
            default_config()
        }
    }
}

/// Load configuration.
///
/// Search order:
/// 1. localStorage override
/// 2. embedded default
pub fn load_config() -> Config {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten());
    match stored {
        Some(contents) => {
            log::info!("Loading config override from localStorage");
            parse_config(&contents)
        }
        None => {
            log::info!("Using default embedded configuration");
            default_config()
        }
    }
}

thread_local! {
    static CONFIG: Config = load_config();
}

/// Process-wide configuration, loaded on first access
pub fn config() -> Config {
    CONFIG.with(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(
            config.workflow.quote_approval,
            QuoteApprovalPolicy::PendingOrInProgress
        );
    }

    #[test]
    fn test_override_pending_only() {
        let config = parse_config(
            r#"
            [api]
            port = 9000
            prefix = "/pe"

            [logging]
            level = "warn"

            [workflow]
            quote_approval = "pending_only"
            "#,
        );
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.prefix, "/pe");
        assert_eq!(config.log_level(), log::Level::Warn);
        assert_eq!(
            config.resolver_options().quote_approval,
            QuoteApprovalPolicy::PendingOnly
        );
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let config = parse_config("[api]\nport = \"not a number\"");
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_missing_workflow_section_uses_default_policy() {
        let config = parse_config("[api]\nport = 8080\n[logging]\nlevel = \"info\"");
        assert_eq!(config.workflow, WorkflowConfig::default());
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
