//! Environment-driven configuration.

use outliner_observability::LogFormat;

pub const LOG_FORMAT_VAR: &str = "OUTLINER_LOG_FORMAT";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_format: LogFormat,
    /// Problem found while reading the environment, logged once tracing is up.
    pub warning: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let Some(raw) = lookup(LOG_FORMAT_VAR) else {
            return Self::default();
        };
        match raw.parse::<LogFormat>() {
            Ok(log_format) => Self {
                log_format,
                warning: None,
            },
            Err(msg) => Self {
                log_format: LogFormat::default(),
                warning: Some(format!("{LOG_FORMAT_VAR}: {msg}; using json")),
            },
        }
    }
}
