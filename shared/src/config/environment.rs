//! Deployment environment and the log settings derived from it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Variables naming the environment, first match wins
const SELECTOR_VARIABLES: [&str; 2] = ["APP_ENV", "ENVIRONMENT"];

/// Where the service runs
///
/// Picks the baseline [`crate::config::AppConfig`], the optional
/// `config.<name>.toml` overlay and the `.env.<name>` file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn name(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    /// Environment named by the first selector variable that parses,
    /// development when none does
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        SELECTOR_VARIABLES
            .iter()
            .filter_map(|key| lookup(*key))
            .find_map(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Base name of the TOML overlay; the `config` crate infers the extension
    pub fn config_file(self) -> String {
        format!("config.{}", self.name())
    }

    pub fn env_file(self) -> String {
        format!(".env.{}", self.name())
    }

    /// Log filter and access-log switch used unless overridden
    pub fn logging(self) -> LoggingConfig {
        let filter = match self {
            Environment::Development => "debug,sqlx=info",
            Environment::Staging => "info",
            Environment::Production => "info,actix_web=warn",
        };
        LoggingConfig {
            filter: filter.to_string(),
            access_log: !self.is_production(),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let environment = match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            other => return Err(format!("unknown environment `{}`", other)),
        };
        Ok(environment)
    }
}

/// env_logger settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// env_logger directive such as `info,sqlx=warn`; `RUST_LOG` takes precedence
    pub filter: String,

    /// Emit one line per request through actix's `Logger`
    pub access_log: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Environment::default().logging()
    }
}
