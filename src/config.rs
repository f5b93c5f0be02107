//! Application-level configuration loading, including the admin account set.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "MATCHDAY_BACK_CONFIG_PATH";
/// Token of the built-in fallback admin account.
const DEFAULT_ADMIN_TOKEN: &str = "change-me";
/// How many teams the goals chart returns when the caller does not say.
const DEFAULT_CHART_TOP_N: usize = 10;

/// Identity of the admin performing an operation, resolved from the token
/// middleware and passed explicitly into mutating service calls.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    /// Account name used for audit fields such as `validated_by`.
    pub name: String,
    /// Optional display name; absent when the account has none configured.
    pub display_name: Option<String>,
}

/// Admin account as declared in the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminAccount {
    /// Account name.
    pub name: String,
    /// Token expected in the `X-Admin-Token` header.
    pub token: String,
    /// Optional display name shown in audit output.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl AdminAccount {
    fn identity(&self) -> AdminIdentity {
        AdminIdentity {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    admins: Vec<AdminAccount>,
    chart_top_n: usize,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// built-in default admin account.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        admins = config.admins.len(),
                        "loaded admin accounts from config"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Resolve the admin identity matching the provided token, if any.
    pub fn admin_for_token(&self, token: &str) -> Option<AdminIdentity> {
        let account = self.admins.iter().find(|account| account.token == token)?;
        if account.token == DEFAULT_ADMIN_TOKEN {
            warn!(
                account = %account.name,
                "admin authenticated with the default token; configure a real one"
            );
        }
        Some(account.identity())
    }

    /// Default number of teams included in the goals chart.
    pub fn chart_top_n(&self) -> usize {
        self.chart_top_n
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            admins: vec![AdminAccount {
                name: "admin".into(),
                token: DEFAULT_ADMIN_TOKEN.into(),
                display_name: None,
            }],
            chart_top_n: DEFAULT_CHART_TOP_N,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    admins: Vec<AdminAccount>,
    #[serde(default)]
    chart_top_n: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        let admins = if value.admins.is_empty() {
            defaults.admins
        } else {
            value.admins
        };
        Self {
            admins,
            chart_top_n: value.chart_top_n.unwrap_or(defaults.chart_top_n),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_the_fallback_admin() {
        let config = AppConfig::default();
        let identity = config.admin_for_token(DEFAULT_ADMIN_TOKEN).unwrap();
        assert_eq!(identity.name, "admin");
        assert!(identity.display_name.is_none());
    }

    #[test]
    fn unknown_token_resolves_to_nothing() {
        let config = AppConfig::default();
        assert!(config.admin_for_token("nope").is_none());
    }
}
