//! # config — read runtime settings from environment variables
//!
//! Everything is read once at startup (after `.env` is loaded) and then
//! shared read-only through [`crate::state::AppState`].
//!
//! | Variable      | Default        | Description                                         |
//! |---------------|----------------|-----------------------------------------------------|
//! | `BIND_ADDR`   | `0.0.0.0:8080` | Address Axum listens on                             |
//! | `APP_PROFILE` | —              | Active profile; `dev` / `development` = dev mode    |
//! | `ADMIN_TOKEN` | —              | Expected `ACCESS_TOKEN` cookie for the admin panel  |
//! | `API_KEY`     | —              | Expected `X-API-Key` for API writes                 |
//! | `SEED_DEMO`   | `true`         | Seed demo owners, styles and venues at startup      |

use std::net::SocketAddr;

use anyhow::Context;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

// ─── AppConfig ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Raw value of `APP_PROFILE`, if set.
    pub profile: Option<String>,
    /// `None` = admin panel is open (dev mode, same as an unset `API_KEY`).
    pub admin_token: Option<String>,
    /// `None` = API writes are open.
    pub api_key: Option<String>,
    pub seed_demo: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading through `var` instead of the
    /// process environment.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| var(key).filter(|v| !v.is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address, e.g. 0.0.0.0:8080")?;

        Ok(Self {
            bind_addr,
            profile:     non_empty("APP_PROFILE"),
            admin_token: non_empty("ADMIN_TOKEN"),
            api_key:     non_empty("API_KEY"),
            seed_demo:   var("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        })
    }

    /// Whether diagnostic detail may be shown on admin error pages.
    pub fn is_development_mode(&self) -> bool {
        is_development_profile(self.profile.as_deref())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr:   SocketAddr::from(([0, 0, 0, 0], 8080)),
            profile:     None,
            admin_token: None,
            api_key:     None,
            seed_demo:   true,
        }
    }
}

/// `dev` and `development` enable dev mode; anything else, including no
/// profile at all, does not.
pub fn is_development_profile(profile: Option<&str>) -> bool {
    matches!(profile, Some("dev" | "development"))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_config(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = make_config(&[]).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.profile, None);
        assert!(config.seed_demo);
    }

    #[test]
    fn test_from_vars_reads_settings() {
        let config = make_config(&[
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("APP_PROFILE", "dev"),
            ("ADMIN_TOKEN", ""),
            ("API_KEY", "k3y"),
            ("SEED_DEMO", "false"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.is_development_mode());
        assert_eq!(config.admin_token, None);
        assert_eq!(config.api_key.as_deref(), Some("k3y"));
        assert!(!config.seed_demo);
    }

    #[test]
    fn test_malformed_bind_addr_is_rejected() {
        let err = make_config(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert!(err.to_string().starts_with("BIND_ADDR must be a socket address"));
        assert_eq!(err.chain().count(), 2);
    }

    #[test]
    fn test_dev_profiles_enable_development_mode() {
        assert!(is_development_profile(Some("dev")));
        assert!(is_development_profile(Some("development")));
    }

    #[test]
    fn test_other_profiles_disable_development_mode() {
        assert!(!is_development_profile(None));
        assert!(!is_development_profile(Some("prod")));
        assert!(!is_development_profile(Some("")));
        assert!(!is_development_profile(Some("DEV")));
    }

    #[test]
    fn test_config_reads_profile() {
        let config = AppConfig {
            profile: Some("development".to_string()),
            ..AppConfig::default()
        };
        assert!(config.is_development_mode());
        assert!(!AppConfig::default().is_development_mode());
    }
}
