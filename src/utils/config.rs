use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:4173";
pub const DEFAULT_THEME_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_THEME_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct ThemeConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
    pub session_ttl_secs: u64, // Idle time before a session is dropped
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .context("PORT not set")?
            .parse::<u16>()
            .context("PORT is not a valid port number")?;

        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| String::from("127.0.0.1"));

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let session_ttl_secs = match lookup("SESSION_TTL_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SESSION_TTL_SECS is not a number")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        let timeout_secs = match lookup("THEME_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("THEME_TIMEOUT_SECS is not a number")?,
            None => 30,
        };

        let theme = ThemeConfig {
            api_key: lookup("THEME_API_KEY").filter(|key| !key.is_empty()),
            base_url: lookup("THEME_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_THEME_API_BASE_URL.to_string()),
            model: lookup("THEME_MODEL").unwrap_or_else(|| DEFAULT_THEME_MODEL.to_string()),
            timeout_secs,
        };

        Ok(Self {
            port,
            bind_address,
            allowed_origins,
            session_ttl_secs,
            theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn port_is_required() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains("PORT not set"));
    }

    #[test]
    fn defaults_fill_the_rest() {
        let cfg = config(&[("PORT", "8080")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bind_address, "127.0.0.1");
        assert_eq!(
            cfg.allowed_origins,
            vec!["http://localhost:5173", "http://localhost:4173"]
        );
        assert_eq!(cfg.theme.api_key, None);
        assert_eq!(cfg.theme.model, DEFAULT_THEME_MODEL);
        assert_eq!(cfg.theme.timeout_secs, 30);
        assert_eq!(cfg.session_ttl_secs, DEFAULT_SESSION_TTL_SECS);
    }

    #[test]
    fn overrides_are_read() {
        let cfg = config(&[
            ("PORT", "9000"),
            ("ALLOWED_ORIGINS", "https://a.test, https://b.test,"),
            ("THEME_API_KEY", "secret"),
            ("THEME_TIMEOUT_SECS", "5"),
            ("SESSION_TTL_SECS", "600"),
        ])
        .unwrap();
        assert_eq!(cfg.session_ttl_secs, 600);
        assert_eq!(cfg.allowed_origins, vec!["https://a.test", "https://b.test"]);
        assert_eq!(cfg.theme.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.theme.timeout_secs, 5);
    }

    #[test]
    fn bad_session_ttl_is_an_error() {
        let err = config(&[("PORT", "8080"), ("SESSION_TTL_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("SESSION_TTL_SECS"));
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(config(&[("PORT", "not-a-port")]).is_err());
    }
}
