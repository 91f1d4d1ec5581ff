/// Application-level constants
pub const APP_NAME: &str = "HealthGuard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Analysis and chat model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_AI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 120;

/// Low temperature for analytical consistency.
pub const ANALYSIS_TEMPERATURE: f32 = 0.2;

/// Prior chat turns sent with each request.
pub const CHAT_HISTORY_WINDOW: usize = 10;

const ENV_API_KEY: &str = "HEALTHGUARD_API_KEY";
const ENV_API_KEY_FALLBACK: &str = "API_KEY";
const ENV_MODEL: &str = "HEALTHGUARD_MODEL";
const ENV_AI_URL: &str = "HEALTHGUARD_AI_URL";
const ENV_AI_TIMEOUT: &str = "HEALTHGUARD_AI_TIMEOUT_SECS";

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "healthguard=info,healthguard_lib=info,reqwest=warn"
}

/// AI endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    /// Missing is not an error here; the client reports it on first use.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_AI_URL.to_string(),
            timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
        }
    }
}

impl AiConfig {
    /// Read `HEALTHGUARD_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_secs = match non_blank(ENV_AI_TIMEOUT) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid {ENV_AI_TIMEOUT}, using default");
                defaults.timeout_secs
            }),
            None => defaults.timeout_secs,
        };

        Self {
            api_key: non_blank(ENV_API_KEY).or_else(|| non_blank(ENV_API_KEY_FALLBACK)),
            model: non_blank(ENV_MODEL).unwrap_or(defaults.model),
            base_url: non_blank(ENV_AI_URL).unwrap_or(defaults.base_url),
            timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn app_name_is_healthguard() {
        assert_eq!(APP_NAME, "HealthGuard");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn defaults_without_env() {
        let config = AiConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AiConfig::default());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn primary_key_wins_over_fallback() {
        let config = AiConfig::from_lookup(lookup(&[
            ("HEALTHGUARD_API_KEY", "primary"),
            ("API_KEY", "fallback"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let config = AiConfig::from_lookup(lookup(&[("HEALTHGUARD_API_KEY", " "), ("API_KEY", "fallback")]));
        assert_eq!(config.api_key.as_deref(), Some("fallback"));
    }

    #[test]
    fn overrides_are_read() {
        let config = AiConfig::from_lookup(lookup(&[
            ("HEALTHGUARD_MODEL", "gemini-2.0-flash"),
            ("HEALTHGUARD_AI_URL", "http://localhost:9000"),
            ("HEALTHGUARD_AI_TIMEOUT_SECS", "30"),
        ]));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn invalid_timeout_falls_back() {
        let config = AiConfig::from_lookup(lookup(&[("HEALTHGUARD_AI_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.timeout_secs, DEFAULT_AI_TIMEOUT_SECS);
    }

    #[test]
    fn log_filter_targets_crate() {
        assert!(default_log_filter().contains("healthguard"));
    }
}
