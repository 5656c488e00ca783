use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid. Missing API keys are not an
/// error here; their absence is reported per-request by the HTTP surface.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files — useful for testing or when the
/// caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("NEWSBRIEF_ENV", "development"));
    let bind_addr = parse_addr("NEWSBRIEF_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("NEWSBRIEF_LOG_LEVEL", "info");

    let newsapi_key = lookup("NEWSAPI_KEY").ok().filter(|k| !k.is_empty());
    let anthropic_api_key = lookup("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty());

    let news_timeout_secs = parse_u64("NEWSBRIEF_NEWS_TIMEOUT_SECS", "10")?;
    let summary_timeout_secs = parse_u64("NEWSBRIEF_SUMMARY_TIMEOUT_SECS", "30")?;
    let page_size = parse_u32("NEWSBRIEF_PAGE_SIZE", "5")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSBRIEF_PAGE_SIZE".to_string(),
            reason: "must be a positive integer".to_string(),
        });
    }
    let claude_model = or_default("NEWSBRIEF_CLAUDE_MODEL", "claude-sonnet-4-20250514");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        newsapi_key,
        anthropic_api_key,
        news_timeout_secs,
        summary_timeout_secs,
        page_size,
        claude_model,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("empty env should be valid");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.newsapi_key.is_none());
        assert!(cfg.anthropic_api_key.is_none());
        assert_eq!(cfg.news_timeout_secs, 10);
        assert_eq!(cfg.summary_timeout_secs, 30);
        assert_eq!(cfg.page_size, 5);
        assert_eq!(cfg.claude_model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn build_app_config_reads_api_keys() {
        let mut map = HashMap::new();
        map.insert("NEWSAPI_KEY", "news-secret");
        map.insert("ANTHROPIC_API_KEY", "claude-secret");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.newsapi_key.as_deref(), Some("news-secret"));
        assert_eq!(cfg.anthropic_api_key.as_deref(), Some("claude-secret"));
    }

    #[test]
    fn build_app_config_treats_empty_keys_as_absent() {
        let mut map = HashMap::new();
        map.insert("NEWSAPI_KEY", "");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert!(cfg.newsapi_key.is_none());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("NEWSBRIEF_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSBRIEF_BIND_ADDR"),
            "expected InvalidEnvVar(NEWSBRIEF_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_news_timeout() {
        let mut map = HashMap::new();
        map.insert("NEWSBRIEF_NEWS_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSBRIEF_NEWS_TIMEOUT_SECS"),
            "expected InvalidEnvVar(NEWSBRIEF_NEWS_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_page_size() {
        let mut map = HashMap::new();
        map.insert("NEWSBRIEF_PAGE_SIZE", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSBRIEF_PAGE_SIZE"),
            "expected InvalidEnvVar(NEWSBRIEF_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_page_size_override() {
        let mut map = HashMap::new();
        map.insert("NEWSBRIEF_PAGE_SIZE", "12");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.page_size, 12);
    }

    #[test]
    fn app_config_debug_redacts_credentials() {
        let mut map = HashMap::new();
        map.insert("NEWSAPI_KEY", "news-secret");
        map.insert("ANTHROPIC_API_KEY", "claude-secret");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("news-secret"), "debug leaked: {debug}");
        assert!(!debug.contains("claude-secret"), "debug leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
