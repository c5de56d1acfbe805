use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup.
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("ECOLENS_ENV", "development"));
    let bind_addr = parse_addr("ECOLENS_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("ECOLENS_LOG_LEVEL", "info");

    let off_base_url = or_default("ECOLENS_OFF_BASE_URL", "https://world.openfoodfacts.net");
    let off_timeout_secs = parse_u64("ECOLENS_OFF_TIMEOUT_SECS", "30")?;
    let off_user_agent = or_default(
        "ECOLENS_OFF_USER_AGENT",
        "ecolens/0.1 (environmental-scoring)",
    );
    let off_max_retries = parse_u32("ECOLENS_OFF_MAX_RETRIES", "3")?;
    let off_retry_backoff_base_ms = parse_u64("ECOLENS_OFF_RETRY_BACKOFF_BASE_MS", "1000")?;

    let category_page_size = parse_u32("ECOLENS_CATEGORY_PAGE_SIZE", "20")?;
    let top_n = parse_usize("ECOLENS_TOP_N", "3")?;
    let rank_tables_path = lookup("ECOLENS_RANK_TABLES_PATH").ok().map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        off_base_url,
        off_timeout_secs,
        off_user_agent,
        off_max_retries,
        off_retry_backoff_base_ms,
        category_page_size,
        top_n,
        rank_tables_path,
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
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should suffice");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.off_base_url, "https://world.openfoodfacts.net");
        assert_eq!(cfg.off_timeout_secs, 30);
        assert_eq!(cfg.off_user_agent, "ecolens/0.1 (environmental-scoring)");
        assert_eq!(cfg.off_max_retries, 3);
        assert_eq!(cfg.off_retry_backoff_base_ms, 1000);
        assert_eq!(cfg.category_page_size, 20);
        assert_eq!(cfg.top_n, 3);
        assert!(cfg.rank_tables_path.is_none());
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("ECOLENS_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ECOLENS_BIND_ADDR"),
            "expected InvalidEnvVar(ECOLENS_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_top_n() {
        let mut map = HashMap::new();
        map.insert("ECOLENS_TOP_N", "three");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ECOLENS_TOP_N"),
            "expected InvalidEnvVar(ECOLENS_TOP_N), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_overrides_apply() {
        let mut map = HashMap::new();
        map.insert("ECOLENS_OFF_BASE_URL", "http://localhost:9999");
        map.insert("ECOLENS_OFF_MAX_RETRIES", "0");
        map.insert("ECOLENS_CATEGORY_PAGE_SIZE", "50");
        map.insert("ECOLENS_RANK_TABLES_PATH", "./config/rank.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).expect("overrides should parse");
        assert_eq!(cfg.off_base_url, "http://localhost:9999");
        assert_eq!(cfg.off_max_retries, 0);
        assert_eq!(cfg.category_page_size, 50);
        assert_eq!(
            cfg.rank_tables_path.as_deref(),
            Some(std::path::Path::new("./config/rank.yaml"))
        );
    }
}
