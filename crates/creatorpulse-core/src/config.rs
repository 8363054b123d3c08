use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("CREATORPULSE_ENV", "development"));

    let bind_addr = parse_addr("CREATORPULSE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CREATORPULSE_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("CREATORPULSE_DATA_DIR", "./data/creators"));
    let categories_path = PathBuf::from(or_default(
        "CREATORPULSE_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));

    let generator_base_url = or_default(
        "CREATORPULSE_GENERATOR_BASE_URL",
        "https://api.openai.com/v1",
    );
    let generator_model = or_default("CREATORPULSE_GENERATOR_MODEL", "gpt-4o-mini");
    let generator_timeout_secs = parse_u64("CREATORPULSE_GENERATOR_TIMEOUT_SECS", "60")?;
    let generator_api_key = lookup("OPENAI_API_KEY").ok();

    let target_followers = parse_u64("CREATORPULSE_TARGET_FOLLOWERS", "10000")?;
    let min_evidence_posts = parse_usize("CREATORPULSE_MIN_EVIDENCE_POSTS", "3")?;
    let sample_posts_limit = parse_usize("CREATORPULSE_SAMPLE_POSTS_LIMIT", "5")?;

    if target_followers == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "CREATORPULSE_TARGET_FOLLOWERS".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        categories_path,
        generator_base_url,
        generator_model,
        generator_timeout_secs,
        generator_api_key,
        target_followers,
        min_evidence_posts,
        sample_posts_limit,
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
