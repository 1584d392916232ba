//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CuratorConfig;
use super::secret::secret_string_opt;
use crate::domain::errors::CuratorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables that override file values
pub const ENV_PREFIX: &str = "PII_CURATOR_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CuratorConfig
/// 4. Applies environment variable overrides (PII_CURATOR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`CuratorError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use pii_curator::config::load_config;
///
/// let config = load_config("pii-curator.toml").expect("Failed to load config");
/// println!("Endpoint: {}", config.pii.base_url);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CuratorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CuratorError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CuratorError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text, with substitution, overrides, and validation
pub fn parse_config(contents: &str) -> Result<CuratorConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CuratorConfig = toml::from_str(&contents)
        .map_err(|e| CuratorError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CuratorError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left alone. Every missing variable is reported at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CuratorError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CuratorError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_override(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

/// Applies environment variable overrides using the PII_CURATOR_* prefix
///
/// Variables follow the pattern PII_CURATOR_<SECTION>_<KEY>, for example
/// PII_CURATOR_PII_BASE_URL or PII_CURATOR_APPLICATION_LOG_LEVEL.
fn apply_env_overrides(config: &mut CuratorConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_override("APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().map_err(|_| {
            CuratorError::Configuration(format!("Invalid {ENV_PREFIX}APPLICATION_DRY_RUN: {val}"))
        })?;
    }

    // PII overrides
    if let Some(val) = env_override("PII_BASE_URL") {
        config.pii.base_url = val;
    }
    if let Some(val) = env_override("PII_API_KEY") {
        // An empty value clears a key set in the file
        config.pii.api_key = secret_string_opt(Some(val).filter(|v| !v.trim().is_empty()));
    }
    if let Some(val) = env_override("PII_MODEL") {
        config.pii.model = val;
    }
    if let Some(val) = env_override("PII_LANGUAGE") {
        config.pii.language = val;
    }
    if let Some(val) = env_override("PII_MAX_CONCURRENT_REQUESTS") {
        config.pii.max_concurrent_requests = match val.trim().to_lowercase().as_str() {
            "" | "none" | "unbounded" => None,
            other => Some(other.parse().map_err(|_| {
                CuratorError::Configuration(format!(
                    "Invalid {ENV_PREFIX}PII_MAX_CONCURRENT_REQUESTS: {val}"
                ))
            })?),
        };
    }
    if let Some(val) = env_override("PII_TIMEOUT_SECONDS") {
        config.pii.timeout_seconds = val.trim().parse().map_err(|_| {
            CuratorError::Configuration(format!("Invalid {ENV_PREFIX}PII_TIMEOUT_SECONDS: {val}"))
        })?;
    }

    // Logging overrides
    if let Some(val) = env_override("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Serializes tests that touch the process environment
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_substitute_env_vars() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("LOADER_TEST_KEY", "nvapi-xyz");
        let input = "api_key = \"${LOADER_TEST_KEY}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"nvapi-xyz\"\n");
        std::env::remove_var("LOADER_TEST_KEY");
    }

    #[test]
    fn test_substitute_env_vars_reports_all_missing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("LOADER_MISSING_A");
        std::env::remove_var("LOADER_MISSING_B");
        let input = "a = \"${LOADER_MISSING_A}\"\nb = \"${LOADER_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("LOADER_MISSING_A"));
        assert!(err.contains("LOADER_MISSING_B"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# api_key = \"${LOADER_ONLY_IN_COMMENT}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${LOADER_ONLY_IN_COMMENT}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(CuratorError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let toml_content = r#"
[application]
log_level = "debug"

[pii]
base_url = "http://0.0.0.0:8000/v1"
api_key = "secret-key"
model = "meta/llama-3.1-70b-instruct"
pii_labels = ["name", "email"]
max_concurrent_requests = 10
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.pii.base_url, "http://0.0.0.0:8000/v1");
        assert_eq!(config.pii.pii_labels, vec!["name", "email"]);
        assert_eq!(config.pii.max_concurrent_requests, Some(10));
        assert_eq!(
            config.pii.api_key.as_ref().unwrap().expose_secret(),
            "secret-key"
        );
    }

    #[test]
    fn test_env_override_unbounded_concurrency() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("PII_CURATOR_PII_MAX_CONCURRENT_REQUESTS", "unbounded");
        let result = parse_config(
            r#"
[pii]
base_url = "http://localhost:8000/v1"
max_concurrent_requests = 4
"#,
        );
        std::env::remove_var("PII_CURATOR_PII_MAX_CONCURRENT_REQUESTS");

        assert_eq!(result.unwrap().pii.max_concurrent_requests, None);
    }

    #[test]
    fn test_empty_api_key_override_clears_key() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("PII_CURATOR_PII_API_KEY", "");
        let result = parse_config(
            r#"
[pii]
base_url = "http://localhost:8000/v1"
api_key = "from-file"
"#,
        );
        std::env::remove_var("PII_CURATOR_PII_API_KEY");

        assert!(result.unwrap().pii.api_key.is_none());
    }

    #[test]
    fn test_unparsable_timeout_override_is_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var("PII_CURATOR_PII_TIMEOUT_SECONDS", "soon");
        let result = parse_config(
            r#"
[pii]
base_url = "http://localhost:8000/v1"
"#,
        );
        std::env::set_var("PII_CURATOR_PII_TIMEOUT_SECONDS", "45");
        let overridden = parse_config(
            r#"
[pii]
base_url = "http://localhost:8000/v1"
"#,
        );
        std::env::remove_var("PII_CURATOR_PII_TIMEOUT_SECONDS");

        let err = result.unwrap_err();
        assert!(matches!(err, CuratorError::Configuration(_)));
        assert!(err.to_string().contains("PII_TIMEOUT_SECONDS"));
        assert_eq!(overridden.unwrap().pii.timeout_seconds, 45);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let result = parse_config(
            r#"
[pii]
base_url = "http://localhost:8000/v1"
max_concurrent_requests = 0
"#,
        );
        assert!(matches!(result, Err(CuratorError::Configuration(_))));
    }
}
