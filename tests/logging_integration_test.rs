//! Integration tests for logging functionality

use pii_curator::config::LoggingConfig;
use pii_curator::domain::CuratorError;
use pii_curator::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "./logs");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let result = init_logging("chatty", &LoggingConfig::default());
    assert!(matches!(result, Err(CuratorError::Configuration(_))));
}

#[test]
fn test_file_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    tracing::info!(documents = 3, "Redaction batch complete");
    drop(guard);

    assert!(log_path.exists());
    assert!(log_path.join("pii-curator.log").exists());
}
