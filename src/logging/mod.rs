//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Human-readable console output
//! - Optional JSON log files with rotation
//! - `RUST_LOG` overrides the configured level
//!
//! # Example
//!
//! ```no_run
//! use pii_curator::logging::init_logging;
//! use pii_curator::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::error!(error = "Endpoint unreachable", "Batch failed");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a batch
///
/// # Example
///
/// ```no_run
/// use pii_curator::log_batch_start;
///
/// log_batch_start!("llm_pii_modifier", 128);
/// ```
#[macro_export]
macro_rules! log_batch_start {
    ($stage:expr, $documents:expr) => {
        tracing::info!(stage = %$stage, documents = $documents, "Starting batch");
    };
}

/// Log the completion of a batch
///
/// # Example
///
/// ```no_run
/// use pii_curator::log_batch_complete;
///
/// log_batch_complete!("llm_pii_modifier", 128, 5_400u64);
/// ```
#[macro_export]
macro_rules! log_batch_complete {
    ($stage:expr, $documents:expr, $duration_ms:expr) => {
        tracing::info!(
            stage = %$stage,
            documents = $documents,
            duration_ms = $duration_ms,
            "Batch completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use pii_curator::log_error_with_context;
/// use pii_curator::domain::CuratorError;
///
/// let error = CuratorError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
