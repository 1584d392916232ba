//! Redaction audit log
//!
//! One JSON line per document that had entities redacted. Entity values are
//! written as SHA-256 hashes; plaintext PII never reaches the log.

use crate::config::AuditConfig;
use crate::domain::{CuratorError, Result, ValidatedEntity};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    timestamp: String,
    document_index: u64,
    model: &'a str,
    entity_count: usize,
    entities: Vec<AuditEntity<'a>>,
}

/// Audited entity (hashed value)
#[derive(Debug, Serialize)]
struct AuditEntity<'a> {
    label: &'a str,
    value_hash: String,
}

/// Audit logger for redactions
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory when enabled
    pub fn new(log_path: impl Into<PathBuf>, enabled: bool) -> Result<Self> {
        let log_path = log_path.into();
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CuratorError::Io(format!(
                        "Failed to create audit log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Self { log_path, enabled })
    }

    /// Build from configuration
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Record the entities redacted from one document
    ///
    /// Every document gets a line, including those with no entities.
    pub fn log_document(
        &self,
        document_index: u64,
        model: &str,
        entities: &[ValidatedEntity],
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            document_index,
            model,
            entity_count: entities.len(),
            entities: entities
                .iter()
                .map(|entity| AuditEntity {
                    label: entity.label().as_str(),
                    value_hash: hash_value(entity.text()),
                })
                .collect(),
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                CuratorError::Io(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        let line = serde_json::to_string(&entry)?;
        writeln!(file, "{line}")?;

        Ok(())
    }
}

/// SHA-256 of a value, lowercase hex
fn hash_value(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    format!("{digest:x}")
}
