//! Redaction run reporting
//!
//! Aggregates entity statistics across batches for the CLI summary and for
//! dry runs, where entities are detected but text is left untouched.

use crate::domain::EntityList;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Report of a redaction run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionReport {
    /// Whether text was left untouched
    pub dry_run: bool,

    /// Model used for detection
    pub model: String,

    /// Batches processed
    pub batches: usize,

    /// Documents processed
    pub total_documents: usize,

    /// Documents with at least one entity
    pub documents_with_pii: usize,

    /// Documents with no entities
    pub documents_without_pii: usize,

    /// Validated entities across all documents
    pub total_entities: usize,

    /// Entity count per label
    pub entities_by_label: BTreeMap<String, usize>,

    /// Configuration warnings raised for this run
    pub warnings: Vec<String>,

    /// Wall-clock time spent in batches (ms)
    pub total_duration_ms: u64,
}

impl RedactionReport {
    /// Create an empty report
    pub fn new(model: impl Into<String>, dry_run: bool) -> Self {
        Self {
            dry_run,
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add the entity lists of one processed batch
    pub fn add_batch(&mut self, entity_lists: &[EntityList], duration_ms: u64) {
        self.batches += 1;
        self.total_duration_ms += duration_ms;

        for entities in entity_lists {
            self.total_documents += 1;
            if entities.is_empty() {
                self.documents_without_pii += 1;
                continue;
            }

            self.documents_with_pii += 1;
            self.total_entities += entities.len();
            for entity in entities {
                *self
                    .entities_by_label
                    .entry(entity.label().as_str().to_string())
                    .or_insert(0) += 1;
            }
        }
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Average time per document (ms)
    pub fn avg_document_ms(&self) -> u64 {
        if self.total_documents == 0 {
            0
        } else {
            self.total_duration_ms / self.total_documents as u64
        }
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let rule = "───────────────────────────────────────────────────────────────\n";
        let banner = "═══════════════════════════════════════════════════════════════\n";
        let title = if self.dry_run {
            "                  PII DETECTION DRY-RUN REPORT                 \n"
        } else {
            "                     PII REDACTION REPORT                      \n"
        };

        let mut output = String::new();
        output.push('\n');
        output.push_str(banner);
        output.push_str(title);
        output.push_str(banner);
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str(rule);
        output.push_str(&format!("  Model:                    {}\n", self.model));
        output.push_str(&format!("  Batches Processed:        {}\n", self.batches));
        output.push_str(&format!("  Documents Processed:      {}\n", self.total_documents));
        output.push_str(&format!("  Documents with PII:       {}\n", self.documents_with_pii));
        output.push_str(&format!("  Documents without PII:    {}\n", self.documents_without_pii));
        output.push_str(&format!("  Total Entities Detected:  {}\n", self.total_entities));
        output.push_str(&format!("  Avg Time per Document:    {} ms\n", self.avg_document_ms()));
        output.push('\n');

        if !self.entities_by_label.is_empty() {
            output.push_str("🔍 ENTITIES BY LABEL\n");
            output.push_str(rule);

            let mut labels: Vec<_> = self.entities_by_label.iter().collect();
            labels.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

            for (label, count) in labels {
                output.push_str(&format!("  {label:30} {count:>5}\n"));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str(rule);
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str(banner);
        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON report to a file
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PiiLabel, ValidatedEntity};

    fn entity(label: &str, text: &str) -> ValidatedEntity {
        ValidatedEntity::new(PiiLabel::new(label).unwrap(), text.to_string())
    }

    #[test]
    fn test_empty_report() {
        let report = RedactionReport::new("m", false);
        assert_eq!(report.total_documents, 0);
        assert_eq!(report.avg_document_ms(), 0);
        assert!(report.entities_by_label.is_empty());
    }

    #[test]
    fn test_add_batch_counts() {
        let mut report = RedactionReport::new("m", false);
        report.add_batch(
            &[
                vec![entity("name", "Sarah"), entity("name", "Ryan")],
                vec![],
                vec![entity("email", "a@b.c")],
            ],
            30,
        );

        assert_eq!(report.batches, 1);
        assert_eq!(report.total_documents, 3);
        assert_eq!(report.documents_with_pii, 2);
        assert_eq!(report.documents_without_pii, 1);
        assert_eq!(report.total_entities, 3);
        assert_eq!(report.entities_by_label.get("name"), Some(&2));
        assert_eq!(report.avg_document_ms(), 10);
    }

    #[test]
    fn test_format_console() {
        let mut report = RedactionReport::new("meta/llama-3.1-70b-instruct", true);
        report.add_batch(&[vec![entity("name", "Sarah")]], 5);
        report.add_warning("Language 'fr' is not English");

        let output = report.format_console();
        assert!(output.contains("PII DETECTION DRY-RUN REPORT"));
        assert!(output.contains("Documents Processed:      1"));
        assert!(output.contains("name"));
        assert!(output.contains("Language 'fr'"));
        assert!(!output.contains("Sarah"));
    }

    #[test]
    fn test_format_json() {
        let mut report = RedactionReport::new("m", false);
        report.add_batch(&[vec![entity("name", "Sarah")]], 5);

        let json: serde_json::Value =
            serde_json::from_str(&report.format_json().unwrap()).unwrap();
        assert_eq!(json["total_entities"], 1);
        assert_eq!(json["entities_by_label"]["name"], 1);
    }
}
