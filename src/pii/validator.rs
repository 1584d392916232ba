//! Entity validation
//!
//! The endpoint returns entities by value rather than by reliable offset, so
//! literal substring containment is the trust boundary: anything the model
//! claims that is not verbatim in the source, or carries a label outside the
//! configured set, is dropped before it can reach the redactor.

use crate::domain::{CandidateEntity, EntityList, PiiLabel, ValidatedEntity};

/// Validates candidate entities against the configured label set
#[derive(Debug, Clone)]
pub struct EntityValidator {
    labels: Vec<PiiLabel>,
}

impl EntityValidator {
    /// Create a validator for a label set
    pub fn new(labels: Vec<PiiLabel>) -> Self {
        Self { labels }
    }

    /// Labels this validator accepts
    pub fn labels(&self) -> &[PiiLabel] {
        &self.labels
    }

    /// Validate one candidate against its source text
    ///
    /// Returns `None` if the label is not configured, the text is blank, or
    /// the text does not occur verbatim in `source_text`.
    pub fn validate(
        &self,
        candidate: &CandidateEntity,
        source_text: &str,
    ) -> Option<ValidatedEntity> {
        let entity_type = candidate.entity_type.trim();
        let label = self.labels.iter().find(|l| l.as_str() == entity_type)?;

        if candidate.text.trim().is_empty() || !source_text.contains(candidate.text.as_str()) {
            return None;
        }

        Some(ValidatedEntity::new(label.clone(), candidate.text.clone()))
    }

    /// Whether a candidate would pass [`validate`](Self::validate)
    pub fn is_valid(&self, candidate: &CandidateEntity, source_text: &str) -> bool {
        self.validate(candidate, source_text).is_some()
    }

    /// Validate a sequence of candidates, keeping only those that pass, in order
    pub fn validate_all<I>(&self, candidates: I, source_text: &str) -> EntityList
    where
        I: IntoIterator<Item = CandidateEntity>,
    {
        candidates
            .into_iter()
            .filter_map(|candidate| {
                let validated = self.validate(&candidate, source_text);
                if validated.is_none() {
                    tracing::debug!(
                        entity_type = %candidate.entity_type,
                        "Dropping entity that failed validation"
                    );
                }
                validated
            })
            .collect()
    }
}
