//! PII entity data models
//!
//! Candidate entities come straight off the wire from the model. Validated
//! entities can only be produced by [`EntityValidator`](crate::pii::EntityValidator),
//! which makes them the only kind the redactor will act on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// PII label newtype wrapper
///
/// A member of the configured label enumeration (e.g. `name`, `email`).
///
/// # Examples
///
/// ```
/// use pii_curator::domain::PiiLabel;
///
/// let label = PiiLabel::new("email").unwrap();
/// assert_eq!(label.placeholder(), "[EMAIL]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PiiLabel(String);

impl PiiLabel {
    /// Creates a new label, trimming surrounding whitespace
    pub fn new(label: impl Into<String>) -> Result<Self, String> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err("PII label cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the label as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholder written in place of redacted text, e.g. `[NAME]`
    pub fn placeholder(&self) -> String {
        format!("[{}]", self.0.to_uppercase())
    }
}

impl fmt::Display for PiiLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PiiLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PiiLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PiiLabel> for String {
    fn from(label: PiiLabel) -> Self {
        label.0
    }
}

impl AsRef<str> for PiiLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Entity as claimed by the model, before validation
///
/// Both `text` and the older `entity_text` spelling are accepted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntity {
    /// Claimed label
    pub entity_type: String,
    /// Claimed verbatim text
    #[serde(alias = "entity_text")]
    pub text: String,
}

impl CandidateEntity {
    /// Create a new candidate
    pub fn new(entity_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            text: text.into(),
        }
    }
}

/// Entity that passed validation against its source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedEntity {
    label: PiiLabel,
    text: String,
}

impl ValidatedEntity {
    pub(crate) fn new(label: PiiLabel, text: String) -> Self {
        Self { label, text }
    }

    /// Label of the entity
    pub fn label(&self) -> &PiiLabel {
        &self.label
    }

    /// Verbatim text of the entity as it appears in the source
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Validated entities for one document, in the order the model reported them
pub type EntityList = Vec<ValidatedEntity>;
