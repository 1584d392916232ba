//! Document domain model
//!
//! A document is a row of the upstream batch: a stable index plus its text.
//! Position inside a [`DocumentBatch`] is identity and is never permuted.

use serde::{Deserialize, Serialize};

/// A single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable row index supplied by the caller
    pub index: u64,

    /// UTF-8 document text
    pub text: String,
}

impl Document {
    /// Create a new document
    pub fn new(index: u64, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Ordered batch of documents (one partition of the upstream dataset)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBatch {
    documents: Vec<Document>,
}

impl DocumentBatch {
    /// Create a batch from documents
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Create a batch from texts, indexing them from zero
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Document::new(i as u64, text))
            .collect();
        Self { documents }
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the batch has no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in batch order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Texts in batch order
    pub fn texts(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.text.clone()).collect()
    }

    /// Row indices in batch order
    pub fn indices(&self) -> Vec<u64> {
        self.documents.iter().map(|d| d.index).collect()
    }

    /// Build a new batch with the same indices and replacement texts
    ///
    /// Fails if the number of texts differs from the number of documents.
    pub fn with_texts(&self, texts: Vec<String>) -> Result<Self, String> {
        if texts.len() != self.documents.len() {
            return Err(format!(
                "Expected {} texts to align with batch, got {}",
                self.documents.len(),
                texts.len()
            ));
        }

        let documents = self
            .documents
            .iter()
            .zip(texts)
            .map(|(doc, text)| Document::new(doc.index, text))
            .collect();
        Ok(Self { documents })
    }

    /// Consume the batch and return its documents
    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}

impl From<Vec<Document>> for DocumentBatch {
    fn from(documents: Vec<Document>) -> Self {
        Self::new(documents)
    }
}

impl IntoIterator for DocumentBatch {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_texts_indexes_from_zero() {
        let batch = DocumentBatch::from_texts(["a", "b", "c"]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.indices(), vec![0, 1, 2]);
        assert_eq!(batch.texts(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_with_texts_keeps_indices() {
        let batch = DocumentBatch::new(vec![Document::new(7, "x"), Document::new(3, "y")]);
        let replaced = batch
            .with_texts(vec!["X".to_string(), "Y".to_string()])
            .unwrap();

        assert_eq!(replaced.indices(), vec![7, 3]);
        assert_eq!(replaced.texts(), vec!["X", "Y"]);
    }

    #[test]
    fn test_with_texts_rejects_length_mismatch() {
        let batch = DocumentBatch::from_texts(["a", "b"]);
        assert!(batch.with_texts(vec!["only one".to_string()]).is_err());
    }
}
