//! JSON Lines dataset I/O
//!
//! Each line is one JSON object (a record). The text field of each record
//! becomes a [`Document`] whose index is the record's line position, so
//! results can be written back into the same record.

use crate::domain::{CuratorError, Document, DocumentBatch, Result};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One JSONL record
pub type Record = Map<String, Value>;

/// Read every non-blank line of a JSONL file as a record
///
/// # Errors
///
/// Returns [`CuratorError::Io`] if the file cannot be read and
/// [`CuratorError::Validation`] for a line that is not a JSON object.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| CuratorError::Io(format!("Failed to open {}: {e}", path.display())))?;

    let mut records = Vec::new();
    for (line_number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(&line) {
            Ok(Value::Object(record)) => records.push(record),
            Ok(_) => {
                return Err(CuratorError::Validation(format!(
                    "{}:{}: expected a JSON object",
                    path.display(),
                    line_number + 1
                )))
            }
            Err(e) => {
                return Err(CuratorError::Validation(format!(
                    "{}:{}: {e}",
                    path.display(),
                    line_number + 1
                )))
            }
        }
    }

    tracing::debug!(path = %path.display(), records = records.len(), "Read JSONL records");
    Ok(records)
}

/// Write records as JSONL, creating parent directories as needed
pub fn write_records(path: impl AsRef<Path>, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), records = records.len(), "Wrote JSONL records");
    Ok(())
}

/// Build a document batch from the text field of each record
///
/// Records whose field is missing or not a string are rejected.
pub fn documents_from_records(records: &[Record], text_field: &str) -> Result<DocumentBatch> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| match record.get(text_field) {
            Some(Value::String(text)) => Ok(Document::new(index as u64, text.clone())),
            Some(_) => Err(CuratorError::Validation(format!(
                "Record {index}: field '{text_field}' is not a string"
            ))),
            None => Err(CuratorError::Validation(format!(
                "Record {index}: missing field '{text_field}'"
            ))),
        })
        .collect::<Result<Vec<_>>>()
        .map(DocumentBatch::new)
}

/// Write each document's text back into its record
pub fn apply_documents(
    records: &mut [Record],
    batch: &DocumentBatch,
    text_field: &str,
) -> Result<()> {
    for document in batch.documents() {
        let record = records.get_mut(document.index as usize).ok_or_else(|| {
            CuratorError::Validation(format!("No record for document {}", document.index))
        })?;
        record.insert(text_field.to_string(), Value::String(document.text.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_write_then_read_preserves_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.jsonl");
        let records = vec![
            record(json!({"id": 1, "text": "Sarah"})),
            record(json!({"id": 2, "text": "Ryan", "meta": {"lang": "en"}})),
        ];

        write_records(&path, &records).unwrap();
        let read = read_records(&path).unwrap();

        assert_eq!(read, records);
    }

    #[test]
    fn test_read_skips_blank_lines_and_rejects_non_objects() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.jsonl");

        fs::write(&path, "{\"text\":\"a\"}\n\n{\"text\":\"b\"}\n").unwrap();
        assert_eq!(read_records(&path).unwrap().len(), 2);

        fs::write(&path, "{\"text\":\"a\"}\n[1,2]\n").unwrap();
        let err = read_records(&path).unwrap_err();
        assert!(err.to_string().contains(":2:"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            read_records("/nonexistent/input.jsonl"),
            Err(CuratorError::Io(_))
        ));
    }

    #[test]
    fn test_documents_round_trip_through_records() {
        let mut records = vec![
            record(json!({"id": "a", "content": "Sarah"})),
            record(json!({"id": "b", "content": "Ryan"})),
        ];

        let batch = documents_from_records(&records, "content").unwrap();
        assert_eq!(batch.texts(), vec!["Sarah", "Ryan"]);
        assert_eq!(batch.indices(), vec![0, 1]);

        let redacted = batch
            .with_texts(vec!["[NAME]".to_string(), "[NAME]".to_string()])
            .unwrap();
        apply_documents(&mut records, &redacted, "content").unwrap();

        assert_eq!(records[0]["content"], "[NAME]");
        assert_eq!(records[1]["id"], "b");
    }

    #[test]
    fn test_missing_text_field_rejected() {
        let records = vec![record(json!({"id": 1}))];
        assert!(matches!(
            documents_from_records(&records, "text"),
            Err(CuratorError::Validation(_))
        ));

        let records = vec![record(json!({"text": 5}))];
        assert!(documents_from_records(&records, "text").is_err());
    }
}
