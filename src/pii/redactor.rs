//! Text redaction
//!
//! Redaction is occurrence-based: every literal occurrence of a validated
//! entity's text is replaced with its label placeholder (`[NAME]`). Longer
//! entity texts claim their spans first so a shorter entity contained in a
//! longer one cannot fragment it; equal lengths go in list order. Spans are
//! claimed against the original text, so nothing ever matches inside a
//! placeholder written by an earlier entity.

use crate::domain::{CuratorError, EntityList, PiiLabel, Result, ValidatedEntity};

/// A claimed byte range of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span<'a> {
    start: usize,
    end: usize,
    label: &'a PiiLabel,
}

impl Span<'_> {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && self.start < end
    }
}

/// Redact every occurrence of every entity in `text`
///
/// # Examples
///
/// ```
/// use pii_curator::domain::{CandidateEntity, PiiLabel};
/// use pii_curator::pii::{redact, EntityValidator};
///
/// let source = "Contact Sarah Connor now";
/// let validator = EntityValidator::new(vec![PiiLabel::new("name").unwrap()]);
/// let entities = validator.validate_all(
///     vec![
///         CandidateEntity::new("name", "Sarah"),
///         CandidateEntity::new("name", "Sarah Connor"),
///     ],
///     source,
/// );
///
/// assert_eq!(redact(source, &entities), "Contact [NAME] now");
/// ```
pub fn redact(text: &str, entities: &[ValidatedEntity]) -> String {
    if entities.is_empty() {
        return text.to_string();
    }

    let spans = claim_spans(text, entities);

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        output.push_str(&text[cursor..span.start]);
        output.push_str(&span.label.placeholder());
        cursor = span.end;
    }
    output.push_str(&text[cursor..]);

    output
}

/// Redact each text with its entity list, preserving order
///
/// # Errors
///
/// Returns [`CuratorError::Validation`] if the two slices differ in length.
pub fn batch_redact(texts: &[String], entity_lists: &[EntityList]) -> Result<Vec<String>> {
    if texts.len() != entity_lists.len() {
        return Err(CuratorError::Validation(format!(
            "Cannot redact {} texts with {} entity lists",
            texts.len(),
            entity_lists.len()
        )));
    }

    Ok(texts
        .iter()
        .zip(entity_lists)
        .map(|(text, entities)| redact(text, entities))
        .collect())
}

/// Non-overlapping spans sorted by start offset
fn claim_spans<'a>(text: &str, entities: &'a [ValidatedEntity]) -> Vec<Span<'a>> {
    // Stable sort keeps list order among equal lengths
    let mut order: Vec<&ValidatedEntity> = entities.iter().collect();
    order.sort_by(|a, b| b.text().chars().count().cmp(&a.text().chars().count()));

    let mut spans: Vec<Span<'a>> = Vec::new();
    for entity in order {
        let needle = entity.text();
        if needle.is_empty() {
            continue;
        }

        for (start, matched) in text.match_indices(needle) {
            let end = start + matched.len();
            if spans.iter().any(|span| span.overlaps(start, end)) {
                continue;
            }
            spans.push(Span {
                start,
                end,
                label: entity.label(),
            });
        }
    }

    spans.sort_by_key(|span| span.start);
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateEntity;
    use crate::pii::EntityValidator;
    use fake::faker::lorem::en::Paragraph;
    use fake::Fake;

    fn entities(source: &str, pairs: &[(&str, &str)]) -> EntityList {
        let validator = EntityValidator::new(
            ["name", "email", "location"]
                .iter()
                .map(|l| PiiLabel::new(*l).unwrap())
                .collect(),
        );
        let candidates = pairs
            .iter()
            .map(|(label, text)| CandidateEntity::new(*label, *text));
        let list = validator.validate_all(candidates, source);
        assert_eq!(list.len(), pairs.len(), "fixture entity failed validation");
        list
    }

    #[test]
    fn test_redacts_each_entity() {
        let source = "Sarah and Ryan went out to play";
        let list = entities(source, &[("name", "Sarah"), ("name", "Ryan")]);
        assert_eq!(redact(source, &list), "[NAME] and [NAME] went out to play");
    }

    #[test]
    fn test_longer_match_applied_first() {
        let source = "Contact Sarah Connor now";
        let list = entities(source, &[("name", "Sarah"), ("name", "Sarah Connor")]);
        assert_eq!(redact(source, &list), "Contact [NAME] now");
    }

    #[test]
    fn test_shorter_entity_still_redacts_standalone_occurrences() {
        let source = "Sarah Connor met Sarah";
        let list = entities(source, &[("name", "Sarah"), ("name", "Sarah Connor")]);
        assert_eq!(redact(source, &list), "[NAME] met [NAME]");
    }

    #[test]
    fn test_every_occurrence_redacted() {
        let source = "Ryan, Ryan, and Ryan";
        let list = entities(source, &[("name", "Ryan")]);
        assert_eq!(redact(source, &list), "[NAME], [NAME], and [NAME]");
    }

    #[test]
    fn test_equal_length_overlap_uses_list_order() {
        let source = "abcd";
        let list = entities(source, &[("location", "abc"), ("name", "bcd")]);
        assert_eq!(redact(source, &list), "[LOCATION]d");

        let reversed = entities(source, &[("name", "bcd"), ("location", "abc")]);
        assert_eq!(redact(source, &reversed), "a[NAME]");
    }

    #[test]
    fn test_entity_text_matching_placeholder_is_not_rewritten() {
        let source = "NAME: Sarah";
        let list = entities(source, &[("name", "Sarah"), ("email", "NAME")]);
        assert_eq!(redact(source, &list), "[EMAIL]: [NAME]");
    }

    #[test]
    fn test_duplicate_entities_are_harmless() {
        let source = "mail bob@example.com now";
        let list = entities(
            source,
            &[("email", "bob@example.com"), ("email", "bob@example.com")],
        );
        assert_eq!(redact(source, &list), "mail [EMAIL] now");
    }

    #[test]
    fn test_multibyte_text() {
        let source = "Zoë lives in Zürich";
        let list = entities(source, &[("name", "Zoë"), ("location", "Zürich")]);
        assert_eq!(redact(source, &list), "[NAME] lives in [LOCATION]");
    }

    #[test]
    fn test_empty_entity_list_is_identity() {
        for _ in 0..20 {
            let text: String = Paragraph(1..4).fake();
            assert_eq!(redact(&text, &[]), text);
        }
        assert_eq!(redact("", &[]), "");
    }

    #[test]
    fn test_batch_redact_aligns_pairs() {
        let texts = vec!["Sarah".to_string(), "nobody here".to_string()];
        let lists = vec![entities("Sarah", &[("name", "Sarah")]), Vec::new()];

        let redacted = batch_redact(&texts, &lists).unwrap();
        assert_eq!(redacted, vec!["[NAME]", "nobody here"]);
    }

    #[test]
    fn test_batch_redact_rejects_mismatch() {
        let texts = vec!["a".to_string()];
        assert!(matches!(
            batch_redact(&texts, &[]),
            Err(CuratorError::Validation(_))
        ));
    }
}
