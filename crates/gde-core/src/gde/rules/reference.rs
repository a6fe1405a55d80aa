//! Archive identifier extraction from reference text.

use serde::{Deserialize, Serialize};

use super::patterns::{ARCHIVE_NUMBER, SIGEA_NUMBER, SITA_NUMBER};
use super::FieldExtractor;

/// Shape of an archive identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Dashed numeric triplet, `NNNNN-N[N]-NNNN`.
    Sigea,
    /// Fixed-token code, `NNNNNSITANNNNNN[A-Z]`.
    Sita,
}

/// An archive identifier found in reference text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceId {
    pub kind: ReferenceKind,
    pub value: String,
    /// Byte offsets of the match in the source text.
    pub start: usize,
    pub end: usize,
}

/// Reference identifier extractor.
pub struct ReferenceExtractor;

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Shape of a single identifier, if it is one.
    pub fn classify(value: &str) -> Option<ReferenceKind> {
        if SITA_NUMBER.is_match(value) {
            Some(ReferenceKind::Sita)
        } else if SIGEA_NUMBER.is_match(value) {
            Some(ReferenceKind::Sigea)
        } else {
            None
        }
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReferenceExtractor {
    type Output = ReferenceId;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        ARCHIVE_NUMBER
            .find_iter(text)
            .filter_map(|m| {
                let kind = Self::classify(m.as_str())?;
                Some(ReferenceId {
                    kind,
                    value: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect()
    }
}

/// Extract all archive identifiers from reference text.
///
/// Returns `None` for empty text and `Some` (possibly empty) otherwise.
pub fn parse_references(text: &str) -> Option<Vec<ReferenceId>> {
    if text.trim().is_empty() {
        return None;
    }
    Some(ReferenceExtractor::new().extract_all(text))
}
