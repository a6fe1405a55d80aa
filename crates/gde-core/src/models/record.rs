//! Metadata record read from a GDE document.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::gde::rules::{DocumentNumber, ReferenceId, SignerName};

/// Everything read from a GDE document, computed once at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdeRecord {
    /// Document number as printed next to the number label.
    pub gde_number: Option<String>,

    /// Structured document number, absent when missing or malformed.
    pub parsed_number: Option<DocumentNumber>,

    /// Reference text as printed next to the reference label.
    pub reference: Option<String>,

    /// Archive identifiers found in the reference text.
    pub references: Option<Vec<ReferenceId>>,

    /// Signer, only read from signed documents.
    pub signer: Option<SignerName>,

    /// Release date from the document metadata.
    pub release_date: Option<NaiveDateTime>,

    pub page_count: u32,

    pub is_signed: bool,
}

impl GdeRecord {
    /// Canonical file name, `<gde_number>.pdf`.
    pub fn filename(&self) -> Option<String> {
        self.gde_number.as_ref().map(|n| format!("{}.pdf", n))
    }
}
