//! Rule-based parsers for GDE document fields.

pub mod dates;
pub mod number;
pub mod patterns;
pub mod reference;
pub mod signer;

pub use dates::{parse_pdf_date, DateExtractor};
pub use number::{Area, DocumentNumber, NumberFields};
pub use reference::{parse_references, ReferenceExtractor, ReferenceId, ReferenceKind};
pub use signer::{extract_signer, SignerExtractor, SignerName};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
