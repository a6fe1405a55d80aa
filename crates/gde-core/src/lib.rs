//! Core library for reading metadata from GDE government documents.
//!
//! This crate provides:
//! - PDF text extraction with block positions (lopdf backend)
//! - Label-proximity lookup of printed field values
//! - Parsers for GDE document numbers, archive references, signer captions and PDF dates
//! - An eager document reader producing a serializable record

pub mod error;
pub mod gde;
pub mod models;
pub mod pdf;

pub use error::{GdeError, GrammarError, PdfError, Result};
pub use gde::rules::{Area, DocumentNumber, NumberFields, ReferenceId, ReferenceKind, SignerName};
pub use gde::{locate_value, GdeDocument, Locator};
pub use models::{GdeConfig, GdeRecord, LayoutConfig, NumberGrammar};
pub use pdf::{BBox, LopdfEngine, PageText, PdfEngine, TextBlock};
