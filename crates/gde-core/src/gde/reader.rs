//! Eager reader for GDE documents.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use super::locator::Locator;
use super::rules::{
    extract_signer, parse_pdf_date, parse_references, DocumentNumber, ReferenceId, SignerName,
};
use crate::error::{PdfError, Result};
use crate::models::config::GdeConfig;
use crate::models::record::GdeRecord;
use crate::pdf::{LopdfEngine, PdfEngine};

/// A GDE document with all of its metadata read up front.
///
/// The engine is consumed during construction; nothing is re-read later.
#[derive(Debug, Clone)]
pub struct GdeDocument {
    record: GdeRecord,
}

impl GdeDocument {
    /// Read a document through any PDF engine.
    pub fn from_engine<E: PdfEngine>(engine: E, config: &GdeConfig) -> Result<Self> {
        let layout = &config.layout;

        let page_count = engine.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages.into());
        }

        let is_signed = engine.signature_field_count() > 0;
        let locator = Locator::new(layout.alignment_bias);

        let first_page = engine.page(1)?;
        let gde_number = locator.locate(&layout.number_label, &first_page);
        let reference = locator.locate(&layout.reference_label, &first_page);

        let signer = if is_signed {
            let last_page = engine.page(page_count)?;
            extract_signer(&last_page, &layout.signer_caption)
        } else {
            None
        };

        let parsed_number = gde_number.as_deref().and_then(|raw| {
            match DocumentNumber::parse_with(raw, &config.grammar) {
                Ok(number) => Some(number),
                Err(e) => {
                    warn!("Unparsable document number {:?}: {}", raw, e);
                    None
                }
            }
        });

        let references = reference.as_deref().and_then(parse_references);
        let release_date = engine
            .metadata(&layout.date_metadata_key)
            .as_deref()
            .and_then(parse_pdf_date);

        debug!(
            "Read document: number={:?}, signed={}, signer={:?}, date={:?}",
            gde_number, is_signed, signer, release_date
        );

        Ok(Self {
            record: GdeRecord {
                gde_number,
                parsed_number,
                reference,
                references,
                signer,
                release_date,
                page_count,
                is_signed,
            },
        })
    }

    /// Read a document from PDF bytes.
    pub fn from_bytes(data: &[u8], config: &GdeConfig) -> Result<Self> {
        let engine = LopdfEngine::load(data)?;
        Self::from_engine(engine, config)
    }

    /// Read a document from a base64 transport string.
    ///
    /// Whitespace, including line wrapping, is ignored.
    pub fn from_base64(encoded: &str, config: &GdeConfig) -> Result<Self> {
        let compact: String = encoded.split_whitespace().collect();
        let data = STANDARD.decode(compact)?;
        Self::from_bytes(&data, config)
    }

    /// Read a document from a file.
    pub fn open(path: impl AsRef<Path>, config: &GdeConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading {}", path.display());
        let data = std::fs::read(path)?;
        Self::from_bytes(&data, config)
    }

    pub fn gde_number(&self) -> Option<&str> {
        self.record.gde_number.as_deref()
    }

    pub fn parsed_number(&self) -> Option<&DocumentNumber> {
        self.record.parsed_number.as_ref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.record.reference.as_deref()
    }

    pub fn references(&self) -> Option<&[ReferenceId]> {
        self.record.references.as_deref()
    }

    pub fn signer(&self) -> Option<&SignerName> {
        self.record.signer.as_ref()
    }

    pub fn release_date(&self) -> Option<NaiveDateTime> {
        self.record.release_date
    }

    pub fn page_count(&self) -> u32 {
        self.record.page_count
    }

    pub fn is_signed(&self) -> bool {
        self.record.is_signed
    }

    /// Canonical file name, `<gde_number>.pdf`.
    pub fn filename(&self) -> Option<String> {
        self.record.filename()
    }

    pub fn record(&self) -> &GdeRecord {
        &self.record
    }

    pub fn into_record(self) -> GdeRecord {
        self.record
    }
}
