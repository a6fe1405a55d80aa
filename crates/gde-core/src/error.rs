//! Error types for the gde-core library.

use thiserror::Error;

/// Main error type for the gde library.
#[derive(Error, Debug)]
pub enum GdeError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Document number grammar violation.
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    /// Base64 transport decoding error.
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text blocks from a page.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Violations of the GDE document number grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The number does not split into 5 or 6 components.
    #[error("expected 5 or 6 components in {raw:?}, found {found}")]
    Arity { raw: String, found: usize },

    /// One of the components is empty.
    #[error("empty component at position {position} in {raw:?}")]
    EmptyComponent { raw: String, position: usize },

    /// The area component has no division/direction separator.
    #[error("missing '#' separator in area {area:?}")]
    MissingAreaSeparator { area: String },

    /// The area component does not split into division and direction.
    #[error("expected division#direction in area {area:?}")]
    AreaArity { area: String },
}

/// Result type for the gde library.
pub type Result<T> = std::result::Result<T, GdeError>;
