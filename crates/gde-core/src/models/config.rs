//! Configuration structures for GDE document reading.

use serde::{Deserialize, Serialize};

use crate::error::GdeError;

/// Vertical tolerance, in layout units, for pairing a label with its value.
pub const ALIGNMENT_BIAS: f32 = 2.0;

/// Division length that carries no section prefix.
pub const DIVISION_WIDTH: usize = 6;

/// Length of the section code prefixed to longer divisions.
pub const SECTION_WIDTH: usize = 5;

/// Main configuration for the gde reader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GdeConfig {
    /// Page layout configuration.
    pub layout: LayoutConfig,

    /// Document number grammar configuration.
    pub grammar: NumberGrammar,
}

/// Where fields live on the page and how they are recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Caption preceding the document number on page 1.
    pub number_label: String,

    /// Caption preceding the reference text on page 1.
    pub reference_label: String,

    /// Prefix of the signature caption on the last page.
    pub signer_caption: String,

    /// Maximum vertical difference between a label and its value.
    pub alignment_bias: f32,

    /// Document metadata key holding the release date.
    pub date_metadata_key: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            number_label: "Número:".to_string(),
            reference_label: "Referencia:".to_string(),
            signer_caption: "Digitally signed by ".to_string(),
            alignment_bias: ALIGNMENT_BIAS,
            date_metadata_key: "ModDate".to_string(),
        }
    }
}

/// Fixed widths of the document number grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberGrammar {
    /// Division length without a section prefix.
    pub division_width: usize,

    /// Section code length.
    pub section_width: usize,
}

impl Default for NumberGrammar {
    fn default() -> Self {
        Self {
            division_width: DIVISION_WIDTH,
            section_width: SECTION_WIDTH,
        }
    }
}

impl GdeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| GdeError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| GdeError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
