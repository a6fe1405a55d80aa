//! Signer name extraction from the signature caption.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::patterns::SIGNER_NAME;
use super::FieldExtractor;
use crate::pdf::PageText;

/// Name of the digital signer, as printed under the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerName {
    /// Uppercase surname, possibly several words.
    pub surname: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_name: Option<String>,
}

/// Parses `<caption>SURNAME, Name Secondname ...` captions.
pub struct SignerExtractor {
    caption: String,
}

impl SignerExtractor {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
        }
    }

    /// Whether a block carries the signature caption.
    pub fn is_caption(&self, text: &str) -> bool {
        text.contains(&self.caption)
    }
}

impl FieldExtractor for SignerExtractor {
    type Output = SignerName;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let start = text.find(&self.caption)?;
        let body = &text[start + self.caption.len()..];

        let caps = SIGNER_NAME.captures(body)?;
        Some(SignerName {
            surname: caps[1].to_string(),
            name: caps[2].to_string(),
            second_name: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Parse the signer from the first caption block of a page.
///
/// Later caption blocks are ignored even when the first one does not parse.
pub fn extract_signer(page: &PageText, caption: &str) -> Option<SignerName> {
    let extractor = SignerExtractor::new(caption);
    let block = page.blocks.iter().find(|b| extractor.is_caption(&b.text))?;

    let signer = extractor.extract(&block.text);
    if signer.is_none() {
        debug!("Signature caption on page {} does not match: {:?}", page.number, block.text);
    }
    signer
}
