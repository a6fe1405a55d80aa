//! Label-proximity lookup of field values on a page.
//!
//! GDE pages render a caption ("Número:") and its value as separate
//! blocks sharing nearly the same vertical extent. The value is the
//! block aligned with the caption's box, other than the caption's own.

use tracing::{debug, trace};

use crate::models::config::ALIGNMENT_BIAS;
use crate::pdf::{BBox, PageText, TextBlock};

/// Finds the value block paired with a label.
#[derive(Debug, Clone, Copy)]
pub struct Locator {
    bias: f32,
}

impl Locator {
    /// Create a locator with the given vertical tolerance.
    pub fn new(bias: f32) -> Self {
        Self { bias }
    }

    fn is_aligned(&self, anchor: &BBox, block: &BBox) -> bool {
        (anchor.y0 - block.y0).abs() < self.bias && (anchor.y1 - block.y1).abs() < self.bias
    }

    /// Locate the value text for `label` on `page`.
    ///
    /// Returns `None` when the label is not on the page or nothing besides
    /// the label's own block is aligned with it.
    pub fn locate(&self, label: &str, page: &PageText) -> Option<String> {
        let anchor = *page.search_text(label).first()?;
        trace!(
            "Label {:?} on page {} at y [{:.2}, {:.2}]",
            label, page.number, anchor.y0, anchor.y1
        );

        let aligned: Vec<&TextBlock> = page
            .sorted_blocks()
            .into_iter()
            .filter(|b| self.is_aligned(&anchor, &b.bbox))
            .collect();

        let own = aligned
            .iter()
            .enumerate()
            .filter(|(_, b)| b.text.contains(label))
            .min_by(|(_, a), (_, b)| distance(&anchor, &a.bbox).total_cmp(&distance(&anchor, &b.bbox)))
            .map(|(i, _)| i);

        let value = aligned
            .iter()
            .enumerate()
            .find(|(i, _)| Some(*i) != own)
            .map(|(_, b)| clean(&b.text))
            .filter(|text| !text.is_empty());

        debug!("Located {:?} -> {:?}", label, value);
        value
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::new(ALIGNMENT_BIAS)
    }
}

/// Vertical distance between a block and the anchor.
fn distance(anchor: &BBox, block: &BBox) -> f32 {
    (anchor.y0 - block.y0).abs() + (anchor.y1 - block.y1).abs()
}

/// Drop embedded line breaks and surrounding whitespace.
fn clean(text: &str) -> String {
    text.replace(['\n', '\r'], "").trim().to_string()
}

/// Locate the value for `label` with the default tolerance.
pub fn locate_value(label: &str, page: &PageText) -> Option<String> {
    Locator::default().locate(label, page)
}
