//! PDF engine contract and page text model.

mod layout;
pub(crate) mod extractor;

pub use extractor::LopdfEngine;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Axis-aligned bounding box with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Upper-left x.
    pub x0: f32,
    /// Upper-left y.
    pub y0: f32,
    /// Lower-right x.
    pub x1: f32,
    /// Lower-right y.
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// One block of text on a page, as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Bounding box of the whole block.
    pub bbox: BBox,
    /// Block text, lines separated by `\n`.
    pub text: String,
}

impl TextBlock {
    pub fn new(bbox: BBox, text: impl Into<String>) -> Self {
        Self {
            bbox,
            text: text.into(),
        }
    }
}

/// All text blocks of a single page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed).
    pub number: u32,
    /// Blocks in engine order.
    pub blocks: Vec<TextBlock>,
}

impl PageText {
    pub fn new(number: u32, blocks: Vec<TextBlock>) -> Self {
        Self { number, blocks }
    }

    /// Find every line containing `needle` and return its bounding box.
    ///
    /// A line's box is its block's box divided evenly between the block's
    /// lines. Hits are ordered top-to-bottom, then left-to-right.
    pub fn search_text(&self, needle: &str) -> Vec<BBox> {
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for block in &self.blocks {
            let lines: Vec<&str> = block.text.lines().collect();
            let line_count = lines.len().max(1) as f32;
            let line_height = block.bbox.height() / line_count;

            for (i, line) in lines.iter().enumerate() {
                if line.contains(needle) {
                    let y0 = block.bbox.y0 + line_height * i as f32;
                    hits.push(BBox::new(block.bbox.x0, y0, block.bbox.x1, y0 + line_height));
                }
            }
        }

        hits.sort_by(|a, b| cmp_position(a, b));
        hits
    }

    /// Blocks sorted top-to-bottom, then left-to-right.
    pub fn sorted_blocks(&self) -> Vec<&TextBlock> {
        let mut blocks: Vec<&TextBlock> = self.blocks.iter().collect();
        blocks.sort_by(|a, b| cmp_position(&a.bbox, &b.bbox));
        blocks
    }
}

fn cmp_position(a: &BBox, b: &BBox) -> Ordering {
    a.y0.total_cmp(&b.y0).then(a.x0.total_cmp(&b.x0))
}

/// The operations the document reader needs from a PDF engine.
pub trait PdfEngine {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Number of signature form fields in the document.
    fn signature_field_count(&self) -> usize;

    /// Text blocks of a page (1-indexed).
    fn page(&self, number: u32) -> Result<PageText>;

    /// A document-level metadata string, e.g. `ModDate`.
    fn metadata(&self, key: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_search_text_single_line_block() {
        let page = PageText::new(
            1,
            vec![
                TextBlock::new(BBox::new(50.0, 10.0, 100.0, 12.0), "Número:"),
                TextBlock::new(BBox::new(120.0, 10.5, 300.0, 12.5), "IF-2024-1-GDEBA-ABCDEF#MJGP"),
            ],
        );

        assert_eq!(page.search_text("Número:"), vec![BBox::new(50.0, 10.0, 100.0, 12.0)]);
        assert!(page.search_text("Referencia:").is_empty());
        assert!(page.search_text("").is_empty());
    }

    #[test]
    fn test_search_text_splits_block_lines() {
        let page = PageText::new(
            1,
            vec![TextBlock::new(
                BBox::new(0.0, 100.0, 200.0, 130.0),
                "Buenos Aires\nNúmero:\nReferencia:",
            )],
        );

        let hits = page.search_text("Referencia:");
        assert_eq!(hits, vec![BBox::new(0.0, 120.0, 200.0, 130.0)]);
    }

    #[test]
    fn test_sorted_blocks_orders_by_position() {
        let page = PageText::new(
            1,
            vec![
                TextBlock::new(BBox::new(10.0, 50.0, 20.0, 60.0), "c"),
                TextBlock::new(BBox::new(30.0, 10.0, 40.0, 20.0), "b"),
                TextBlock::new(BBox::new(5.0, 10.0, 8.0, 20.0), "a"),
            ],
        );

        let texts: Vec<&str> = page.sorted_blocks().iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }
}
