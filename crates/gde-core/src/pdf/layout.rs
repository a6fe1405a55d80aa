//! Grouping of positioned glyphs into text blocks.
//!
//! pdf-extract interprets the content streams (form XObjects and font
//! encodings included) and reports every glyph with its text rendering
//! matrix. [`BlockCollector`] turns those glyphs into lines, and lines
//! into blocks, by proximity.

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use tracing::trace;

use super::{BBox, TextBlock};

/// Glyph extent above the baseline as a fraction of the font size.
const ASCENT: f32 = 0.8;
/// Glyph extent below the baseline as a fraction of the font size.
const DESCENT: f32 = 0.2;
/// Horizontal gap (in ems) that reads as a space between words.
const WORD_GAP: f32 = 0.1;
/// Horizontal gap (in ems) past which a run starts a new block.
const COLUMN_GAP: f32 = 1.0;
/// Largest baseline drop (in ems) that continues a block on the next line.
const LINE_DROP: f32 = 1.6;

struct LineAccum {
    text: String,
    bbox: BBox,
    baseline: f32,
}

struct BlockAccum {
    lines: Vec<LineAccum>,
}

impl BlockAccum {
    fn bbox(&self) -> BBox {
        let mut lines = self.lines.iter();
        let first = lines.next().map(|l| l.bbox).unwrap_or(BBox::new(0.0, 0.0, 0.0, 0.0));
        lines.fold(first, |acc, l| acc.union(&l.bbox))
    }

    fn into_block(self) -> TextBlock {
        let bbox = self.bbox();
        let text = self
            .lines
            .iter()
            .map(|l| l.text.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
        TextBlock::new(bbox, text)
    }
}

/// Output device that collects one page's glyphs into text blocks.
///
/// Coordinates are flipped to a top-left origin using the page's MediaBox.
#[derive(Default)]
pub(crate) struct BlockCollector {
    page_top: f32,
    current: Option<BlockAccum>,
    blocks: Vec<TextBlock>,
}

impl BlockCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Blocks in the order their first glyph was drawn.
    pub(crate) fn into_blocks(mut self) -> Vec<TextBlock> {
        self.flush();
        self.blocks
    }

    /// Attach a glyph to the current line, a new line of the current
    /// block, or a new block, depending on where it lands.
    fn place(&mut self, text: &str, bbox: BBox, baseline: f32, height: f32) {
        let height = height.max(1.0);
        let blank = text.trim().is_empty();

        if let Some(block) = self.current.as_mut() {
            let block_box = block.bbox();
            if let Some(line) = block.lines.last_mut() {
                let same_line = (line.baseline - baseline).abs() < height * 0.3;
                if same_line {
                    let gap = bbox.x0 - line.bbox.x1;
                    if gap >= -height * 2.0 && gap <= height * COLUMN_GAP {
                        if gap > height * WORD_GAP && !blank && !line.text.ends_with(' ') {
                            line.text.push(' ');
                        }
                        line.text.push_str(text);
                        line.bbox = line.bbox.union(&bbox);
                        return;
                    }
                } else {
                    let drop = line.baseline - baseline;
                    let overlaps = bbox.x0 <= block_box.x1 && bbox.x1 >= block_box.x0 - height * 2.0;
                    if drop > 0.0 && drop < height * LINE_DROP && overlaps {
                        if !blank {
                            block.lines.push(LineAccum {
                                text: text.to_string(),
                                bbox,
                                baseline,
                            });
                        }
                        return;
                    }
                }
            }
        }

        if blank {
            return;
        }

        self.flush();
        self.current = Some(BlockAccum {
            lines: vec![LineAccum {
                text: text.to_string(),
                bbox,
                baseline,
            }],
        });
    }

    fn flush(&mut self) {
        if let Some(block) = self.current.take() {
            let block = block.into_block();
            trace!("text block {:?} at y [{:.1}, {:.1}]", block.text, block.bbox.y0, block.bbox.y1);
            self.blocks.push(block);
        }
    }
}

impl OutputDev for BlockCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.flush();
        self.page_top = media_box.ury as f32;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        text: &str,
    ) -> Result<(), OutputError> {
        if text.is_empty() {
            return Ok(());
        }

        // trm maps text space to user space; font_size is applied on top.
        let height = (font_size * trm.m21.hypot(trm.m22)) as f32;
        let advance = (width * font_size * trm.m11.hypot(trm.m12)) as f32;
        let x0 = trm.m31 as f32;
        let baseline = trm.m32 as f32;

        let bbox = BBox::new(
            x0,
            self.page_top - (baseline + ASCENT * height),
            x0 + advance,
            self.page_top - (baseline - DESCENT * height),
        );
        self.place(text, bbox, baseline, height);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}
