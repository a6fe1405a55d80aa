//! PDF page text and metadata extraction using lopdf and pdf-extract.

use std::panic::{catch_unwind, AssertUnwindSafe};

use lopdf::{decode_text_string, Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace, warn};

use super::layout::BlockCollector;
use super::{PageText, PdfEngine, Result};
use crate::error::PdfError;

/// Upper bound on AcroForm field tree depth.
const MAX_FIELD_DEPTH: usize = 32;

/// PDF engine backed by an in-memory lopdf document.
pub struct LopdfEngine {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl LopdfEngine {
    /// Parse a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption. The loader already
        // tries the empty password and keeps its state when it works.
        if document.is_encrypted() {
            if document.encryption_state.is_none() && document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_ids: Vec<ObjectId> = document.get_pages().values().copied().collect();
        if page_ids.is_empty() {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_ids.len());
        Ok(Self { document, page_ids })
    }

    fn page_id(&self, number: u32) -> Result<ObjectId> {
        number
            .checked_sub(1)
            .and_then(|i| self.page_ids.get(i as usize))
            .copied()
            .ok_or(PdfError::InvalidPage(number))
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match self.document.dereference(obj).ok()?.1 {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Count `/FT /Sig` fields below a list of field references.
    fn count_signature_fields(&self, fields: &[Object], depth: usize) -> usize {
        if depth > MAX_FIELD_DEPTH {
            return 0;
        }

        let mut count = 0;
        for field in fields {
            let Some(dict) = self.resolve_dict(field) else {
                continue;
            };

            let is_signature = dict
                .get(b"FT")
                .and_then(|ft| ft.as_name())
                .map(|name| name == b"Sig")
                .unwrap_or(false);
            if is_signature {
                count += 1;
            }

            if let Ok(kids) = dict.get(b"Kids") {
                if let Ok((_, Object::Array(kids))) = self.document.dereference(kids) {
                    count += self.count_signature_fields(kids, depth + 1);
                }
            }
        }
        count
    }
}

impl PdfEngine for LopdfEngine {
    fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    fn signature_field_count(&self) -> usize {
        let Ok(catalog) = self.document.catalog() else {
            return 0;
        };
        let Some(acro_form) = catalog.get(b"AcroForm").ok().and_then(|o| self.resolve_dict(o)) else {
            return 0;
        };

        let count = match acro_form.get(b"Fields") {
            Ok(fields) => match self.document.dereference(fields) {
                Ok((_, Object::Array(fields))) => self.count_signature_fields(fields, 0),
                _ => 0,
            },
            Err(_) => 0,
        };

        debug!("Found {} signature fields", count);
        count
    }

    fn page(&self, number: u32) -> Result<PageText> {
        self.page_id(number)?;

        // pdf-extract panics on some malformed content streams.
        let mut collector = BlockCollector::new();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::output_doc_page(&self.document, &mut collector, number)
        }));

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(PdfError::TextExtraction(e.to_string())),
            Err(_) => {
                warn!("Text extraction panicked on page {}", number);
                return Err(PdfError::TextExtraction(format!(
                    "malformed content on page {}",
                    number
                )));
            }
        }

        let blocks = collector.into_blocks();
        trace!("Extracted {} text blocks from page {}", blocks.len(), number);

        Ok(PageText::new(number, blocks))
    }

    fn metadata(&self, key: &str) -> Option<String> {
        let info = self.document.trailer.get(b"Info").ok()?;
        let info = self.resolve_dict(info)?;
        let value = info.get(key.as_bytes()).ok()?;

        match self.document.dereference(value).ok()?.1 {
            value @ Object::String(..) => decode_text_string(value).ok(),
            Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
            _ => None,
        }
    }
}

/// Builders for small in-memory PDFs used by tests across the crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

    /// A PDF whose pages carry the given raw content streams.
    pub(crate) fn pdf_with_pages(
        pages: &[&[u8]],
        signature_fields: usize,
        mod_date: Option<&str>,
    ) -> Vec<u8> {
        build(pages, None, signature_fields, mod_date)
    }

    /// A one-page PDF that draws its text through the form XObject `/X1`.
    pub(crate) fn pdf_with_form(page: &[u8], form: &[u8]) -> Vec<u8> {
        build(&[page], Some(form), 0, None)
    }

    fn build(
        pages: &[&[u8]],
        form: Option<&[u8]>,
        signature_fields: usize,
        mod_date: Option<&str>,
    ) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id: ObjectId = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let fonts = dictionary! { "F1" => font_id };

        let mut resources = dictionary! { "Font" => Object::Dictionary(fonts.clone()) };
        if let Some(form) = form {
            let form_id = doc.add_object(Object::Stream(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Form",
                    "BBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                    "Resources" => dictionary! { "Font" => fonts },
                },
                form.to_vec(),
            )));
            resources.set("XObject", dictionary! { "X1" => form_id });
        }

        let mut kids = Vec::new();
        for content in pages {
            let content_id =
                doc.add_object(Object::Stream(Stream::new(Dictionary::new(), content.to_vec())));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => Object::Dictionary(resources.clone()),
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let mut fields = Vec::new();
        for i in 0..signature_fields {
            let field_id = doc.add_object(dictionary! {
                "FT" => "Sig",
                "T" => Object::string_literal(format!("Signature{}", i + 1)),
            });
            fields.push(Object::from(field_id));
        }

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        if !fields.is_empty() {
            catalog.set(
                "AcroForm",
                Object::Dictionary(dictionary! {
                    "Fields" => fields,
                    "SigFlags" => 3i64,
                }),
            );
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        if let Some(date) = mod_date {
            let info_id = doc.add_object(dictionary! {
                "ModDate" => Object::string_literal(date),
            });
            doc.trailer.set("Info", Object::Reference(info_id));
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }
}
