//! Plain text from the first pages of an uploaded resume PDF.
//!
//! Never fails: any parse error is logged and reported as an empty string, which
//! callers must treat as "extraction failed" rather than "document had no text".

use lopdf::Document;
use tracing::{debug, error};

/// Only this many leading pages contribute text.
pub const MAX_PAGES: usize = 5;

/// Extracts text from the first `MAX_PAGES` pages of an in-memory PDF,
/// concatenated in page order with no separator.
pub fn extract_text(bytes: &[u8]) -> String {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Error reading PDF: {e}");
            return String::new();
        }
    };

    let pages = doc.get_pages();
    debug!(
        "PDF loaded: {} pages, reading {}",
        pages.len(),
        pages.len().min(MAX_PAGES)
    );

    pages
        .keys()
        .take(MAX_PAGES)
        .map(|&page_number| page_text(&doc, page_number))
        .collect()
}

fn page_text(doc: &Document, page_number: u32) -> String {
    doc.extract_text(&[page_number]).unwrap_or_else(|e| {
        debug!("Page {page_number} has no extractable text: {e}");
        String::new()
    })
}

#[cfg(test)]
pub mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Builds a PDF with one page per entry, each page showing that text.
    pub fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}
