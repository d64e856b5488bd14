use std::panic::{catch_unwind, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, warn};

use crate::extraction::ExtractionError;

/// The PDF header may be preceded by junk; readers only look this far in.
const HEADER_SEARCH_WINDOW: usize = 1024;
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Returns true if the buffer carries a PDF header near its start.
pub fn is_pdf(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    head.windows(PDF_MAGIC.len()).any(|w| w == PDF_MAGIC)
}

/// Extracts the text of every page, concatenated in page order.
///
/// A page whose text cannot be extracted contributes an empty string; only a
/// document that cannot be parsed at all is an error.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if !is_pdf(bytes) {
        return Err(ExtractionError::NotPdf);
    }

    // lopdf panics on some corrupt object streams instead of returning an error
    catch_unwind(AssertUnwindSafe(|| extract_pages(bytes))).unwrap_or_else(|_| {
        warn!("PDF parser panicked on malformed input ({} bytes)", bytes.len());
        Err(ExtractionError::Malformed)
    })
}

fn extract_pages(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(bytes)?;
    let pages = doc.get_pages();

    // BTreeMap keys: page numbers in ascending order
    let mut text = String::new();
    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => warn!("No extractable text on page {page_number}: {e}"),
        }
    }

    debug!(
        "Extracted {} chars from {} PDF pages",
        text.chars().count(),
        pages.len()
    );
    Ok(text)
}

/// Builds small PDFs for tests. `None` produces a page with no content stream.
#[cfg(test)]
pub(crate) fn build_test_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
        };
        if let Some(line) = page {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            page_dict.set("Contents", content_id);
        }
        kids.push(doc.add_object(page_dict).into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
