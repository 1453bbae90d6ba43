use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};

/// Literal strings shown by `Tj` on one page, in drawing order.
///
/// The report only uses WinAnsi literal strings, so reading `(...)` operands
/// from the raw content stream is enough.
pub fn page_strings(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page_num) else {
        return Vec::new();
    };
    let Ok(content) = doc.get_page_content(*page_id) else {
        return Vec::new();
    };
    literal_strings(&content)
}

/// Content stream operators on one page, in drawing order.
pub fn page_operators(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page_num) else {
        return Vec::new();
    };
    doc.get_page_content(*page_id)
        .and_then(|content| Content::decode(&content))
        .map(|content| content.operations.into_iter().map(|op| op.operator).collect())
        .unwrap_or_default()
}

/// All page strings, one entry per page.
pub fn all_page_strings(doc: &LopdfDocument) -> Vec<Vec<String>> {
    (1..=doc.get_pages().len() as u32)
        .map(|page| page_strings(doc, page))
        .collect()
}

fn literal_strings(content: &[u8]) -> Vec<String> {
    let mut strings = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    let mut depth = 0;
    let mut bytes = content.iter().copied();
    while let Some(b) = bytes.next() {
        let Some(buf) = current.as_mut() else {
            if b == b'(' {
                current = Some(Vec::new());
                depth = 1;
            }
            continue;
        };
        match b {
            b'\\' => {
                if let Some(next) = bytes.next() {
                    buf.push(next);
                }
            }
            b'(' => {
                depth += 1;
                buf.push(b);
            }
            b')' => {
                depth -= 1;
                if depth > 0 {
                    buf.push(b);
                } else if let Some(done) = current.take() {
                    strings.push(String::from_utf8_lossy(&done).into_owned());
                }
            }
            _ => buf.push(b),
        }
    }
    strings
}

/// Number of image XObjects (logo plus its soft mask) in the document.
pub fn image_count(doc: &LopdfDocument) -> usize {
    doc.objects
        .values()
        .filter(|object| match object {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false),
            _ => false,
        })
        .count()
}

// ============================================================================
// Fluent Assertion Macros
// ============================================================================

/// Assert that some page shows exactly this string
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let strings = $pdf.strings();
        assert!(
            strings.iter().any(|s| s == $text),
            "PDF should contain '{}', but shown strings were:\n{:?}",
            $text,
            strings
        );
    };
}

/// Assert that no page shows this string
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let strings = $pdf.strings();
        assert!(
            !strings.iter().any(|s| s == $text),
            "PDF should NOT contain '{}', but it was found in:\n{:?}",
            $text,
            strings
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}
