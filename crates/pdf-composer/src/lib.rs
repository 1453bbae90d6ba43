//! PDF post-processing for finished report documents.
//!
//! This crate provides low-level page manipulation using lopdf:
//! - Content overlaying (stamps drawn on top of existing pages)
//! - Footer stamping once the final page count is known

mod error;

pub use error::ComposerError;

use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// Draws `content_stream` on top of an existing page.
///
/// The page's /Contents becomes an array with the new stream appended last,
/// so the overlay paints over the original content. The page must already
/// have /Contents; nothing is added to the document otherwise.
pub fn overlay_content(
    doc: &mut Document,
    page_id: ObjectId,
    content_stream: Vec<u8>,
) -> Result<(), ComposerError> {
    let existing = match doc.get_object(page_id)?.as_dict()?.get(b"Contents") {
        Ok(Object::Array(streams)) => streams.clone(),
        Ok(single) => vec![single.clone()],
        Err(_) => {
            return Err(ComposerError::Other(format!(
                "page {:?} has no /Contents",
                page_id
            )));
        }
    };

    let overlay_id = doc.add_object(Stream::new(dictionary! {}, content_stream));
    let mut contents = existing;
    contents.push(Object::Reference(overlay_id));

    doc.get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Contents", Object::Array(contents));
    Ok(())
}

/// Overlays a footer on every page of `page_ids`, in order.
///
/// `footer` receives the 1-based page number and the total page count and
/// returns the encoded content stream for that page. Runs after every page
/// exists, so the total is final.
pub fn stamp_footers<F>(
    doc: &mut Document,
    page_ids: &[ObjectId],
    mut footer: F,
) -> Result<(), ComposerError>
where
    F: FnMut(usize, usize) -> Result<Vec<u8>, ComposerError>,
{
    let total = page_ids.len();
    for (index, page_id) in page_ids.iter().enumerate() {
        let content = footer(index + 1, total)?;
        overlay_content(doc, *page_id, content)?;
    }
    log::debug!("Stamped footers on {} page(s)", total);
    Ok(())
}
