use crate::canvas::PageCanvas;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use phishreport_render_core::{FontFace, PageGeometry, RenderError};
use phishreport_types::LogoAsset;

/// Resource name of the embedded logo image.
pub const LOGO_RESOURCE: &str = "Im1";

/// Entries for the document information dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    /// PDF date string (`D:YYYYMMDDHHmmSS`).
    pub creation_date: Option<String>,
}

fn literal(text: &str) -> Object {
    Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
}

fn font_dictionary() -> Dictionary {
    let mut fonts = Dictionary::new();
    for face in [FontFace::Regular, FontFace::Bold] {
        fonts.set(
            face.resource_name().as_bytes(),
            Object::Dictionary(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            }),
        );
    }
    fonts
}

/// Adds the logo as an image XObject, with a soft mask when it has alpha.
///
/// Returns `None` when the sample buffers don't match the declared size.
fn add_logo(doc: &mut Document, logo: &LogoAsset) -> Option<ObjectId> {
    let pixels = logo.pixel_count();
    if !logo.is_drawable() {
        log::warn!(
            "Skipping logo: {} RGB bytes for {}x{} pixels",
            logo.rgb.len(),
            logo.pixel_width,
            logo.pixel_height
        );
        return None;
    }

    let mut image = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => logo.pixel_width as i64,
        "Height" => logo.pixel_height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };

    if let Some(alpha) = logo.alpha.as_ref().filter(|a| a.len() == pixels) {
        let smask_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => logo.pixel_width as i64,
                "Height" => logo.pixel_height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha.clone(),
        ));
        image.set("SMask", smask_id);
    }

    Some(doc.add_object(Stream::new(image, logo.rgb.clone())))
}

/// Builds a document from drawn pages.
///
/// Every page shares one resource dictionary holding Helvetica (`F1`),
/// Helvetica-Bold (`F2`) and, when given, the logo (`Im1`). Returns the
/// document and its page ids in page order, for footer stamping.
pub fn write_document(
    pages: Vec<PageCanvas>,
    geometry: PageGeometry,
    logo: Option<&LogoAsset>,
    info: &DocumentInfo,
) -> Result<(Document, Vec<ObjectId>), RenderError> {
    if pages.is_empty() {
        return Err(RenderError::Other("document has no pages".into()));
    }

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut resources = dictionary! {
        "Font" => font_dictionary(),
    };
    if let Some(logo_id) = logo.and_then(|logo| add_logo(&mut doc, logo)) {
        resources.set(
            "XObject",
            dictionary! { LOGO_RESOURCE => logo_id },
        );
    }
    let resources_id = doc.add_object(resources);

    let mut page_ids = Vec::with_capacity(pages.len());
    for canvas in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, canvas.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), geometry.width.into(), geometry.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().copied().map(Object::Reference).collect::<Vec<_>>(),
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info_dict = dictionary! {
        "Title" => literal(&info.title),
        "Producer" => literal(&info.producer),
    };
    if let Some(date) = &info.creation_date {
        info_dict.set("CreationDate", literal(date));
    }
    let info_id = doc.add_object(info_dict);
    doc.trailer.set("Info", info_id);

    log::debug!("Wrote {} page(s)", page_ids.len());
    Ok((doc, page_ids))
}

/// Serializes a document to bytes.
pub fn save_document(doc: &mut Document) -> Result<Vec<u8>, RenderError> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phishreport_types::Color;

    fn logo(alpha: bool) -> LogoAsset {
        LogoAsset {
            data_url: "data:image/png;base64,".into(),
            pixel_width: 2,
            pixel_height: 2,
            rgb: vec![0; 12],
            alpha: alpha.then(|| vec![255; 4]),
        }
    }

    fn one_page() -> Vec<PageCanvas> {
        let mut canvas = PageCanvas::new(PageGeometry::A4.height);
        canvas.fill_rect(phishreport_types::Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        vec![canvas]
    }

    fn count_images(doc: &Document) -> usize {
        doc.objects
            .values()
            .filter(|o| match o {
                Object::Stream(s) => s
                    .dict
                    .get(b"Subtype")
                    .and_then(|v| v.as_name())
                    .map(|n| n == b"Image")
                    .unwrap_or(false),
                _ => false,
            })
            .count()
    }

    #[test]
    fn test_write_document_without_logo() {
        let info = DocumentInfo {
            title: "Report".into(),
            producer: "phishreport".into(),
            creation_date: None,
        };
        let (mut doc, page_ids) = write_document(one_page(), PageGeometry::A4, None, &info).unwrap();
        assert_eq!(page_ids.len(), 1);
        assert_eq!(count_images(&doc), 0);

        let bytes = save_document(&mut doc).unwrap();
        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 1);
    }

    #[test]
    fn test_logo_with_alpha_gets_smask() {
        let (doc, _) =
            write_document(one_page(), PageGeometry::A4, Some(&logo(true)), &DocumentInfo::default())
                .unwrap();
        assert_eq!(count_images(&doc), 2);
    }

    #[test]
    fn test_malformed_logo_is_skipped() {
        let mut bad = logo(false);
        bad.rgb.truncate(5);
        let (doc, _) =
            write_document(one_page(), PageGeometry::A4, Some(&bad), &DocumentInfo::default())
                .unwrap();
        assert_eq!(count_images(&doc), 0);
    }

    #[test]
    fn test_empty_page_list_is_an_error() {
        assert!(write_document(vec![], PageGeometry::A4, None, &DocumentInfo::default()).is_err());
    }
}
