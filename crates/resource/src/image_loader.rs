use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use phishreport_traits::{ResourceError, ResourceProvider};
use phishreport_types::LogoAsset;

/// Decodes raw image bytes into a [`LogoAsset`].
///
/// PNG, JPEG and GIF are accepted. The alpha plane is only kept when the
/// source color type carries transparency.
pub fn decode_logo(bytes: &[u8]) -> Result<LogoAsset, ResourceError> {
    let format = image::guess_format(bytes)
        .map_err(|e| ResourceError::InvalidFormat(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ResourceError::InvalidFormat(e.to_string()))?;

    let (pixel_width, pixel_height) = (decoded.width(), decoded.height());
    if pixel_width == 0 || pixel_height == 0 {
        return Err(ResourceError::InvalidFormat(
            "image has zero width or height".to_string(),
        ));
    }

    let alpha = decoded.color().has_alpha().then(|| {
        decoded
            .to_rgba8()
            .pixels()
            .map(|p| p.0[3])
            .collect::<Vec<u8>>()
    });
    let rgb = decoded.to_rgb8().into_raw();

    let data_url = format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(bytes)
    );

    Ok(LogoAsset {
        data_url,
        pixel_width,
        pixel_height,
        rgb,
        alpha,
    })
}

/// Loads and decodes the logo at `path`.
///
/// Never fails: a missing, unreachable or undecodable asset yields `None`
/// and a warning, and the report is drawn without a logo.
pub async fn load_image(provider: &dyn ResourceProvider, path: &str) -> Option<LogoAsset> {
    let bytes = match provider.load(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Logo '{}' unavailable via {}: {}", path, provider.name(), e);
            return None;
        }
    };

    match decode_logo(&bytes) {
        Ok(logo) => {
            log::debug!(
                "Loaded logo '{}' ({}x{}, alpha: {})",
                path,
                logo.pixel_width,
                logo.pixel_height,
                logo.alpha.is_some()
            );
            Some(logo)
        }
        Err(e) => {
            log::warn!("Logo '{}' could not be decoded: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use phishreport_traits::InMemoryResourceProvider;
    use std::io::Cursor;

    fn encode(image: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_opaque_png() {
        let bytes = encode(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            4,
            2,
            Rgb([30, 58, 138]),
        )));

        let logo = decode_logo(&bytes).unwrap();
        assert_eq!((logo.pixel_width, logo.pixel_height), (4, 2));
        assert_eq!(logo.rgb.len(), 4 * 2 * 3);
        assert_eq!(&logo.rgb[..3], &[30, 58, 138]);
        assert!(logo.alpha.is_none());
        assert!(logo.data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_decode_keeps_alpha_plane() {
        let bytes = encode(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            3,
            3,
            Rgba([255, 0, 0, 128]),
        )));

        let logo = decode_logo(&bytes).unwrap();
        let alpha = logo.alpha.unwrap();
        assert_eq!(alpha.len(), 9);
        assert!(alpha.iter().all(|a| *a == 128));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode_logo(b"definitely not an image");
        assert!(matches!(result, Err(ResourceError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_load_image_missing_resource_is_none() {
        let provider = InMemoryResourceProvider::new();
        assert!(load_image(&provider, "logo.png").await.is_none());
    }

    #[tokio::test]
    async fn test_load_image_from_provider() {
        let provider = InMemoryResourceProvider::new();
        provider
            .add(
                "logo.png",
                encode(DynamicImage::ImageRgb8(RgbImage::new(8, 8))),
            )
            .unwrap();

        let logo = load_image(&provider, "logo.png").await.unwrap();
        assert_eq!(logo.pixel_width, 8);
    }
}
