//! Embedding uploaded images as `data:` URIs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::domain::ImageData;
use crate::error::ImageError;

/// Encode an uploaded file off the async executor.
///
/// `content_type` is the MIME type the client declared, if any.
pub async fn decode_image(
    bytes: Vec<u8>,
    content_type: Option<String>,
) -> Result<ImageData, ImageError> {
    let size = bytes.len();
    let image = tokio::task::spawn_blocking(move || encode_image(&bytes, content_type.as_deref()))
        .await
        .map_err(|e| ImageError::Interrupted(e.to_string()))??;

    tracing::debug!(bytes = size, mime = image.mime_type(), "Image encoded");
    Ok(image)
}

/// Validate `bytes` as an image and encode them.
///
/// The stored MIME type is the sniffed one, not the declared one.
pub fn encode_image(bytes: &[u8], content_type: Option<&str>) -> Result<ImageData, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }

    if let Some(declared) = content_type {
        let essence = declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !essence.starts_with("image/") {
            return Err(ImageError::NotAnImage(essence));
        }
    }

    let mime = sniff_mime(bytes).ok_or(ImageError::UnrecognisedFormat)?;
    Ok(ImageData::from_parts(mime, &STANDARD.encode(bytes)))
}

/// Identify an image format from its leading bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    if bytes.starts_with(PNG) {
        return Some("image/png");
    }
    if bytes.starts_with(JPEG) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if bytes.len() >= 14 && bytes.starts_with(b"BM") {
        return Some("image/bmp");
    }

    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    if text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg")) {
        return Some("image/svg+xml");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_sniffs_common_formats() {
        assert_eq!(sniff_mime(PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_mime(b"GIF89a\x01\x00"), Some("image/gif"));
        assert_eq!(sniff_mime(b"RIFF\x24\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(
            sniff_mime(b"  <?xml version=\"1.0\"?><svg xmlns=\"http://www.w3.org/2000/svg\"/>"),
            Some("image/svg+xml")
        );
        assert_eq!(sniff_mime(b"%PDF-1.7"), None);
    }

    #[test]
    fn test_encode_produces_data_uri() {
        let image = encode_image(PNG_HEADER, Some("image/png")).unwrap();

        assert_eq!(image.mime_type(), "image/png");
        assert!(image.as_str().starts_with("data:image/png;base64,iVBORw0KGgo"));
        assert_eq!(ImageData::from_data_uri(image.as_str()).unwrap(), image);
    }

    #[test]
    fn test_sniffed_type_wins_over_declared() {
        let image = encode_image(PNG_HEADER, Some("image/jpeg")).unwrap();
        assert_eq!(image.mime_type(), "image/png");
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(
            encode_image(b"hello", Some("text/plain; charset=utf-8")),
            Err(ImageError::NotAnImage("text/plain".into()))
        );
        assert_eq!(
            encode_image(b"hello", Some("image/png")),
            Err(ImageError::UnrecognisedFormat)
        );
        assert_eq!(encode_image(b"", None), Err(ImageError::Empty));
    }

    #[tokio::test]
    async fn test_decode_runs_off_executor() {
        let image = decode_image(PNG_HEADER.to_vec(), None).await.unwrap();
        assert_eq!(image.mime_type(), "image/png");
    }
}
