// src/fetch/dimensions.rs
// Pixel dimensions straight from the image header. Nothing is decoded,
// so this is cheap even for large files.

use crate::error::CrawlError;

/// Returns (width, height) of an image, or Decode when the bytes are not
/// a format imagesize understands.
pub fn dimensions(url: &str, bytes: &[u8]) -> Result<(usize, usize), CrawlError> {
    imagesize::blob_size(bytes)
        .map(|size| (size.width, size.height))
        .map_err(|source| CrawlError::Decode {
            url: url.to_string(),
            source,
        })
}

/// Smallest GIF header imagesize will accept, padded so header sniffing
/// always has enough bytes to look at.
#[cfg(test)]
pub(crate) fn gif_fixture(width: u16, height: u16) -> Vec<u8> {
    let mut bytes = b"GIF89a".to_vec();
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    // packed fields, background colour index, pixel aspect ratio, trailer
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x3b]);
    bytes.resize(64, 0);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gif_dimensions() {
        let bytes = gif_fixture(88, 31);
        assert_eq!(dimensions("b.gif", &bytes).unwrap(), (88, 31));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = dimensions("nope.gif", b"<html>definitely not an image</html>").unwrap_err();
        assert!(matches!(err, CrawlError::Decode { .. }));
        assert_eq!(err.url(), "nope.gif");
    }

    #[test]
    fn test_empty_body_is_decode_error() {
        assert!(dimensions("empty.png", &[]).is_err());
    }
}
