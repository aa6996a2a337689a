//! Uploaded image sniffing and encoding.
//!
//! Images are not decoded; only the leading signature bytes are checked before the
//! raw upload is stored as base64 text.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::server::error::AppError;

pub const INVALID_IMAGE_MESSAGE: &str = "Invalid image format. Please upload a valid image.";

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
const GIF87: &[u8] = b"GIF87a";
const GIF89: &[u8] = b"GIF89a";

fn is_image(bytes: &[u8]) -> bool {
    let is_webp = bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP";

    bytes.starts_with(PNG)
        || bytes.starts_with(JPEG)
        || bytes.starts_with(GIF87)
        || bytes.starts_with(GIF89)
        || is_webp
}

/// Validates an uploaded file and returns its base64 encoding.
///
/// # Returns
/// - `Ok(String)` - Base64 text of the upload
/// - `Err(AppError::BadRequest)` - Empty upload or unrecognized image signature
pub fn encode_image(bytes: &[u8]) -> Result<String, AppError> {
    if bytes.is_empty() || !is_image(bytes) {
        return Err(AppError::bad_request(INVALID_IMAGE_MESSAGE));
    }

    Ok(STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_signatures() {
        let mut png = PNG.to_vec();
        png.extend_from_slice(&[0, 0, 0, 13]);
        assert!(encode_image(&png).is_ok());

        assert!(encode_image(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]).is_ok());
        assert!(encode_image(b"GIF89a....").is_ok());
        assert!(encode_image(b"RIFF\x00\x00\x00\x00WEBPVP8 ").is_ok());
    }

    #[test]
    fn rejects_empty_and_non_images() {
        for bytes in [&b""[..], b"%PDF-1.7", b"hello world"] {
            match encode_image(bytes) {
                Err(AppError::BadRequest(msg)) => assert_eq!(msg, INVALID_IMAGE_MESSAGE),
                other => panic!("expected BadRequest, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn output_is_base64() {
        let encoded = encode_image(&[0xFF, 0xD8, 0xFF]).unwrap();
        assert_eq!(encoded, "/9j/");
    }
}
