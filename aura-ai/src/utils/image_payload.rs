//! Base64 image payloads
//!
//! Accepts `data:image/<fmt>;base64,<data>` URLs or bare base64 and keeps the
//! raw bytes: the inference endpoints take raw bytes as the request body, and
//! the detector decodes them into an image.

use crate::error::{AnalysisError, AnalysisResult};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use image::DynamicImage;

/// Decoder for client-supplied base64: padding optional, trailing bits ignored
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode base64 that may be line-wrapped or unpadded
pub fn decode_lenient(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    LENIENT.decode(compact)
}

/// Decoded request image
#[derive(Debug, Clone)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    mime_type: Option<String>,
}

impl ImagePayload {
    /// Parse a data URL or bare base64 string
    pub fn from_base64(input: &str) -> AnalysisResult<Self> {
        let trimmed = input.trim();
        let (mime_type, data) = match trimmed.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest.split_once(',').ok_or_else(|| {
                    AnalysisError::InvalidInput("data URL has no ',' separator".to_string())
                })?;
                let mime = header.strip_suffix(";base64").ok_or_else(|| {
                    AnalysisError::InvalidInput("data URL is not base64-encoded".to_string())
                })?;
                (Some(mime.to_string()), data)
            }
            None => (None, trimmed),
        };

        let bytes = decode_lenient(data)
            .map_err(|e| AnalysisError::InvalidInput(format!("Invalid base64 image: {e}")))?;

        if bytes.is_empty() {
            return Err(AnalysisError::InvalidInput("Image payload is empty".to_string()));
        }

        Ok(Self { bytes, mime_type })
    }

    /// Wrap raw image bytes (e.g. read from a file)
    pub fn from_bytes(bytes: Vec<u8>) -> AnalysisResult<Self> {
        if bytes.is_empty() {
            return Err(AnalysisError::InvalidInput("Image payload is empty".to_string()));
        }
        let mime_type = image::guess_format(&bytes)
            .ok()
            .map(|f| f.to_mime_type().to_string());
        Ok(Self { bytes, mime_type })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Decode into an image handle
    pub fn decode(&self) -> AnalysisResult<DynamicImage> {
        Ok(image::load_from_memory(&self.bytes)?)
    }

    /// Re-encode as a data URL
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type.as_deref().unwrap_or("application/octet-stream"),
            STANDARD.encode(&self.bytes)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 3));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_data_url_round_trip() {
        let payload = ImagePayload::from_bytes(png_bytes()).unwrap();
        assert_eq!(payload.mime_type(), Some("image/png"));

        let parsed = ImagePayload::from_base64(&payload.to_data_url()).unwrap();
        assert_eq!(parsed.bytes(), payload.bytes());
        assert_eq!(parsed.mime_type(), Some("image/png"));
    }

    #[test]
    fn test_bare_base64_accepted() {
        let encoded = STANDARD.encode(png_bytes());
        let payload = ImagePayload::from_base64(&encoded).unwrap();
        assert!(payload.mime_type().is_none());

        let img = payload.decode().unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let result = ImagePayload::from_base64("data:image/png;base64,@@not-base64@@");
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_non_base64_data_url_rejected() {
        let result = ImagePayload::from_base64("data:image/png,rawdata");
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_undecodable_bytes_fail_decode() {
        let encoded = STANDARD.encode(b"definitely not an image");
        let payload = ImagePayload::from_base64(&encoded).unwrap();
        assert!(matches!(payload.decode(), Err(AnalysisError::ImageDecode(_))));
    }

    #[test]
    fn test_line_wrapped_data_url_accepted() {
        let url = "data:image/png;base64,aGVsbG8g\nd29y\r\nbGQ=";
        let payload = ImagePayload::from_base64(url).unwrap();
        assert_eq!(payload.bytes(), b"hello world");
        assert_eq!(payload.mime_type(), Some("image/png"));
    }

    #[test]
    fn test_unpadded_data_url_accepted() {
        let url = "data:image/png;base64,aGVsbG8gd29ybGQ";
        let payload = ImagePayload::from_base64(url).unwrap();
        assert_eq!(payload.bytes(), b"hello world");
    }

    #[test]
    fn test_unpadded_wrapped_image_decodes() {
        let encoded = STANDARD.encode(png_bytes());
        let wrapped: Vec<String> = encoded
            .trim_end_matches('=')
            .as_bytes()
            .chunks(16)
            .map(|c| String::from_utf8_lossy(c).into_owned())
            .collect();
        let payload = ImagePayload::from_base64(&wrapped.join("\n")).unwrap();
        let img = payload.decode().unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }
}
