//! Core types for video generation requests.

use crate::error::{ReelGenError, Result};
use std::path::Path;

/// Supported seed image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Attempts to resolve a format from a MIME type string.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Veo model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VideoModel {
    /// Veo 3 - current generation.
    #[default]
    Veo3,
    /// Veo 2 - previous generation.
    Veo2,
}

impl VideoModel {
    /// Returns the API model identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Veo3 => "veo-3.0-generate-001",
            Self::Veo2 => "veo-2.0-generate-001",
        }
    }
}

impl std::fmt::Display for VideoModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seed image: raw bytes plus their MIME type.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// MIME type (e.g. "image/png").
    pub mime_type: String,
}

impl ImageInput {
    /// Creates a seed image from bytes and an explicit MIME type.
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Creates a seed image from bytes, detecting the MIME type from
    /// magic bytes. Fails if the format is not recognized.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = ImageFormat::from_magic_bytes(&data).ok_or_else(|| {
            ReelGenError::Encoding("unrecognized image format (expected PNG, JPEG or WebP)".into())
        })?;
        Ok(Self {
            data,
            mime_type: format.mime_type().to_string(),
        })
    }

    /// Reads a seed image from disk, detecting the MIME type.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| ReelGenError::Encoding(format!("failed to read {}: {e}", path.display())))?;
        Self::from_bytes(data)
    }

    /// Returns the size of the image in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A request to generate a video.
#[derive(Debug, Clone)]
pub struct VideoRequest {
    /// The text prompt describing the desired video.
    pub prompt: String,
    /// Optional seed image for image-to-video generation.
    pub image: Option<ImageInput>,
}

impl VideoRequest {
    /// Creates a new request with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    /// Sets a seed image for image-to-video generation.
    pub fn with_image(mut self, image: ImageInput) -> Self {
        self.image = Some(image);
        self
    }

    /// Validates the request against submission preconditions: non-empty
    /// prompt, supported image MIME type, image under the size cap.
    pub fn validate(&self, max_image_bytes: usize) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(ReelGenError::InvalidInput("prompt must not be empty".into()));
        }
        if let Some(image) = &self.image {
            if ImageFormat::from_mime(&image.mime_type).is_none() {
                return Err(ReelGenError::InvalidInput(format!(
                    "unsupported image MIME type: {}",
                    image.mime_type
                )));
            }
            if image.data.len() > max_image_bytes {
                return Err(ReelGenError::InvalidInput(format!(
                    "image is {} bytes, over the {} byte cap",
                    image.data.len(),
                    max_image_bytes
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 13] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(ImageFormat::from_magic_bytes(&PNG_MAGIC), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_magic_bytes(&JPEG_MAGIC), Some(ImageFormat::Jpeg));

        let mut webp = Vec::from(*b"RIFF");
        webp.extend_from_slice(&[0, 0, 0, 0]);
        webp.extend_from_slice(b"WEBP");
        assert_eq!(ImageFormat::from_magic_bytes(&webp), Some(ImageFormat::WebP));

        assert_eq!(ImageFormat::from_magic_bytes(&[0u8; 12]), None);
        // Too short to carry a signature
        assert_eq!(ImageFormat::from_magic_bytes(&[0x89, 0x50]), None);
    }

    #[test]
    fn test_format_from_mime() {
        assert_eq!(ImageFormat::from_mime("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime("image/jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime("text/plain"), None);
    }

    #[test]
    fn test_image_input_from_bytes_detects_mime() {
        let image = ImageInput::from_bytes(PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.size(), PNG_MAGIC.len());
    }

    #[test]
    fn test_image_input_from_bytes_rejects_unknown() {
        let result = ImageInput::from_bytes(vec![0u8; 32]);
        assert!(matches!(result, Err(ReelGenError::Encoding(_))));
    }

    #[test]
    fn test_image_input_from_missing_path_is_encoding_error() {
        let result = tokio_test::block_on(ImageInput::from_path("/nonexistent/seed.png"));
        assert!(matches!(result, Err(ReelGenError::Encoding(_))));
    }

    #[test]
    fn test_validate_rejects_empty_prompt() {
        let result = VideoRequest::new("").validate(usize::MAX);
        assert!(matches!(result, Err(ReelGenError::InvalidInput(_))));

        let result = VideoRequest::new("   \t\n").validate(usize::MAX);
        assert!(matches!(result, Err(ReelGenError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_bad_mime() {
        let request = VideoRequest::new("a cat")
            .with_image(ImageInput::new(vec![1, 2, 3], "application/pdf"));
        assert!(matches!(
            request.validate(usize::MAX),
            Err(ReelGenError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_image() {
        let request =
            VideoRequest::new("a cat").with_image(ImageInput::new(vec![0u8; 64], "image/png"));
        assert!(matches!(
            request.validate(63),
            Err(ReelGenError::InvalidInput(_))
        ));
        assert!(request.validate(64).is_ok());
    }

    #[test]
    fn test_validate_accepts_plain_prompt() {
        assert!(VideoRequest::new("a cat skateboarding").validate(1024).is_ok());
    }

    #[test]
    fn test_model_identifiers() {
        assert_eq!(VideoModel::Veo3.as_str(), "veo-3.0-generate-001");
        assert_eq!(VideoModel::Veo2.as_str(), "veo-2.0-generate-001");
        assert_eq!(VideoModel::default(), VideoModel::Veo3);
    }
}
