//! The local media handle returned by a successful generation.

use crate::error::Result;
use std::path::Path;

/// Metadata about how a video was generated.
#[derive(Debug, Clone, Default)]
pub struct VideoMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Wall-clock time the whole call took, in milliseconds.
    pub elapsed_ms: Option<u64>,
}

/// A generated video held in memory.
///
/// The handle owns the downloaded bytes; nothing is re-fetched to play or
/// export it. It is released when dropped (or explicitly via
/// [`VideoHandle::release`]).
#[derive(Debug, Clone)]
pub struct VideoHandle {
    /// Raw video bytes.
    pub data: Vec<u8>,
    /// MIME type (e.g. "video/mp4").
    pub mime_type: String,
    /// Generation metadata.
    pub metadata: VideoMetadata,
}

impl VideoHandle {
    pub(crate) fn new(data: Vec<u8>, mime_type: impl Into<String>, metadata: VideoMetadata) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            metadata,
        }
    }

    /// Returns the size of the video data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Borrows the raw video bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the handle, yielding the raw video bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Saves the video to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }

    /// Encodes the video data as base64.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Returns the video as a data URL, playable without re-fetching.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// Releases the handle, freeing the buffered video bytes.
    pub fn release(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_bytes() {
        let handle = VideoHandle::new(vec![1, 2, 3], "video/mp4", VideoMetadata::default());
        assert_eq!(handle.size(), 3);
        assert_eq!(handle.as_bytes(), &[1, 2, 3]);
        assert_eq!(handle.into_bytes(), vec![1, 2, 3]);
    }

    #[test]
    fn test_to_data_url() {
        let handle = VideoHandle::new(vec![1, 2, 3], "video/mp4", VideoMetadata::default());
        assert_eq!(handle.to_data_url(), "data:video/mp4;base64,AQID");
    }

    #[test]
    fn test_save_writes_bytes() {
        let dir = std::env::temp_dir().join("reelgen-media-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.mp4");

        let handle = VideoHandle::new(vec![9, 8, 7], "video/mp4", VideoMetadata::default());
        handle.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![9, 8, 7]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
