//! Image collaborator capability

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque identifier for an artwork asset
///
/// Image keys are scoped to one pairing session with the controller; they
/// are not valid across pairings, which is why the artwork cache is cleared
/// on pairing loss.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageKey(String);

impl ImageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageKey {
    fn from(s: &str) -> Self {
        ImageKey::new(s)
    }
}

impl From<String> for ImageKey {
    fn from(s: String) -> Self {
        ImageKey::new(s)
    }
}

/// How the controller should scale the image into the requested box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageScale {
    Fit,
    Fill,
    Stretch,
}

impl ImageScale {
    /// Wire spelling used by controller image services
    pub fn as_str(self) -> &'static str {
        match self {
            ImageScale::Fit => "fit",
            ImageScale::Fill => "fill",
            ImageScale::Stretch => "stretch",
        }
    }
}

/// Options sent with every image request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub scale: ImageScale,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl ImageRequest {
    /// Fit-scaled thumbnail sized for a small status-icon use case
    pub fn thumbnail() -> Self {
        Self {
            scale: ImageScale::Fit,
            width: 64,
            height: 64,
            format: "image/jpeg".to_string(),
        }
    }
}

impl Default for ImageRequest {
    fn default() -> Self {
        Self::thumbnail()
    }
}

/// Raw result of a successful image request
#[derive(Debug, Clone)]
pub struct ImageResponse {
    /// Content type reported by the collaborator, if any
    pub content_type: Option<String>,
    /// Raw image bytes
    pub data: Vec<u8>,
}

/// Failure reported by the image collaborator
#[derive(Debug, thiserror::Error)]
pub enum ImageSourceError {
    #[error("controller reported: {0}")]
    Controller(String),

    #[error("image transport failed: {0}")]
    Transport(String),

    #[error("no image available for key")]
    NotFound,
}

/// Capability handle for fetching artwork bytes
///
/// Implemented by the pairing layer as an adapter over the controller's
/// callback-based image service; installed into the [`ArtworkFetcher`]
/// on pairing success and removed on pairing loss.
///
/// [`ArtworkFetcher`]: crate::ArtworkFetcher
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch_image(
        &self,
        key: &ImageKey,
        request: &ImageRequest,
    ) -> Result<ImageResponse, ImageSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_basics() {
        let key = ImageKey::new("img1");
        assert_eq!(key.as_str(), "img1");
        assert_eq!(format!("{key}"), "img1");
        assert!(!key.is_empty());
        assert!(ImageKey::new("").is_empty());
    }

    #[test]
    fn test_image_key_equality() {
        assert_eq!(ImageKey::from("img1"), ImageKey::new("img1".to_string()));
    }

    #[test]
    fn test_thumbnail_request_options() {
        let request = ImageRequest::thumbnail();
        assert_eq!(request.scale, ImageScale::Fit);
        assert_eq!(request.width, 64);
        assert_eq!(request.height, 64);
        assert_eq!(request.format, "image/jpeg");
    }

    #[test]
    fn test_scale_wire_spelling() {
        assert_eq!(ImageScale::Fit.as_str(), "fit");
        assert_eq!(ImageScale::Fill.as_str(), "fill");
        assert_eq!(ImageScale::Stretch.as_str(), "stretch");
    }
}
