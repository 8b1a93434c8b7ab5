//! Skin detector
//!
//! Entry points used by the HTTP layer. Both operations take the raw
//! uploaded bytes so callers never deal with image types directly.

use tracing::debug;

use crate::codec;
use crate::error::{Result, VisionError};
use crate::skin::SkinMask;

/// Image capability behind the face segmentation routes
pub trait SkinDetector: Send + Sync {
    /// Mean `[r, g, b]` of the skin pixels in the uploaded image
    fn mean_colour(&self, bytes: &[u8]) -> Result<[f64; 3]>;

    /// PNG of the uploaded image with non-skin pixels blacked out
    fn segmented_image(&self, bytes: &[u8]) -> Result<Vec<u8>>;
}

/// Detector using a fixed YCbCr chroma box
#[derive(Debug, Clone, Copy, Default)]
pub struct YcbcrSkinDetector;

impl YcbcrSkinDetector {
    pub fn new() -> Self {
        Self
    }
}

impl SkinDetector for YcbcrSkinDetector {
    fn mean_colour(&self, bytes: &[u8]) -> Result<[f64; 3]> {
        let image = codec::decode(bytes)?;
        let mask = SkinMask::detect(&image);

        debug!(
            "Detected {} skin pixels in {}x{} image",
            mask.count(),
            mask.width(),
            mask.height()
        );

        mask.mean_colour(&image).ok_or(VisionError::NoSkin)
    }

    fn segmented_image(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let image = codec::decode(bytes)?;
        let mask = SkinMask::detect(&image);

        debug!(
            "Segmenting {}x{} image ({} skin pixels)",
            mask.width(),
            mask.height(),
            mask.count()
        );

        codec::encode_png(&mask.apply(&image))
    }
}
