//! Facecloud Vision
//!
//! Skin detection over uploaded face images.
//! It includes:
//! - Decoding of PNG/JPEG payloads and PNG encoding of results
//! - Per-pixel skin classification in the YCbCr colour space
//! - The `SkinDetector` trait used by the HTTP layer

pub mod codec;
pub mod detector;
pub mod error;
pub mod skin;

pub use detector::{SkinDetector, YcbcrSkinDetector};
pub use error::{Result, VisionError};
pub use skin::SkinMask;
