//! Skin classification
//!
//! Pixels are converted to YCbCr (ITU-R BT.601, full range) and classified
//! as skin when both chroma channels fall inside a fixed box. Luma is
//! ignored so the rule tolerates uneven lighting.

use image::{Rgb, RgbImage};

/// Inclusive Cr range of skin tones
pub const CR_RANGE: (f32, f32) = (133.0, 173.0);

/// Inclusive Cb range of skin tones
pub const CB_RANGE: (f32, f32) = (77.0, 127.0);

/// Converts an RGB pixel to `(Y, Cb, Cr)`
pub fn to_ycbcr(pixel: &Rgb<u8>) -> (f32, f32, f32) {
    let [r, g, b] = pixel.0.map(f32::from);

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = 128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b;
    let cr = 128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b;

    (y, cb, cr)
}

/// Whether a single pixel has a skin tone
pub fn is_skin(pixel: &Rgb<u8>) -> bool {
    let (_, cb, cr) = to_ycbcr(pixel);
    (CR_RANGE.0..=CR_RANGE.1).contains(&cr) && (CB_RANGE.0..=CB_RANGE.1).contains(&cb)
}

/// Per-pixel skin classification of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinMask {
    width: u32,
    height: u32,
    /// Row-major, one entry per pixel
    skin: Vec<bool>,
}

impl SkinMask {
    /// Classifies every pixel of `image`
    pub fn detect(image: &RgbImage) -> Self {
        let skin = image.pixels().map(is_skin).collect();
        Self {
            width: image.width(),
            height: image.height(),
            skin,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at `(x, y)` is skin; out-of-bounds pixels are not
    pub fn contains(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.skin[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Number of skin pixels
    pub fn count(&self) -> usize {
        self.skin.iter().filter(|s| **s).count()
    }

    /// Mean RGB of the skin pixels of `image`, or `None` when there are none
    ///
    /// `image` must be the image the mask was detected on.
    pub fn mean_colour(&self, image: &RgbImage) -> Option<[f64; 3]> {
        debug_assert_eq!((image.width(), image.height()), (self.width, self.height));

        let mut sums = [0u64; 3];
        let mut n = 0u64;
        for (pixel, _) in image.pixels().zip(&self.skin).filter(|(_, s)| **s) {
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += u64::from(channel);
            }
            n += 1;
        }

        if n == 0 {
            return None;
        }

        Some(sums.map(|sum| sum as f64 / n as f64))
    }

    /// Copy of `image` with every non-skin pixel set to black
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        let mut out = image.clone();
        for (pixel, skin) in out.pixels_mut().zip(&self.skin) {
            if !skin {
                *pixel = Rgb([0, 0, 0]);
            }
        }
        out
    }
}
