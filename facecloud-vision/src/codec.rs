//! Image decoding and encoding

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

use crate::error::{Result, VisionError};

/// Decodes PNG or JPEG bytes into an RGB image
///
/// The format is guessed from the payload, not from the upload's file name.
pub fn decode(bytes: &[u8]) -> Result<RgbImage> {
    if bytes.is_empty() {
        return Err(VisionError::EmptyInput);
    }

    let image = image::load_from_memory(bytes).map_err(VisionError::Decode)?;
    Ok(image.to_rgb8())
}

/// Encodes an RGB image as PNG
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(VisionError::Encode)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode(&[]), Err(VisionError::EmptyInput)));
    }

    #[test]
    fn test_decode_garbage() {
        let result = decode(b"definitely not an image");
        assert!(matches!(result, Err(VisionError::Decode(_))));
    }

    #[test]
    fn test_png_keeps_pixels() {
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 10, y as u8 * 20, 7]));
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = decode(&png).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_decode_jpeg() {
        let image = RgbImage::from_pixel(8, 8, Rgb([224, 172, 140]));
        let mut jpeg = Cursor::new(Vec::new());
        image.write_to(&mut jpeg, ImageFormat::Jpeg).unwrap();

        let decoded = decode(&jpeg.into_inner()).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));

        // lossy, but a flat colour survives within a few levels
        let Rgb([r, g, b]) = *decoded.get_pixel(4, 4);
        assert!(r.abs_diff(224) <= 4 && g.abs_diff(172) <= 4 && b.abs_diff(140) <= 4);
    }
}
