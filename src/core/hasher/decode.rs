//! The core consumes an image decoder only through the [`ImageDecoder`]
//! trait. [`DefaultImageDecoder`] is the production implementation:
//! `zune-jpeg` for JPEGs (faster than the `image` crate's own JPEG
//! path), falling back to the `image` crate for every other supported
//! format. Unsupported formats (HEIC, RAW) simply decode-fail like any
//! other corrupt or unreadable file.

use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
use std::fs;
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Decodes an image file into a raster image.
///
/// Any decode or I/O failure is soft: implementations return `None`
/// rather than raising.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Option<DynamicImage>;
}

/// Production decoder: fast JPEG path via `zune-jpeg`, `image` crate for
/// everything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultImageDecoder;

impl ImageDecoder for DefaultImageDecoder {
    fn decode(&self, path: &Path) -> Option<DynamicImage> {
        let is_jpeg = matches!(
            path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref(),
            Some("jpg" | "jpeg")
        );

        if is_jpeg {
            if let Some(image) = decode_jpeg_fast(path) {
                return Some(image);
            }
        }
        image::open(path).ok()
    }
}

/// Fast JPEG decoding using `zune-jpeg`, converting the raw output
/// colorspace straight into the matching `image` crate buffer type.
fn decode_jpeg_fast(path: &Path) -> Option<DynamicImage> {
    let bytes = fs::read(path).ok()?;
    let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(&bytes, options);
    let pixels = decoder.decode().ok()?;
    let info = decoder.info()?;
    let (width, height) = (info.width as u32, info.height as u32);
    let colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

    match colorspace {
        ColorSpace::RGB => {
            let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, pixels)?;
            Some(DynamicImage::ImageRgb8(buffer))
        }
        ColorSpace::RGBA => {
            let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, pixels)?;
            Some(DynamicImage::ImageRgba8(buffer))
        }
        ColorSpace::Luma => {
            let buffer: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, pixels)?;
            Some(DynamicImage::ImageLuma8(buffer))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_nonexistent_file_is_none() {
        let decoder = DefaultImageDecoder;
        assert!(decoder.decode(Path::new("/nonexistent/file.jpg")).is_none());
    }

    #[test]
    fn decoding_garbage_bytes_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();

        let decoder = DefaultImageDecoder;
        assert!(decoder.decode(&path).is_none());
    }

    #[test]
    fn decodes_a_real_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_fn(4, 4, |_, _| Rgb([10u8, 20, 30])));
        img.save(&path).unwrap();

        let decoder = DefaultImageDecoder;
        let decoded = decoder.decode(&path).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 4);
    }
}
