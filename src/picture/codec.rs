use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::error::{PicError, PicResult};

/// JPEG quality used for pictures written to the contact store.
pub const DEFAULT_JPEG_QUALITY: u8 = 70;

/// Decodes downloaded bytes and encodes the picture format the contact
/// store accepts.
pub trait ImageCodec {
    fn decode(&self, bytes: &[u8], source_name: &str) -> PicResult<DynamicImage>;
    fn encode(&self, image: &DynamicImage) -> PicResult<Vec<u8>>;
}

#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    quality: u8,
}

impl JpegCodec {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for JpegCodec {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl ImageCodec for JpegCodec {
    fn decode(&self, bytes: &[u8], source_name: &str) -> PicResult<DynamicImage> {
        if bytes.is_empty() {
            return Err(PicError::InvalidImage {
                source_name: source_name.to_string(),
                reason: "file is empty".into(),
            });
        }
        image::load_from_memory(bytes).map_err(|e| PicError::InvalidImage {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }

    fn encode(&self, image: &DynamicImage) -> PicResult<Vec<u8>> {
        let rgb = image.to_rgb8();
        let mut buf = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut buf, self.quality)
            .encode_image(&rgb)
            .map_err(|e| PicError::InvalidImage {
                source_name: "normalized picture".into(),
                reason: e.to_string(),
            })?;
        Ok(buf.into_inner())
    }
}
