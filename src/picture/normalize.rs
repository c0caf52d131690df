use std::path::Path;

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use log::warn;

use crate::error::{PicError, PicResult};

/// Largest edge, in pixels, of a picture written to the contact store.
pub const MAX_EDGE_PX: u32 = 256;

/// How far from square a source may be before the crop is flagged.
const ASPECT_TOLERANCE: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub image: DynamicImage,
    /// The source was far from square; a hand-cropped replacement saved over
    /// the source file would likely look better.
    pub needs_manual_crop: bool,
}

impl NormalizedImage {
    pub fn edge(&self) -> u32 {
        self.image.width()
    }
}

/// Center-crop `image` to a square and shrink it to at most `MAX_EDGE_PX`.
/// `source` is only used in diagnostics.
pub fn normalize(image: &DynamicImage, source: &Path) -> PicResult<NormalizedImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PicError::InvalidImage {
            source_name: source.display().to_string(),
            reason: format!("image has zero size ({}x{})", width, height),
        });
    }

    let mut needs_manual_crop = false;
    let cropped = if width == height {
        image.clone()
    } else {
        let ratio = width as f64 / height as f64;
        if (ratio - 1.0).abs() > ASPECT_TOLERANCE {
            needs_manual_crop = true;
            warn!(
                "{} is {}x{} (aspect {:.2}); center-cropping. Save a square crop over {} for a better result.",
                source.display(),
                width,
                height,
                ratio,
                source.display()
            );
        }
        let (x, y, edge) = center_square(width, height);
        image.crop_imm(x, y, edge, edge)
    };

    let scaled = if cropped.width() > MAX_EDGE_PX {
        cropped.resize_exact(MAX_EDGE_PX, MAX_EDGE_PX, FilterType::Lanczos3)
    } else {
        cropped
    };

    Ok(NormalizedImage {
        image: scaled,
        needs_manual_crop,
    })
}

/// Origin and edge of the largest centered square inside `width` x `height`.
fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let edge = width.min(height);
    ((width - edge) / 2, (height - edge) / 2, edge)
}
