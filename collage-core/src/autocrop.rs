//! # Autocrop
//!
//! Trims fully transparent margins off an image, then surrounds what remains with a uniform transparent border.

use image::{imageops, RgbaImage};

use crate::asset::{AssetError, ImageAsset};

/// Inclusive pixel bounds, `min_x..=max_x` by `min_y..=max_y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropBounds {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}
impl CropBounds {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }
    #[must_use]
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
    fn fits(&self, image: &RgbaImage) -> bool {
        self.min_x <= self.max_x
            && self.min_y <= self.max_y
            && self.max_x < image.width()
            && self.max_y < image.height()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CropError {
    #[error("crop bounds {0:?} don't fit the image")]
    OutOfBounds(CropBounds),
    #[error("padding of {0}px overflows the image size")]
    PaddingTooLarge(u32),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

pub struct CroppedImage {
    pub asset: ImageAsset,
    /// Where the kept content sits within the new asset.
    pub bounds: CropBounds,
}

/// The tightest bounds around every pixel with nonzero alpha, or None if there are none.
#[must_use]
pub fn compute_crop_bounds(pixels: &RgbaImage) -> Option<CropBounds> {
    pixels
        .enumerate_pixels()
        .filter(|(_, _, pixel)| pixel[3] != 0)
        .fold(None, |bounds: Option<CropBounds>, (x, y, _)| {
            Some(match bounds {
                None => CropBounds {
                    min_x: x,
                    max_x: x,
                    min_y: y,
                    max_y: y,
                },
                Some(b) => CropBounds {
                    min_x: b.min_x.min(x),
                    max_x: b.max_x.max(x),
                    min_y: b.min_y.min(y),
                    max_y: b.max_y.max(y),
                },
            })
        })
}

/// Cut `bounds` out of `image` and pad it by `padding` transparent pixels on every side.
/// The result keeps the source's name.
/// # Errors
/// * `bounds` is inverted or reaches outside the image.
/// * The padded size doesn't fit in a `u32`.
pub fn crop_and_pad(
    image: &ImageAsset,
    bounds: CropBounds,
    padding: u32,
) -> Result<CroppedImage, CropError> {
    let source = image.pixels();
    if !bounds.fits(source) {
        return Err(CropError::OutOfBounds(bounds));
    }
    let (width, height) = (bounds.width(), bounds.height());
    let pad = |size: u32| {
        padding
            .checked_mul(2)
            .and_then(|both| size.checked_add(both))
            .ok_or(CropError::PaddingTooLarge(padding))
    };
    let mut padded = RgbaImage::new(pad(width)?, pad(height)?);
    let content = imageops::crop_imm(source, bounds.min_x, bounds.min_y, width, height).to_image();
    imageops::replace(&mut padded, &content, i64::from(padding), i64::from(padding));

    log::trace!(
        "Cropped {:?} to {width}x{height} with {padding}px padding",
        image.name()
    );
    Ok(CroppedImage {
        asset: ImageAsset::new(image.name(), padded)?,
        bounds: CropBounds {
            min_x: padding,
            max_x: padding + width - 1,
            min_y: padding,
            max_y: padding + height - 1,
        },
    })
}
