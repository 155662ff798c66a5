//! # Image assets
//!
//! Decoded source images. Assets are immutable once made and shared by every sprite placed from them,
//! so they are handed around as `Arc<ImageAsset>`.

use image::RgbaImage;

pub type ImageID = crate::UniqueID<ImageAsset>;

/// File name suffixes recognized as images, lowercase.
pub const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".svg"];

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("not an image file name: {0:?}")]
    InvalidFileName(String),
    #[error("image format of {0:?} can't be decoded")]
    UnsupportedFormat(String),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels")]
    EmptyImage,
}

pub struct ImageAsset {
    id: ImageID,
    /// The name the image was loaded under, usually a file name.
    name: String,
    /// Straight (non-premultiplied) RGBA8.
    pixels: RgbaImage,
}
impl ImageAsset {
    /// Wrap already decoded pixels.
    /// # Errors
    /// [`AssetError::EmptyImage`] if the image has zero width or height.
    pub fn new(name: impl Into<String>, pixels: RgbaImage) -> Result<Self, AssetError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(AssetError::EmptyImage);
        }
        Ok(Self {
            id: ImageID::default(),
            name: name.into(),
            pixels,
        })
    }
    /// Decode an encoded image file, choosing the format from the extension of `name`.
    /// # Errors
    /// * `name` isn't an image file name.
    /// * The format has no raster decoder (svg).
    /// * The bytes fail to decode, or decode to an empty image.
    pub fn decode(name: impl Into<String>, bytes: &[u8]) -> Result<Self, AssetError> {
        let name = name.into();
        if !is_image_file_name(&name) {
            return Err(AssetError::InvalidFileName(name));
        }
        let format = match dotless_extension(&name).as_str() {
            "png" => image::ImageFormat::Png,
            "jpg" | "jpeg" => image::ImageFormat::Jpeg,
            _ => return Err(AssetError::UnsupportedFormat(name)),
        };
        let pixels = image::load_from_memory_with_format(bytes, format)?.into_rgba8();
        Self::new(name, pixels)
    }
    #[must_use]
    pub fn id(&self) -> ImageID {
        self.id
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The name a sprite placed from this image wants, before collisions are resolved.
    #[must_use]
    pub fn sprite_name(&self) -> &str {
        strip_image_extension(&self.name)
    }
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
    #[must_use]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
    /// Height of this image when drawn `width` wide, keeping the aspect ratio.
    #[must_use]
    pub fn height_for_width(&self, width: f32) -> f32 {
        width * self.height() as f32 / self.width() as f32
    }
    /// Width of this image when drawn `height` tall, keeping the aspect ratio.
    #[must_use]
    pub fn width_for_height(&self, height: f32) -> f32 {
        height * self.width() as f32 / self.height() as f32
    }
}
impl std::fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAsset")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// Returns the recognized image extension `name` ends with, in its original case.
fn image_extension(name: &str) -> Option<&str> {
    IMAGE_EXTENSIONS.iter().find_map(|extension| {
        let split = name.len().checked_sub(extension.len())?;
        let tail = name.get(split..)?;
        tail.eq_ignore_ascii_case(extension).then_some(tail)
    })
}

/// Whether `name` looks like an image file: non-empty, not hidden, and ending in a known extension.
#[must_use]
pub fn is_image_file_name(name: &str) -> bool {
    // Split never yields nothing, even for an empty string.
    let last_segment = name.rsplit(['/', '\\']).next().unwrap_or(name);
    if name.is_empty() || last_segment.starts_with('.') {
        return false;
    }
    image_extension(name).is_some()
}

/// Strip the image extension off `name`, or return it whole if it isn't an image file name.
#[must_use]
pub fn strip_image_extension(name: &str) -> &str {
    if !is_image_file_name(name) {
        return name;
    }
    match image_extension(name) {
        Some(extension) => &name[..name.len() - extension.len()],
        None => name,
    }
}

fn dotless_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn image_file_names() {
        assert!(is_image_file_name("cat.png"));
        assert!(is_image_file_name("CAT.JPEG"));
        assert!(is_image_file_name("sprites/dog.svg"));
        assert!(is_image_file_name("a\\b\\c.jpg"));

        assert!(!is_image_file_name(""));
        assert!(!is_image_file_name("notes.txt"));
        assert!(!is_image_file_name(".hidden.png"));
        assert!(!is_image_file_name("folder/.hidden.png"));
        assert!(!is_image_file_name("png"));
    }
    #[test]
    fn stripping() {
        assert_eq!(strip_image_extension("cat.png"), "cat");
        assert_eq!(strip_image_extension("Cat.Final.JPG"), "Cat.Final");
        assert_eq!(strip_image_extension("dir/dog.jpeg"), "dir/dog");
        // Not an image name, left alone.
        assert_eq!(strip_image_extension("readme.md"), "readme.md");
        assert_eq!(strip_image_extension(".png"), ".png");
    }
    #[test]
    fn empty_image_rejected() {
        assert!(matches!(
            ImageAsset::new("empty.png", RgbaImage::new(0, 4)),
            Err(AssetError::EmptyImage)
        ));
    }
    #[test]
    fn decode_rejects_bad_names() {
        assert!(matches!(
            ImageAsset::decode("notes.txt", &[]),
            Err(AssetError::InvalidFileName(_))
        ));
        assert!(matches!(
            ImageAsset::decode("vector.svg", b"<svg/>"),
            Err(AssetError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ImageAsset::decode("broken.png", b"definitely not a png"),
            Err(AssetError::Decode(_))
        ));
    }
    #[test]
    fn decode_png() {
        let mut encoded = Vec::new();
        let source = RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        source
            .write_to(
                &mut std::io::Cursor::new(&mut encoded),
                image::ImageFormat::Png,
            )
            .unwrap();

        let asset = ImageAsset::decode("tiny.PNG", &encoded).unwrap();
        assert_eq!((asset.width(), asset.height()), (3, 2));
        assert_eq!(asset.sprite_name(), "tiny");
        assert_eq!(asset.pixels().get_pixel(2, 1).0, [10, 20, 30, 255]);
    }
    #[test]
    fn aspect_ratio() {
        let asset = ImageAsset::new("wide.png", RgbaImage::new(40, 10)).unwrap();
        assert_eq!(asset.height_for_width(80.0), 20.0);
        assert_eq!(asset.width_for_height(5.0), 20.0);
    }
}
