//! Reading source images from disk.

use std::{path::Path, sync::Arc};

use anyhow::Context;
use collage_core::asset::ImageAsset;

/// Read and decode one image. The asset is named after the file name.
/// # Errors
/// The path has no UTF-8 file name, can't be read, or doesn't decode.
pub fn read_image(path: &Path) -> anyhow::Result<ImageAsset> {
    let name = path
        .file_name()
        .and_then(std::ffi::OsStr::to_str)
        .ok_or_else(|| anyhow::anyhow!("{path:?} has no usable file name"))?;
    let bytes = std::fs::read(path).with_context(|| format!("reading {path:?}"))?;
    ImageAsset::decode(name, &bytes).with_context(|| format!("decoding {path:?}"))
}

/// Read many images in parallel. Failures are logged and skipped.
/// The result is sorted by asset name.
#[must_use]
pub fn read_images(paths: Vec<std::path::PathBuf>) -> Vec<Arc<ImageAsset>> {
    use rayon::iter::{IntoParallelIterator, ParallelIterator};
    let mut images: Vec<Arc<ImageAsset>> = paths
        .into_par_iter()
        .filter_map(|path| match read_image(&path) {
            Ok(image) => Some(Arc::new(image)),
            Err(e) => {
                log::warn!("failed to open image {path:?}: {e:#}");
                None
            }
        })
        .collect();
    images.sort_by(|a, b| a.name().cmp(b.name()));
    images
}
