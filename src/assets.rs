//! Static image assets.
//!
//! Images are referenced by fixed paths relative to an asset root. Each is
//! loaded at most once: a file that is missing or fails to decode is
//! replaced by a placeholder block and never retried.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Where assets live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub root: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
        }
    }
}

impl AssetsConfig {
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Read and decode a PNG or JPEG file.
    pub fn from_file(path: &Path) -> Result<Self, AssetError> {
        let bytes = fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let img = image::load_from_memory(&bytes)
            .map_err(|source| AssetError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// An image slot on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageAsset {
    Decoded(DecodedImage),
    /// Drawn as a flat block in place of the image.
    Placeholder,
}

impl ImageAsset {
    /// Load `path`, falling back to a placeholder on any error.
    pub fn load_or_placeholder(path: &Path) -> Self {
        match DecodedImage::from_file(path) {
            Ok(img) => {
                tracing::debug!(path = %path.display(), width = img.width, height = img.height, "loaded image");
                ImageAsset::Decoded(img)
            }
            Err(err) => {
                tracing::warn!(error = %err, "image unavailable, using placeholder");
                ImageAsset::Placeholder
            }
        }
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageAsset::Placeholder)
    }
}

/// One-shot image cache keyed by asset-relative path.
#[derive(Debug, Default)]
pub struct AssetStore {
    root: PathBuf,
    images: HashMap<String, ImageAsset>,
}

impl AssetStore {
    pub fn new(config: &AssetsConfig) -> Self {
        Self {
            root: config.root.clone(),
            images: HashMap::new(),
        }
    }

    /// Disk location of an asset path.
    ///
    /// Leading slashes are stripped, so `/hackathons/sih.jpeg` and
    /// `hackathons/sih.jpeg` name the same file.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }

    /// The image at `path`, loading it on first use.
    pub fn image(&mut self, path: &str) -> &ImageAsset {
        let full = self.resolve(path);
        self.images
            .entry(path.to_string())
            .or_insert_with(|| ImageAsset::load_or_placeholder(&full))
    }

    /// Whether `path` has been attempted already.
    pub fn is_loaded(&self, path: &str) -> bool {
        self.images.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-assets-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_is_placeholder() {
        let store_root = scratch_dir("missing");
        let mut store = AssetStore::new(&AssetsConfig::default().with_root(&store_root));
        assert!(store.image("/hackathons/nope.jpeg").is_placeholder());
        assert!(store.is_loaded("/hackathons/nope.jpeg"));
    }

    #[test]
    fn test_decodes_png() {
        let root = scratch_dir("png");
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        img.save(root.join("tiny.png")).unwrap();

        let mut store = AssetStore::new(&AssetsConfig::default().with_root(&root));
        match store.image("tiny.png") {
            ImageAsset::Decoded(d) => {
                assert_eq!((d.width, d.height), (4, 2));
                assert_eq!(&d.rgba[0..4], &[10, 20, 30, 255]);
                assert_eq!(d.aspect(), 2.0);
            }
            ImageAsset::Placeholder => panic!("expected decoded image"),
        }
    }

    #[test]
    fn test_corrupt_file_not_retried() {
        let root = scratch_dir("corrupt");
        fs::write(root.join("bad.jpeg"), b"not an image").unwrap();

        let mut store = AssetStore::new(&AssetsConfig::default().with_root(&root));
        assert!(store.image("bad.jpeg").is_placeholder());

        // Replace with a valid image; the cached placeholder sticks.
        image::RgbaImage::new(1, 1)
            .save_with_format(root.join("bad.jpeg"), image::ImageFormat::Png)
            .unwrap();
        assert!(store.image("bad.jpeg").is_placeholder());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_decode_error_kind() {
        let root = scratch_dir("kind");
        let path = root.join("junk.png");
        fs::write(&path, b"junk").unwrap();
        assert!(matches!(
            DecodedImage::from_file(&path),
            Err(AssetError::Decode { .. })
        ));
        assert!(matches!(
            DecodedImage::from_file(&root.join("absent.png")),
            Err(AssetError::Io { .. })
        ));
    }
}
