//! Test fixture helpers for creating temporary test data.
//!
//! Everything lives in a [`TempDir`] that is removed on drop.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};
use snapcrop::storage::{FixedClock, ImageStore, StorageRoot};
use tempfile::TempDir;

pub const APP_ID: &str = snapcrop::config::DEFAULT_APP_ID;

/// Solid-color RGB image.
#[must_use]
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// Image with a horizontal gradient so crops are distinguishable.
#[must_use]
pub fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, _| {
        let v = u8::try_from(x * 255 / width.max(1)).unwrap_or(u8::MAX);
        Rgb([v, 255 - v, 128])
    });
    DynamicImage::ImageRgb8(img)
}

/// A temporary workspace holding a storage root, stills and a config file.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("sdcard")).expect("Failed to create storage root");
        Self { dir }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Mounted storage root.
    #[must_use]
    pub fn storage_root(&self) -> PathBuf {
        self.path().join("sdcard")
    }

    /// Where captures land for [`APP_ID`].
    #[must_use]
    pub fn image_dir(&self) -> PathBuf {
        self.storage_root()
            .join("Android")
            .join("data")
            .join(APP_ID)
            .join("Images")
    }

    /// Store writing under [`Self::storage_root`] with a frozen clock.
    #[must_use]
    pub fn store(&self, millis: i64) -> ImageStore {
        ImageStore::with_clock(
            StorageRoot::new(self.storage_root()),
            APP_ID,
            Box::new(FixedClock(millis)),
        )
    }

    /// Write a PNG still and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the image cannot be written.
    pub fn write_still(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path().join(name);
        gradient_image(width, height)
            .save(&path)
            .unwrap_or_else(|e| panic!("Failed to save still at {path:?}: {e}"));
        path
    }

    /// Write a config file and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_config(&self, body: &str) -> PathBuf {
        let path = self.path().join("config.toml");
        fs::write(&path, body).expect("Failed to write config");
        path
    }

    /// Stored `.jpg` files, sorted by name.
    #[must_use]
    pub fn stored_files(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.image_dir()) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "jpg"))
            .collect();
        files.sort();
        files
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
