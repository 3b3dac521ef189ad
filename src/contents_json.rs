//! Contents.json data model for Apple's Asset Catalog format
//!
//! Mirrors the subset of the asset catalog `Contents.json` schema that an
//! `AppIcon.appiconset` for macOS needs.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    /// One entry per icon slot
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within an asset catalog
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// The filename for the image file
    pub filename: String,

    /// The device type for the image; always "mac" here
    pub idiom: String,

    /// The scale factor for the image ("1x" or "2x")
    pub scale: String,

    /// The size of the slot in points (e.g., "16x16")
    pub size: String,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The format version of the asset catalog (always 1)
    pub version: u8,

    /// The tool that authored the asset catalog
    pub author: String,
}

impl ContentsFile {
    /// Creates a new Contents.json structure with the specified author
    pub fn new(author: String) -> Self {
        Self {
            images: Vec::new(),
            info: Info { version: 1, author },
        }
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }
}

impl ImageEntry {
    /// Creates a macOS app icon slot entry
    ///
    /// # Arguments
    /// * `filename` - The file backing the slot
    /// * `points` - Slot edge length in points
    /// * `scale` - 1 or 2
    pub fn mac(filename: String, points: u32, scale: u32) -> Self {
        Self {
            filename,
            idiom: "mac".to_string(),
            scale: format!("{scale}x"),
            size: format!("{points}x{points}"),
        }
    }
}

impl Default for Info {
    fn default() -> Self {
        Self {
            version: 1,
            author: "torbo-icon".to_string(),
        }
    }
}

/// Writes a Contents.json file to the specified directory
///
/// # Errors
/// Returns an error if JSON serialization or the file write fails
pub fn write_contents_json(dir: &Path, images: Vec<ImageEntry>) -> Result<()> {
    let mut contents = ContentsFile::new(Info::default().author);
    for image in images {
        contents.add_image(image);
    }
    let json =
        serde_json::to_string_pretty(&contents).context("Failed to serialize Contents.json")?;
    let path = dir.join("Contents.json");
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write {}", path.display()))
}
