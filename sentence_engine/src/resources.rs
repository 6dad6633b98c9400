//! Image metadata lookup.
//!
//! The engine needs image sizes to build hit rectangles for image-backed
//! interacts. Decoding and caching of the pixels themselves belongs to the UI.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use log::warn;
use sentence_data::Size;

use crate::data_paths::data_path;

/// Size used for hit rectangles when an image cannot be read.
pub const PLACEHOLDER_SIZE: Size = Size::new(32, 32);

/// Source of image dimensions, keyed by scene folder and file name.
pub trait ResourceLookup {
    /// Returns `None` when the image is missing or unreadable.
    fn image_size(&self, folder: &str, name: &str) -> Option<Size>;
}

/// Reads image headers from `data/images/<folder>/<name>`.
#[derive(Debug)]
pub struct FileResources {
    root: PathBuf,
    reported: RefCell<HashSet<PathBuf>>,
}

impl FileResources {
    pub fn new() -> Self {
        Self::with_root(data_path("images"))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            reported: RefCell::new(HashSet::new()),
        }
    }
}

impl Default for FileResources {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLookup for FileResources {
    fn image_size(&self, folder: &str, name: &str) -> Option<Size> {
        let path = self.root.join(folder).join(name);
        match image::image_dimensions(&path) {
            Ok((w, h)) => Some(Size::new(w, h)),
            Err(e) => {
                if self.reported.borrow_mut().insert(path.clone()) {
                    warn!("missing image {}: {e}", path.display());
                }
                None
            },
        }
    }
}

/// Serves fixed sizes without touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct FixedResources {
    default: Option<Size>,
    sizes: HashMap<(String, String), Size>,
}

impl FixedResources {
    /// Every image not registered with [`FixedResources::with_size`] reports `default`.
    pub fn new(default: Size) -> Self {
        Self {
            default: Some(default),
            sizes: HashMap::new(),
        }
    }

    /// A lookup where only registered images exist.
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, folder: &str, name: &str, size: Size) -> Self {
        self.sizes.insert((folder.to_string(), name.to_string()), size);
        self
    }
}

impl ResourceLookup for FixedResources {
    fn image_size(&self, folder: &str, name: &str) -> Option<Size> {
        self.sizes
            .get(&(folder.to_string(), name.to_string()))
            .copied()
            .or(self.default)
    }
}
