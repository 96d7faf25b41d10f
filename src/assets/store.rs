use std::path::Path;

use anyhow::Context;

use crate::{
    assets::decode::{PreparedImage, decode_image, decode_thumbnail},
    draw::surface::ImageId,
    foundation::core::Size,
    foundation::error::{BoardError, BoardResult},
};

/// Decoded images addressed by [`ImageId`]. Loaded once, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct ImageStore {
    images: Vec<PreparedImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image: PreparedImage) -> ImageId {
        self.images.push(image);
        ImageId((self.images.len() - 1) as u32)
    }

    /// Reads and decodes `path`, shrinking it into `max` when given.
    pub fn load_file(&mut self, path: &Path, max: Option<(u32, u32)>) -> BoardResult<ImageId> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        let image = match max {
            Some((w, h)) => decode_thumbnail(&bytes, w, h),
            None => decode_image(&bytes),
        }
        .map_err(|e| BoardError::validation(format!("image '{}': {e}", path.display())))?;
        Ok(self.insert(image))
    }

    pub fn get(&self, id: ImageId) -> Option<&PreparedImage> {
        self.images.get(id.0 as usize)
    }

    pub fn size(&self, id: ImageId) -> Option<Size> {
        self.get(id)
            .map(|i| Size::new(f64::from(i.width), f64::from(i.height)))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
