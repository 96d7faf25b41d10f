use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
};

use anyhow::Context;

use crate::{
    assets::{decode::PreparedImage, store::ImageStore},
    draw::{surface::FontRole, surface::ImageId, text::TextEngine},
    foundation::core::Rgba8,
    foundation::error::{BoardError, BoardResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub text: Rgba8,
    /// Time of a departure that can no longer be reached.
    pub no_time: Rgba8,
    pub error: Rgba8,
    pub background_stations: Rgba8,
    pub background_info: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Rgba8::WHITE,
            no_time: Rgba8::rgb(0xd2, 0x22, 0x22),
            error: Rgba8::rgb(0x80, 0x80, 0x80),
            background_stations: Rgba8::rgb(0x28, 0x28, 0x2d),
            background_info: Rgba8::rgb(0x40, 0x70, 0xc5),
        }
    }
}

/// Fixed widths and boxes, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub icon_width: f64,
    pub direction_width: f64,
    pub poster_width: f64,
    pub poster_height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            icon_width: 40.0,
            direction_width: 250.0,
            poster_width: 450.0,
            poster_height: 600.0,
        }
    }
}

impl Dimensions {
    pub fn validate(&self) -> BoardResult<()> {
        for (label, v) in [
            ("icon_width", self.icon_width),
            ("direction_width", self.direction_width),
            ("poster_width", self.poster_width),
            ("poster_height", self.poster_height),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(BoardError::validation(format!(
                    "{label} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub path: std::path::PathBuf,
    pub size_px: f32,
}

/// Images and styling shared by every artist of a board.
///
/// Built once at startup and owned by the board.
#[derive(Clone, Debug, Default)]
pub struct Resources {
    pub palette: Palette,
    pub dims: Dimensions,
    images: ImageStore,
    icons: HashMap<String, ImageId>,
    posters: Vec<ImageId>,
}

impl Resources {
    pub fn new(palette: Palette, dims: Dimensions) -> Self {
        Self {
            palette,
            dims,
            ..Self::default()
        }
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Registers an icon under a line id, a product name or `default`.
    pub fn insert_icon(&mut self, key: impl Into<String>, image: PreparedImage) -> ImageId {
        let id = self.images.insert(image);
        self.icons.insert(key.into(), id);
        id
    }

    pub fn add_poster(&mut self, image: PreparedImage) -> ImageId {
        let id = self.images.insert(image);
        self.posters.push(id);
        id
    }

    pub fn posters(&self) -> &[ImageId] {
        &self.posters
    }

    /// Icon of `line`, falling back to the product's icon, then to `default`.
    pub fn icon_for(&self, line: &str, product: &str) -> Option<ImageId> {
        if let Some(id) = self.icons.get(line) {
            return Some(*id);
        }
        tracing::warn!(line, product, "no icon for line, using product icon");
        if let Some(id) = self.icons.get(product) {
            return Some(*id);
        }
        tracing::warn!(line, "no icon for product, using default icon");
        self.icons.get("default").copied()
    }

    /// Loads every image in `dir` as an icon keyed by its file stem, shrunk into
    /// an `icon_width` square.
    pub fn load_icon_dir(&mut self, dir: &Path) -> BoardResult<usize> {
        let entries =
            std::fs::read_dir(dir).with_context(|| format!("read icon dir '{}'", dir.display()))?;
        let side = self.dims.icon_width.max(1.0) as u32;
        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_file())
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let Some(key) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            match self.images.load_file(&path, Some((side, side))) {
                Ok(id) => {
                    self.icons.insert(key, id);
                    loaded += 1;
                }
                Err(err) => tracing::warn!(path = %path.display(), %err, "icon skipped"),
            }
        }
        Ok(loaded)
    }

    /// Loads a poster shrunk into the poster box.
    pub fn load_poster(&mut self, path: &Path) -> BoardResult<ImageId> {
        let max = (
            self.dims.poster_width.max(1.0) as u32,
            self.dims.poster_height.max(1.0) as u32,
        );
        let id = self.images.load_file(path, Some(max))?;
        self.posters.push(id);
        Ok(id)
    }
}

/// Reads each font file relative to `base` and registers it with `engine`.
pub fn register_fonts(
    fonts: &BTreeMap<FontRole, FontSpec>,
    base: &Path,
    engine: &mut TextEngine,
) -> BoardResult<()> {
    for (role, spec) in fonts {
        let path = base.join(&spec.path);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read font '{}'", path.display()))?;
        engine.register(*role, bytes, spec.size_px)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/board/resources.rs"]
mod tests;
