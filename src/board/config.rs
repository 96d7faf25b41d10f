use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    artists::event::Event,
    board::resources::{Dimensions, FontSpec, Palette},
    departures::{model::Station, pipeline::DirectionFilter},
    draw::surface::FontRole,
    foundation::core::Canvas,
    foundation::error::{BoardError, BoardResult},
    layout::anchor::Anchor,
};

/// Update periods in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Periods {
    pub stations: u64,
    pub posters: u64,
    pub clock: u64,
}

impl Default for Periods {
    fn default() -> Self {
        Self {
            stations: 5,
            posters: 18,
            clock: 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Between adjacent columns.
    pub col: f64,
    /// Between adjacent rows.
    pub row: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            col: 20.0,
            row: 10.0,
        }
    }
}

fn default_columns() -> Vec<f64> {
    vec![2.0, 1.0]
}

fn default_title_anchor() -> Anchor {
    Anchor::West
}

/// Board configuration document (JSON).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default)]
    pub periods: Periods,
    /// Weights of the stations and info columns.
    #[serde(default = "default_columns")]
    pub columns: Vec<f64>,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default = "default_title_anchor")]
    pub title_anchor: Anchor,
    #[serde(default)]
    pub fonts: BTreeMap<FontRole, FontSpec>,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub dims: Dimensions,
    #[serde(default)]
    pub direction_filter: DirectionFilter,
    #[serde(default)]
    pub icon_dir: Option<PathBuf>,
    pub stations: Vec<Station>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub posters: Vec<PathBuf>,
}

impl BoardConfig {
    pub fn from_json_str(s: &str) -> BoardResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path(path: &Path) -> BoardResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> BoardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> BoardResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(BoardError::validation("canvas width/height must be > 0"));
        }
        if self.periods.stations == 0 || self.periods.posters == 0 || self.periods.clock == 0 {
            return Err(BoardError::validation("update periods must be > 0 seconds"));
        }
        if self.columns.len() != 2 {
            return Err(BoardError::validation(
                "columns must hold exactly two weights (stations, info)",
            ));
        }
        if self.columns.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(BoardError::validation("column weights must be finite and >= 0"));
        }
        crate::layout::grid::normalize(&self.columns)
            .map_err(|e| BoardError::validation(format!("columns: {e}")))?;
        if !self.padding.col.is_finite()
            || !self.padding.row.is_finite()
            || self.padding.col < 0.0
            || self.padding.row < 0.0
        {
            return Err(BoardError::validation("padding must be finite and >= 0"));
        }
        for (role, font) in &self.fonts {
            if !font.size_px.is_finite() || font.size_px <= 0.0 {
                return Err(BoardError::validation(format!(
                    "font {role:?} size_px must be finite and > 0"
                )));
            }
        }
        self.dims.validate()?;
        if self.stations.is_empty() {
            return Err(BoardError::validation("at least one station is required"));
        }
        for station in &self.stations {
            station.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/board/config.rs"]
mod tests;
