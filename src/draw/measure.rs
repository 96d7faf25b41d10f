use std::collections::BTreeMap;

use crate::draw::surface::FontRole;

/// Text measurement contract.
pub trait Measure {
    fn text_width(&mut self, text: &str, font: FontRole) -> f64;

    /// Height of one line of glyphs, without leading.
    fn font_height(&mut self, font: FontRole) -> f64;

    fn line_height(&mut self, font: FontRole) -> f64 {
        1.3 * self.font_height(font)
    }

    /// Height of a (possibly multi-line) block of text.
    fn text_height(&mut self, text: &str, font: FontRole) -> f64 {
        let lines = text.lines().count().max(1);
        (0.3 + lines as f64) * self.font_height(font)
    }
}

/// Shortens `text` so that it fits strictly inside `available`.
///
/// Text narrower than `available` is returned as is. Otherwise characters are
/// taken left to right, each measured on its own, while the running width
/// (starting from the marker's width) stays below `available`; the marker is
/// appended to the kept prefix.
pub fn truncate_to_width(
    measure: &mut dyn Measure,
    text: &str,
    font: FontRole,
    available: f64,
    marker: &str,
) -> String {
    if measure.text_width(text, font) < available {
        return text.to_string();
    }

    let mut occupied = measure.text_width(marker, font);
    let mut end = 0;
    let mut buf = [0u8; 4];
    for (idx, ch) in text.char_indices() {
        let w = measure.text_width(ch.encode_utf8(&mut buf), font);
        if occupied + w >= available {
            break;
        }
        occupied += w;
        end = idx + ch.len_utf8();
    }
    format!("{}{}", &text[..end], marker)
}

/// Fixed-pitch metrics: every character has the same advance per font role.
#[derive(Clone, Debug)]
pub struct FixedMeasure {
    char_width: f64,
    font_height: f64,
    overrides: BTreeMap<FontRole, (f64, f64)>,
}

impl FixedMeasure {
    pub fn new(char_width: f64, font_height: f64) -> Self {
        Self {
            char_width,
            font_height,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_role(mut self, role: FontRole, char_width: f64, font_height: f64) -> Self {
        self.overrides.insert(role, (char_width, font_height));
        self
    }

    fn metrics(&self, role: FontRole) -> (f64, f64) {
        self.overrides
            .get(&role)
            .copied()
            .unwrap_or((self.char_width, self.font_height))
    }
}

impl Measure for FixedMeasure {
    fn text_width(&mut self, text: &str, font: FontRole) -> f64 {
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        widest as f64 * self.metrics(font).0
    }

    fn font_height(&mut self, font: FontRole) -> f64 {
        self.metrics(font).1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/measure.rs"]
mod tests;
