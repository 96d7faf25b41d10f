use std::{fmt, str::FromStr};

use crate::foundation::error::{BoardError, BoardResult};

/// The named point of a rectangle that a stored coordinate refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Anchor {
    NorthWest,
    North,
    NorthEast,
    West,
    #[default]
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::NorthWest,
        Anchor::North,
        Anchor::NorthEast,
        Anchor::West,
        Anchor::Center,
        Anchor::East,
        Anchor::SouthWest,
        Anchor::South,
        Anchor::SouthEast,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NorthWest => "nw",
            Self::North => "n",
            Self::NorthEast => "ne",
            Self::West => "w",
            Self::Center => "center",
            Self::East => "e",
            Self::SouthWest => "sw",
            Self::South => "s",
            Self::SouthEast => "se",
        }
    }

    /// Horizontal offset from the rectangle centre, in widths: -1/2, 0 or +1/2.
    pub fn fx(self) -> f64 {
        match self {
            Self::NorthWest | Self::West | Self::SouthWest => -0.5,
            Self::North | Self::Center | Self::South => 0.0,
            Self::NorthEast | Self::East | Self::SouthEast => 0.5,
        }
    }

    /// Vertical offset from the rectangle centre, in heights: -1/2, 0 or +1/2.
    pub fn fy(self) -> f64 {
        match self {
            Self::NorthWest | Self::North | Self::NorthEast => -0.5,
            Self::West | Self::Center | Self::East => 0.0,
            Self::SouthWest | Self::South | Self::SouthEast => 0.5,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = BoardError;

    fn from_str(s: &str) -> BoardResult<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                BoardError::invalid_anchor(format!(
                    "'{s}' (expected one of nw, n, ne, w, center, e, sw, s, se)"
                ))
            })
    }
}

impl TryFrom<String> for Anchor {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Anchor> for String {
    fn from(value: Anchor) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/anchor.rs"]
mod tests;
