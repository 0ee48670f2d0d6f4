//! Style domains shared by shape options and configuration.
//!
//! Enumerated options are Rust enums, so an unknown string fails at
//! deserialization. Numeric domains (stroke width, font size, opacity) stay
//! plain numbers on the wire and are checked by the `validate_*` helpers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{FONT_SIZES, STROKE_WIDTHS};
use crate::error::ShapeError;

/// Fill pattern used by the hand-drawn generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStyle {
    Solid,
    Zigzag,
    Dots,
    #[default]
    Hachure,
}

impl fmt::Display for FillStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => write!(f, "solid"),
            Self::Zigzag => write!(f, "zigzag"),
            Self::Dots => write!(f, "dots"),
            Self::Hachure => write!(f, "hachure"),
        }
    }
}

impl FromStr for FillStyle {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "zigzag" => Ok(Self::Zigzag),
            "dots" => Ok(Self::Dots),
            "hachure" => Ok(Self::Hachure),
            other => Err(ShapeError::invalid("fillStyle", format!("unknown fill style '{other}'"))),
        }
    }
}

/// Font families available to text shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Code,
    Hand,
    #[default]
    Minecraft,
}

impl FontFamily {
    /// Preferred system face for this family.
    pub fn face_name(self) -> &'static str {
        match self {
            Self::Code => "FiraCode",
            Self::Hand => "ZenDots",
            Self::Minecraft => "Minecraft",
        }
    }

    /// Average glyph advance as a fraction of the font size, used only
    /// when no face can be loaded.
    pub fn advance_ratio(self) -> f64 {
        match self {
            Self::Code => 0.6,
            Self::Hand => 0.78,
            Self::Minecraft => 0.62,
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code => write!(f, "code"),
            Self::Hand => write!(f, "hand"),
            Self::Minecraft => write!(f, "minecraft"),
        }
    }
}

impl FromStr for FontFamily {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "hand" => Ok(Self::Hand),
            "minecraft" => Ok(Self::Minecraft),
            other => Err(ShapeError::invalid("font", format!("unknown font '{other}'"))),
        }
    }
}

pub fn validate_opacity(opacity: f64) -> Result<(), ShapeError> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        Err(ShapeError::invalid("opacity", format!("{opacity} is outside [0, 1]")))
    }
}

pub fn validate_stroke_width(width: u32) -> Result<(), ShapeError> {
    if STROKE_WIDTHS.contains(&width) {
        Ok(())
    } else {
        Err(ShapeError::invalid(
            "strokeWidth",
            format!("{width} is not one of {STROKE_WIDTHS:?}"),
        ))
    }
}

pub fn validate_font_size(size: u32) -> Result<(), ShapeError> {
    if FONT_SIZES.contains(&size) {
        Ok(())
    } else {
        Err(ShapeError::invalid(
            "fontSize",
            format!("{size} is not one of {FONT_SIZES:?}"),
        ))
    }
}

pub fn validate_zoom(zoom: f64) -> Result<(), ShapeError> {
    if zoom.is_finite() && zoom > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::invalid("zoom", format!("{zoom} must be a positive number")))
    }
}

pub fn validate_line_dash(dash: &[f64]) -> Result<(), ShapeError> {
    match dash.iter().find(|d| !d.is_finite() || **d < 0.0) {
        Some(bad) => Err(ShapeError::invalid(
            "strokeLineDash",
            format!("dash length {bad} must be a non-negative number"),
        )),
        None => Ok(()),
    }
}
