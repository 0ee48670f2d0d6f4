//! Option sets shared by several shape variants.
//!
//! Variant option structs flatten [`SharedOptions`] (and [`RoughOptions`]
//! where the variant is drawn by the hand-drawn generator) so the portable
//! form of every variant is a single flat camelCase object.

use inkfield_core::style::{
    validate_line_dash, validate_opacity, validate_stroke_width, validate_zoom,
};
use inkfield_core::{FillStyle, FontFamily, ShapeError};
use serde::{Deserialize, Serialize};

/// Attributes every shape variant carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedOptions {
    pub opacity: f64,
    pub stroke: String,
    pub stroke_width: u32,
    /// Zoom level active when the shape's geometry was last generated.
    pub zoom: f64,
}

impl SharedOptions {
    pub fn validate(&self) -> Result<(), ShapeError> {
        validate_opacity(self.opacity)?;
        validate_stroke_width(self.stroke_width)?;
        validate_zoom(self.zoom)
    }

    pub(crate) fn apply(&mut self, patch: &OptionsPatch) {
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(stroke) = &patch.stroke {
            self.stroke = stroke.clone();
        }
        if let Some(width) = patch.stroke_width {
            self.stroke_width = width;
        }
        if let Some(zoom) = patch.zoom {
            self.zoom = zoom;
        }
    }
}

/// Styling consumed by the hand-drawn generator (rectangles and lines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoughOptions {
    pub fill: String,
    pub fill_style: FillStyle,
    pub stroke_line_dash: Vec<f64>,
    /// Drives the jitter; stored so re-renders are pixel-stable.
    pub seed: u32,
}

impl RoughOptions {
    pub fn validate(&self) -> Result<(), ShapeError> {
        validate_line_dash(&self.stroke_line_dash)
    }

    pub(crate) fn apply(&mut self, patch: &OptionsPatch) {
        if let Some(fill) = &patch.fill {
            self.fill = fill.clone();
        }
        if let Some(fill_style) = patch.fill_style {
            self.fill_style = fill_style;
        }
        if let Some(dash) = &patch.stroke_line_dash {
            self.stroke_line_dash = dash.clone();
        }
        if let Some(seed) = patch.seed {
            self.seed = seed;
        }
    }
}

/// Partial option update for `regenerate`.
///
/// Fields that do not apply to a variant (a font on a rectangle, a seed on
/// text) are ignored by that variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsPatch {
    pub opacity: Option<f64>,
    pub stroke: Option<String>,
    pub stroke_width: Option<u32>,
    pub zoom: Option<f64>,
    pub fill: Option<String>,
    pub fill_style: Option<FillStyle>,
    pub stroke_line_dash: Option<Vec<f64>>,
    pub seed: Option<u32>,
    pub font: Option<FontFamily>,
    pub font_size: Option<u32>,
}

impl OptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }

    pub fn with_stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_fill_style(mut self, fill_style: FillStyle) -> Self {
        self.fill_style = Some(fill_style);
        self
    }

    pub fn with_stroke_line_dash(mut self, dash: Vec<f64>) -> Self {
        self.stroke_line_dash = Some(dash);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_font(mut self, font: FontFamily) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fully resolved style handed to the shape factory.
///
/// Built by the canvas from its style defaults, its current zoom level and a
/// fresh seed.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementStyle {
    pub opacity: f64,
    pub stroke: String,
    pub stroke_width: u32,
    pub zoom: f64,
    pub fill: String,
    pub fill_style: FillStyle,
    pub stroke_line_dash: Vec<f64>,
    pub seed: u32,
    pub font: FontFamily,
    pub font_size: u32,
}

impl ElementStyle {
    pub fn shared(&self) -> SharedOptions {
        SharedOptions {
            opacity: self.opacity,
            stroke: self.stroke.clone(),
            stroke_width: self.stroke_width,
            zoom: self.zoom,
        }
    }

    pub fn rough(&self) -> RoughOptions {
        RoughOptions {
            fill: self.fill.clone(),
            fill_style: self.fill_style,
            stroke_line_dash: self.stroke_line_dash.clone(),
            seed: self.seed,
        }
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            stroke: "#B20000".to_string(),
            stroke_width: 6,
            zoom: 1.0,
            fill: "#A7A7A7".to_string(),
            fill_style: FillStyle::Hachure,
            stroke_line_dash: Vec::new(),
            seed: 1,
            font: FontFamily::Minecraft,
            font_size: 24,
        }
    }
}

