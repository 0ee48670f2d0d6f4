use inkfield_core::style::validate_font_size;
use inkfield_core::{BoundingRect, FontFamily, Point, ShapeError};
use serde::{Deserialize, Serialize};

use super::options::{OptionsPatch, SharedOptions};
use super::{validate_point, DesignerShape, ShapeKind};
use crate::fonts;
use crate::rough::Primitive;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    /// Top-left corner of the first line.
    pub point1: Point,
    /// Newline separated lines.
    pub text: String,
    pub font: FontFamily,
    pub font_size: u32,
    #[serde(flatten)]
    pub shared: SharedOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignText {
    pub options: TextOptions,
}

impl DesignText {
    pub fn new(options: TextOptions) -> Self {
        Self { options }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.options.text.split('\n')
    }

    /// Extent of the text block in world units.
    ///
    /// Widths come from the glyph advances of the resolved face.
    pub fn extent(&self) -> (f64, f64) {
        let font = self.options.font;
        fonts::measure_lines(
            fonts::font_for(font),
            font,
            f64::from(self.options.font_size),
            self.lines(),
        )
    }
}

impl DesignerShape for DesignText {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Text
    }

    fn bounds(&self) -> BoundingRect {
        let (w, h) = self.extent();
        BoundingRect::from_corners(self.options.point1, self.options.point1.offset(w, h))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.options.point1 = self.options.point1.offset(dx, dy);
    }

    fn anchor(&self) -> Point {
        self.options.point1
    }

    fn shared(&self) -> &SharedOptions {
        &self.options.shared
    }

    fn validate(&self) -> Result<(), ShapeError> {
        validate_point("point1", self.options.point1)?;
        if self.options.text.is_empty() {
            return Err(ShapeError::invalid("text", "text must not be empty"));
        }
        validate_font_size(self.options.font_size)?;
        self.options.shared.validate()
    }

    fn apply_patch(&mut self, patch: &OptionsPatch) {
        self.options.shared.apply(patch);
        if let Some(font) = patch.font {
            self.options.font = font;
        }
        if let Some(size) = patch.font_size {
            self.options.font_size = size;
        }
    }

    fn primitives(&self, _zoom: f64) -> Vec<Primitive> {
        vec![Primitive::Text {
            origin: self.options.point1,
            lines: self.lines().map(str::to_string).collect(),
            font: self.options.font,
            size: f64::from(self.options.font_size),
            color: self.options.shared.stroke.clone(),
        }]
    }
}
