use inkfield_core::{BoundingRect, Point, ShapeError};
use serde::{Deserialize, Serialize};

use super::options::{OptionsPatch, RoughOptions, SharedOptions};
use super::{validate_point, DesignerShape, ShapeKind};
use crate::rough::{self, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleOptions {
    /// Corner where the drag started; any corner is accepted.
    pub point1: Point,
    /// Opposite corner.
    pub point2: Point,
    #[serde(flatten)]
    pub shared: SharedOptions,
    #[serde(flatten)]
    pub rough: RoughOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignRectangle {
    pub options: RectangleOptions,
}

impl DesignRectangle {
    pub fn new(options: RectangleOptions) -> Self {
        Self { options }
    }
}

impl DesignerShape for DesignRectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn bounds(&self) -> BoundingRect {
        BoundingRect::from_corners(self.options.point1, self.options.point2)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.options.point1 = self.options.point1.offset(dx, dy);
        self.options.point2 = self.options.point2.offset(dx, dy);
    }

    fn anchor(&self) -> Point {
        self.bounds().top_left()
    }

    fn shared(&self) -> &SharedOptions {
        &self.options.shared
    }

    fn validate(&self) -> Result<(), ShapeError> {
        validate_point("point1", self.options.point1)?;
        validate_point("point2", self.options.point2)?;
        self.options.shared.validate()?;
        self.options.rough.validate()
    }

    fn apply_patch(&mut self, patch: &OptionsPatch) {
        self.options.shared.apply(patch);
        self.options.rough.apply(patch);
    }

    fn primitives(&self, zoom: f64) -> Vec<Primitive> {
        rough::rectangle(
            &self.bounds(),
            &self.options.shared,
            &self.options.rough,
            zoom,
        )
    }
}
