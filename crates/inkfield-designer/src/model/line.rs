use inkfield_core::constants::LINE_HIT_SLOP_PX;
use inkfield_core::geometry::distance_to_segment;
use inkfield_core::{BoundingRect, Point, ShapeError};
use serde::{Deserialize, Serialize};

use super::options::{OptionsPatch, RoughOptions, SharedOptions};
use super::{validate_point, DesignerShape, ShapeKind};
use crate::rough::{self, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineOptions {
    pub point1: Point,
    pub point2: Point,
    #[serde(flatten)]
    pub shared: SharedOptions,
    /// Fill fields are carried for a uniform wire form but never drawn.
    #[serde(flatten)]
    pub rough: RoughOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignLine {
    pub options: LineOptions,
}

impl DesignLine {
    pub fn new(options: LineOptions) -> Self {
        Self { options }
    }

    /// Hit distance in world units: half the stroke plus a fixed screen slop
    /// measured at the zoom the line was generated at.
    pub fn hit_tolerance(&self) -> f64 {
        let shared = &self.options.shared;
        f64::from(shared.stroke_width) / 2.0 + LINE_HIT_SLOP_PX / shared.zoom
    }
}

impl DesignerShape for DesignLine {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn bounds(&self) -> BoundingRect {
        BoundingRect::from_corners(self.options.point1, self.options.point2)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.options.point1 = self.options.point1.offset(dx, dy);
        self.options.point2 = self.options.point2.offset(dx, dy);
    }

    fn anchor(&self) -> Point {
        self.options.point1
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
        rough::line(
            self.options.point1,
            self.options.point2,
            &self.options.shared,
            &self.options.rough,
            zoom,
        )
    }

    // A diagonal line's bounding box is mostly empty space.
    fn contains_point(&self, p: Point) -> bool {
        distance_to_segment(p, self.options.point1, self.options.point2) <= self.hit_tolerance()
    }
}
