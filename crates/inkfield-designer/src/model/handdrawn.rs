use inkfield_core::{BoundingRect, Point, ShapeError};
use serde::{Deserialize, Serialize};

use super::options::{OptionsPatch, SharedOptions};
use super::{validate_point, DesignerShape, ShapeKind};
use crate::rough::{self, Primitive};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandDrawnOptions {
    /// Recorded pointer positions in drawing order.
    pub paths: Vec<Point>,
    #[serde(flatten)]
    pub shared: SharedOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignHandDrawn {
    pub options: HandDrawnOptions,
}

impl DesignHandDrawn {
    pub fn new(options: HandDrawnOptions) -> Self {
        Self { options }
    }
}

impl DesignerShape for DesignHandDrawn {
    fn kind(&self) -> ShapeKind {
        ShapeKind::HandDrawn
    }

    fn bounds(&self) -> BoundingRect {
        BoundingRect::from_points(&self.options.paths)
            .unwrap_or_else(|| BoundingRect::from_corners(Point::default(), Point::default()))
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.options.paths {
            *p = p.offset(dx, dy);
        }
    }

    fn anchor(&self) -> Point {
        self.options.paths.first().copied().unwrap_or_default()
    }

    fn shared(&self) -> &SharedOptions {
        &self.options.shared
    }

    fn validate(&self) -> Result<(), ShapeError> {
        if self.options.paths.is_empty() {
            return Err(ShapeError::invalid("paths", "a stroke needs at least one point"));
        }
        for p in &self.options.paths {
            validate_point("paths", *p)?;
        }
        self.options.shared.validate()
    }

    fn apply_patch(&mut self, patch: &OptionsPatch) {
        self.options.shared.apply(patch);
    }

    fn primitives(&self, _zoom: f64) -> Vec<Primitive> {
        rough::freehand(&self.options.paths, &self.options.shared)
    }
}
