use std::sync::Arc;

use ::image::RgbaImage;
use inkfield_core::{BoundingRect, Point, ShapeError};
use serde::{Deserialize, Serialize};

use super::options::{OptionsPatch, SharedOptions};
use super::{validate_point, DesignerShape, ShapeKind};
use crate::rough::Primitive;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    /// Top-left corner.
    pub point1: Point,
    /// Bottom-right corner, known once the raster has been decoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point2: Option<Point>,
    /// Data URL or file path.
    pub image: String,
    #[serde(flatten)]
    pub shared: SharedOptions,
}

/// Pending image load, identified by the generation the canvas issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadHandle {
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageState {
    Loading { handle: LoadHandle },
    Ready {
        raster: Arc<RgbaImage>,
        width: u32,
        height: u32,
    },
}

impl Default for ImageState {
    fn default() -> Self {
        ImageState::Loading {
            handle: LoadHandle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignImage {
    pub options: ImageOptions,
    state: ImageState,
}

impl DesignImage {
    pub fn new(options: ImageOptions) -> Self {
        Self {
            options,
            state: ImageState::default(),
        }
    }

    pub fn state(&self) -> &ImageState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ImageState::Ready { .. })
    }

    /// Second corner, collapsed onto `point1` until the size is known.
    pub fn corner(&self) -> Point {
        self.options.point2.unwrap_or(self.options.point1)
    }

    pub(crate) fn begin_load(&mut self, generation: u64) {
        self.state = ImageState::Loading {
            handle: LoadHandle { generation },
        };
    }

    /// Moves to the ready state and sizes the shape from the raster,
    /// scaled to the zoom the shape was created at.
    pub(crate) fn finish_load(&mut self, raster: Arc<RgbaImage>) {
        let (width, height) = raster.dimensions();
        let zoom = self.options.shared.zoom;
        self.options.point2 = Some(self.options.point1.offset(
            f64::from(width) / zoom,
            f64::from(height) / zoom,
        ));
        self.state = ImageState::Ready {
            raster,
            width,
            height,
        };
    }
}

impl DesignerShape for DesignImage {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Image
    }

    fn bounds(&self) -> BoundingRect {
        BoundingRect::from_corners(self.options.point1, self.corner())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.options.point1 = self.options.point1.offset(dx, dy);
        if let Some(p) = self.options.point2.as_mut() {
            *p = p.offset(dx, dy);
        }
    }

    fn anchor(&self) -> Point {
        self.options.point1
    }

    fn shared(&self) -> &SharedOptions {
        &self.options.shared
    }

    fn validate(&self) -> Result<(), ShapeError> {
        validate_point("point1", self.options.point1)?;
        if let Some(p) = self.options.point2 {
            validate_point("point2", p)?;
        }
        if self.options.image.trim().is_empty() {
            return Err(ShapeError::invalid("image", "image reference must not be empty"));
        }
        self.options.shared.validate()
    }

    fn apply_patch(&mut self, patch: &OptionsPatch) {
        self.options.shared.apply(patch);
    }

    fn primitives(&self, _zoom: f64) -> Vec<Primitive> {
        match &self.state {
            ImageState::Loading { .. } => vec![Primitive::Placeholder {
                rect: self.bounds(),
            }],
            ImageState::Ready { raster, .. } => vec![Primitive::Image {
                raster: Arc::clone(raster),
                rect: self.bounds(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementStyle;

    fn picture(zoom: f64) -> DesignImage {
        let style = ElementStyle {
            zoom,
            ..ElementStyle::default()
        };
        DesignImage::new(ImageOptions {
            point1: Point::new(10.0, 20.0),
            point2: None,
            image: "data:image/png;base64,AAAA".to_string(),
            shared: style.shared(),
        })
    }

    #[test]
    fn test_provisional_bounds_are_zero_sized() {
        let img = picture(1.0);
        assert!(!img.is_ready());
        let b = img.bounds();
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.top_left(), Point::new(10.0, 20.0));
        assert!(matches!(img.primitives(1.0)[0], Primitive::Placeholder { .. }));
    }

    #[test]
    fn test_finish_load_scales_by_creation_zoom() {
        let mut img = picture(2.0);
        img.finish_load(Arc::new(RgbaImage::new(100, 50)));
        assert!(img.is_ready());
        assert_eq!(img.options.point2, Some(Point::new(60.0, 45.0)));
        assert!(matches!(img.primitives(1.0)[0], Primitive::Image { .. }));
    }

    #[test]
    fn test_point2_omitted_on_wire_until_known() {
        let img = picture(1.0);
        let value = serde_json::to_value(&img.options).unwrap();
        assert!(value.get("point2").is_none());
        let back: ImageOptions = serde_json::from_value(value).unwrap();
        assert_eq!(back, img.options);
    }

    #[test]
    fn test_blank_reference_rejected() {
        let mut img = picture(1.0);
        img.options.image = "  ".to_string();
        assert!(img.validate().is_err());
    }
}
