//! Shape variants and the contract they share.
//!
//! [`Shape`] is the closed set of drawable variants. Every operation the
//! canvas performs on a shape is a `match` over it, so adding a variant is a
//! compile error everywhere dispatch is missing.

use std::fmt;
use std::str::FromStr;

use inkfield_core::geometry::point_in_rectangle;
use inkfield_core::{BoundingRect, Point, PortableError, ShapeError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rough::Primitive;

mod handdrawn;
mod image;
mod line;
mod options;
mod rectangle;
mod text;

pub use handdrawn::{DesignHandDrawn, HandDrawnOptions};
pub use self::image::{DesignImage, ImageOptions, ImageState, LoadHandle};
pub use line::{DesignLine, LineOptions};
pub use options::{ElementStyle, OptionsPatch, RoughOptions, SharedOptions};
pub use rectangle::{DesignRectangle, RectangleOptions};
pub use text::{DesignText, TextOptions};

/// Stable shape identifier.
///
/// Freshly created shapes get a UUID v4; imported shapes keep whatever id
/// the payload carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ShapeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Discriminator tag of a shape, as written in portable scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Line,
    Text,
    HandDrawn,
    Image,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rectangle,
        ShapeKind::Line,
        ShapeKind::Text,
        ShapeKind::HandDrawn,
        ShapeKind::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Line => "line",
            ShapeKind::Text => "text",
            ShapeKind::HandDrawn => "handdrawn",
            ShapeKind::Image => "image",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = PortableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PortableError::UnknownVariant { tag: s.to_string() })
    }
}

/// Options snapshot of any variant.
///
/// Serialized without a tag; the owning element's `shape` field carries the
/// discriminator and [`ElementOptions::from_value`] dispatches on it.
/// Numbers pass through typed fields, so an integral `"opacity": 1` comes
/// back out as `1.0`; re-exports are stable, not byte-equal to hand input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementOptions {
    Rectangle(RectangleOptions),
    Line(LineOptions),
    Text(TextOptions),
    HandDrawn(HandDrawnOptions),
    Image(ImageOptions),
}

impl ElementOptions {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ElementOptions::Rectangle(_) => ShapeKind::Rectangle,
            ElementOptions::Line(_) => ShapeKind::Line,
            ElementOptions::Text(_) => ShapeKind::Text,
            ElementOptions::HandDrawn(_) => ShapeKind::HandDrawn,
            ElementOptions::Image(_) => ShapeKind::Image,
        }
    }

    pub fn shared(&self) -> &SharedOptions {
        match self {
            ElementOptions::Rectangle(o) => &o.shared,
            ElementOptions::Line(o) => &o.shared,
            ElementOptions::Text(o) => &o.shared,
            ElementOptions::HandDrawn(o) => &o.shared,
            ElementOptions::Image(o) => &o.shared,
        }
    }

    /// Decodes the options object of an element tagged `kind`.
    ///
    /// Schema mismatches (missing keys, wrong types, unknown enum strings)
    /// surface as [`ShapeError::InvalidOptions`]; domain checks happen later
    /// in [`Shape::from_options`].
    pub fn from_value(kind: ShapeKind, value: serde_json::Value) -> Result<Self, ShapeError> {
        fn decode<T: serde::de::DeserializeOwned>(
            value: serde_json::Value,
        ) -> Result<T, ShapeError> {
            serde_json::from_value(value).map_err(|e| ShapeError::invalid("options", e.to_string()))
        }

        Ok(match kind {
            ShapeKind::Rectangle => ElementOptions::Rectangle(decode(value)?),
            ShapeKind::Line => ElementOptions::Line(decode(value)?),
            ShapeKind::Text => ElementOptions::Text(decode(value)?),
            ShapeKind::HandDrawn => ElementOptions::HandDrawn(decode(value)?),
            ShapeKind::Image => ElementOptions::Image(decode(value)?),
        })
    }
}

/// The geometry a user gesture supplies when creating a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Rectangle { point1: Point, point2: Point },
    Line { point1: Point, point2: Point },
    Text { point1: Point, text: String },
    HandDrawn { paths: Vec<Point> },
    Image { point1: Point, image: String },
}

impl ShapeGeometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeGeometry::Line { .. } => ShapeKind::Line,
            ShapeGeometry::Text { .. } => ShapeKind::Text,
            ShapeGeometry::HandDrawn { .. } => ShapeKind::HandDrawn,
            ShapeGeometry::Image { .. } => ShapeKind::Image,
        }
    }
}

/// Behaviour every shape variant provides.
pub trait DesignerShape {
    fn kind(&self) -> ShapeKind;

    /// Normalized axis-aligned bounds of the shape's geometry.
    fn bounds(&self) -> BoundingRect;

    fn translate(&mut self, dx: f64, dy: f64);

    /// The point `move_to` places at its target.
    fn anchor(&self) -> Point;

    fn shared(&self) -> &SharedOptions;

    /// Checks every option against its domain.
    fn validate(&self) -> Result<(), ShapeError>;

    /// Merges the fields of `patch` that apply to this variant.
    fn apply_patch(&mut self, patch: &OptionsPatch);

    /// Backend-neutral drawing instructions at `zoom`.
    fn primitives(&self, zoom: f64) -> Vec<Primitive>;

    /// Coarse hit test against the bounding rectangle.
    fn contains_point(&self, p: Point) -> bool {
        let [a, b, c, d] = self.bounds().corners();
        point_in_rectangle(a, b, c, d, p)
    }
}

pub(crate) fn validate_point(option: &str, p: Point) -> Result<(), ShapeError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::invalid(option, "coordinates must be finite"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(DesignRectangle),
    Line(DesignLine),
    Text(DesignText),
    HandDrawn(DesignHandDrawn),
    Image(DesignImage),
}

impl Shape {
    /// Builds a shape from user geometry and the resolved creation style.
    pub fn create(geometry: &ShapeGeometry, style: &ElementStyle) -> Result<Self, ShapeError> {
        let options = match geometry.clone() {
            ShapeGeometry::Rectangle { point1, point2 } => {
                ElementOptions::Rectangle(RectangleOptions {
                    point1,
                    point2,
                    shared: style.shared(),
                    rough: style.rough(),
                })
            }
            ShapeGeometry::Line { point1, point2 } => ElementOptions::Line(LineOptions {
                point1,
                point2,
                shared: style.shared(),
                rough: style.rough(),
            }),
            ShapeGeometry::Text { point1, text } => ElementOptions::Text(TextOptions {
                point1,
                text,
                font: style.font,
                font_size: style.font_size,
                shared: style.shared(),
            }),
            ShapeGeometry::HandDrawn { paths } => {
                ElementOptions::HandDrawn(HandDrawnOptions {
                    paths,
                    shared: style.shared(),
                })
            }
            ShapeGeometry::Image { point1, image } => ElementOptions::Image(ImageOptions {
                point1,
                point2: None,
                image,
                shared: style.shared(),
            }),
        };
        Self::from_options(options)
    }

    /// Builds and validates a shape from a complete options set.
    pub fn from_options(options: ElementOptions) -> Result<Self, ShapeError> {
        let shape = match options {
            ElementOptions::Rectangle(o) => Shape::Rectangle(DesignRectangle::new(o)),
            ElementOptions::Line(o) => Shape::Line(DesignLine::new(o)),
            ElementOptions::Text(o) => Shape::Text(DesignText::new(o)),
            ElementOptions::HandDrawn(o) => Shape::HandDrawn(DesignHandDrawn::new(o)),
            ElementOptions::Image(o) => Shape::Image(DesignImage::new(o)),
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Snapshot of the current options, sufficient to rebuild the shape.
    pub fn options(&self) -> ElementOptions {
        match self {
            Shape::Rectangle(s) => ElementOptions::Rectangle(s.options.clone()),
            Shape::Line(s) => ElementOptions::Line(s.options.clone()),
            Shape::Text(s) => ElementOptions::Text(s.options.clone()),
            Shape::HandDrawn(s) => ElementOptions::HandDrawn(s.options.clone()),
            Shape::Image(s) => ElementOptions::Image(s.options.clone()),
        }
    }

    /// Seed of the hand-drawn generator, for the variants that use one.
    pub fn seed(&self) -> Option<u32> {
        match self {
            Shape::Rectangle(s) => Some(s.options.rough.seed),
            Shape::Line(s) => Some(s.options.rough.seed),
            Shape::Text(_) | Shape::HandDrawn(_) | Shape::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&DesignImage> {
        match self {
            Shape::Image(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut DesignImage> {
        match self {
            Shape::Image(s) => Some(s),
            _ => None,
        }
    }
}

impl DesignerShape for Shape {
    fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(s) => s.kind(),
            Shape::Line(s) => s.kind(),
            Shape::Text(s) => s.kind(),
            Shape::HandDrawn(s) => s.kind(),
            Shape::Image(s) => s.kind(),
        }
    }

    fn bounds(&self) -> BoundingRect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::HandDrawn(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Rectangle(s) => s.translate(dx, dy),
            Shape::Line(s) => s.translate(dx, dy),
            Shape::Text(s) => s.translate(dx, dy),
            Shape::HandDrawn(s) => s.translate(dx, dy),
            Shape::Image(s) => s.translate(dx, dy),
        }
    }

    fn anchor(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.anchor(),
            Shape::Line(s) => s.anchor(),
            Shape::Text(s) => s.anchor(),
            Shape::HandDrawn(s) => s.anchor(),
            Shape::Image(s) => s.anchor(),
        }
    }

    fn shared(&self) -> &SharedOptions {
        match self {
            Shape::Rectangle(s) => s.shared(),
            Shape::Line(s) => s.shared(),
            Shape::Text(s) => s.shared(),
            Shape::HandDrawn(s) => s.shared(),
            Shape::Image(s) => s.shared(),
        }
    }

    fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Shape::Rectangle(s) => s.validate(),
            Shape::Line(s) => s.validate(),
            Shape::Text(s) => s.validate(),
            Shape::HandDrawn(s) => s.validate(),
            Shape::Image(s) => s.validate(),
        }
    }

    fn apply_patch(&mut self, patch: &OptionsPatch) {
        match self {
            Shape::Rectangle(s) => s.apply_patch(patch),
            Shape::Line(s) => s.apply_patch(patch),
            Shape::Text(s) => s.apply_patch(patch),
            Shape::HandDrawn(s) => s.apply_patch(patch),
            Shape::Image(s) => s.apply_patch(patch),
        }
    }

    fn primitives(&self, zoom: f64) -> Vec<Primitive> {
        match self {
            Shape::Rectangle(s) => s.primitives(zoom),
            Shape::Line(s) => s.primitives(zoom),
            Shape::Text(s) => s.primitives(zoom),
            Shape::HandDrawn(s) => s.primitives(zoom),
            Shape::Image(s) => s.primitives(zoom),
        }
    }

    fn contains_point(&self, p: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.contains_point(p),
            Shape::Line(s) => s.contains_point(p),
            Shape::Text(s) => s.contains_point(p),
            Shape::HandDrawn(s) => s.contains_point(p),
            Shape::Image(s) => s.contains_point(p),
        }
    }
}
