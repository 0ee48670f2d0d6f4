//! Canvas type definitions: DrawingObject, RenderCache, image load tickets, ImportReport.

use std::collections::HashSet;
use std::sync::Arc;

use ::image::RgbaImage;
use inkfield_core::constants::PENDING_DELETE_ALPHA;
use inkfield_core::{BoundingRect, Point, ShapeError};

use crate::model::{
    DesignerShape, ElementOptions, ElementStyle, OptionsPatch, Shape, ShapeGeometry, ShapeId,
    ShapeKind,
};
use crate::renderer::RenderContext;
use crate::rough::Primitive;
use crate::serialization::PortableElement;
use crate::viewport::is_rect_visible;

/// Primitives generated for one zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCache {
    pub primitives: Vec<Primitive>,
    pub valid_for_zoom: f64,
}

/// Drawing object on the canvas: a shape plus the bookkeeping the canvas
/// needs to cull, hit-test and render it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingObject {
    id: ShapeId,
    /// Staged for deletion; still drawn, dimmed, until purged.
    pub will_delete: bool,
    bounding_rect: BoundingRect,
    cache: Option<RenderCache>,
    shape: Shape,
}

impl DrawingObject {
    /// Creates a new object with a fresh id.
    pub fn create(geometry: &ShapeGeometry, style: &ElementStyle) -> Result<Self, ShapeError> {
        let shape = Shape::create(geometry, style)?;
        Ok(Self::from_shape(ShapeId::new(), shape))
    }

    /// Rebuilds an object from a complete options set.
    pub fn generate(id: ShapeId, options: ElementOptions) -> Result<Self, ShapeError> {
        let shape = Shape::from_options(options)?;
        Ok(Self::from_shape(id, shape))
    }

    fn from_shape(id: ShapeId, shape: Shape) -> Self {
        tracing::debug!("Generated {} {}", shape.kind(), id);
        Self {
            id,
            will_delete: false,
            bounding_rect: shape.bounds(),
            cache: None,
            shape,
        }
    }

    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn bounding_rect(&self) -> BoundingRect {
        self.bounding_rect
    }

    pub fn options(&self) -> ElementOptions {
        self.shape.options()
    }

    pub fn cache(&self) -> Option<&RenderCache> {
        self.cache.as_ref()
    }

    fn geometry_changed(&mut self) {
        self.bounding_rect = self.shape.bounds();
        self.cache = None;
    }

    /// Translates the shape; options other than geometry are untouched.
    pub fn move_by(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.shape.translate(dx, dy);
        self.geometry_changed();
        self
    }

    /// Moves the shape so its anchor lands on `point`.
    pub fn move_to(&mut self, point: Point) -> &mut Self {
        let anchor = self.shape.anchor();
        let (dx, dy) = (point.x - anchor.x, point.y - anchor.y);
        if dx != 0.0 || dy != 0.0 {
            self.move_by(dx, dy);
        }
        self
    }

    /// Applies a partial option update.
    ///
    /// The merged options are validated first; on error the object is left
    /// exactly as it was.
    pub fn regenerate(&mut self, patch: &OptionsPatch) -> Result<&mut Self, ShapeError> {
        let mut next = self.shape.clone();
        next.apply_patch(patch);
        next.validate()?;
        self.shape = next;
        self.geometry_changed();
        Ok(self)
    }

    /// Stores a fresh hand-drawn seed. Returns `false` for variants without one.
    pub fn reshuffle(&mut self, seed: u32) -> bool {
        if self.shape.seed().is_none() {
            return false;
        }
        self.shape.apply_patch(&OptionsPatch::new().with_seed(seed));
        self.cache = None;
        true
    }

    pub fn is_hit(&self, point: Point) -> bool {
        self.shape.contains_point(point)
    }

    pub fn is_visible(&self, screen_origin: Point, width: f64, height: f64, zoom: f64) -> bool {
        is_rect_visible(&self.bounding_rect, screen_origin, width, height, zoom)
    }

    /// Portable snapshot `{id, shape, options}`.
    pub fn copy(&self) -> PortableElement {
        PortableElement {
            id: self.id.clone(),
            shape: self.kind(),
            options: self.options(),
        }
    }

    /// Rebuilds the render cache unless it is already valid for `zoom`.
    pub fn refresh_cache(&mut self, zoom: f64) {
        if self.cache.as_ref().is_some_and(|c| c.valid_for_zoom == zoom) {
            return;
        }
        self.cache = Some(RenderCache {
            primitives: self.shape.primitives(zoom),
            valid_for_zoom: zoom,
        });
    }

    /// Draws the shape. Uses the cache when it matches `zoom`, otherwise
    /// generates primitives for this call only.
    pub fn render(&self, ctx: &mut dyn RenderContext, zoom: f64) {
        let mut alpha = self.shape.shared().opacity;
        if self.will_delete {
            alpha *= PENDING_DELETE_ALPHA;
        }
        ctx.set_global_alpha(alpha);

        match &self.cache {
            Some(cache) if cache.valid_for_zoom == zoom => {
                for primitive in &cache.primitives {
                    ctx.draw(primitive);
                }
            }
            _ => {
                for primitive in self.shape.primitives(zoom) {
                    ctx.draw(&primitive);
                }
            }
        }
    }

    pub(crate) fn begin_image_load(&mut self, generation: u64) -> Option<String> {
        let image = self.shape.as_image_mut()?;
        image.begin_load(generation);
        let source = image.options.image.clone();
        self.cache = None;
        Some(source)
    }

    pub(crate) fn finish_image_load(&mut self, raster: Arc<RgbaImage>) {
        if let Some(image) = self.shape.as_image_mut() {
            image.finish_load(raster);
            self.geometry_changed();
        }
    }
}

/// Identifies one pending image load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageLoadTicket {
    pub shape_id: ShapeId,
    pub generation: u64,
}

/// Work item for the host: load `source` and report back with `ticket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoadRequest {
    pub ticket: ImageLoadTicket,
    pub source: String,
}

/// Outcome of replacing the canvas contents with a portable scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub imported: usize,
    pub image_loads: Vec<ImageLoadRequest>,
}

/// Ids in insertion order with constant-time membership.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdSet {
    order: Vec<ShapeId>,
    members: HashSet<ShapeId>,
}

impl IdSet {
    pub fn as_slice(&self) -> &[ShapeId] {
        &self.order
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.members.contains(id)
    }

    /// Appends `id` unless already present.
    pub fn insert(&mut self, id: ShapeId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn remove(&mut self, id: &ShapeId) {
        if self.members.remove(id) {
            self.order.retain(|s| s != id);
        }
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl FromIterator<ShapeId> for IdSet {
    fn from_iter<I: IntoIterator<Item = ShapeId>>(iter: I) -> Self {
        let mut set = Self::default();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
