//! Canvas: the scene that owns shapes, the viewport and the selection.
//!
//! Objects are kept in z-order (last drawn on top). The visible subset is a
//! full rescan after every change to the collection or the viewport; there
//! is no spatial index.

mod operations;
mod types;

pub use types::{DrawingObject, ImageLoadRequest, ImageLoadTicket, ImportReport, RenderCache};

use types::IdSet;

use std::collections::HashMap;

use inkfield_core::ThreadSafeRw;
use inkfield_settings::{Config, StyleDefaults};

use crate::model::{ElementStyle, ShapeId};
use crate::seed::SeedSource;
use crate::viewport::Viewport;

/// Canvas shared between threads behind a single writer lock.
pub type SharedCanvas = ThreadSafeRw<Canvas>;

/// Canvas state managing shapes and viewport.
#[derive(Debug, Clone)]
pub struct Canvas {
    objects: Vec<DrawingObject>,
    viewport: Viewport,
    style: StyleDefaults,
    selection: IdSet,
    visible: IdSet,
    image_loads: HashMap<ShapeId, u64>,
    next_generation: u64,
}

impl Canvas {
    /// Creates an empty canvas with the given screen size.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_viewport(Viewport::new(width, height), StyleDefaults::default())
    }

    /// Creates an empty canvas from loaded settings.
    pub fn from_config(config: &Config) -> Self {
        let mut viewport = Viewport::new(config.canvas.width, config.canvas.height);
        if config.canvas.zoom != 1.0 {
            viewport.set_zoom_level(config.canvas.zoom);
        }
        Self::with_viewport(viewport, config.style.clone())
    }

    fn with_viewport(viewport: Viewport, style: StyleDefaults) -> Self {
        Self {
            objects: Vec::new(),
            viewport,
            style,
            selection: IdSet::default(),
            visible: IdSet::default(),
            image_loads: HashMap::new(),
            next_generation: 1,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn style(&self) -> &StyleDefaults {
        &self.style
    }

    /// Replaces the style used for shapes created from now on.
    pub fn set_style(&mut self, style: StyleDefaults) {
        self.style = style;
    }

    /// All objects, bottom to top.
    pub fn objects(&self) -> &[DrawingObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: &ShapeId) -> Option<&DrawingObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    fn get_mut(&mut self, id: &ShapeId) -> Option<&mut DrawingObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    fn index_of(&self, id: &ShapeId) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }

    pub fn selection(&self) -> &[ShapeId] {
        self.selection.as_slice()
    }

    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.selection.contains(id)
    }

    /// Ids of the objects overlapping the viewport, bottom to top.
    pub fn visible_ids(&self) -> &[ShapeId] {
        self.visible.as_slice()
    }

    /// Objects overlapping the viewport, bottom to top.
    pub fn visible_objects(&self) -> impl Iterator<Item = &DrawingObject> {
        self.objects
            .iter()
            .filter(move |o| self.visible.contains(o.id()))
    }

    /// Style for a new shape: configured defaults, current zoom, fresh seed.
    pub fn resolve_style(&self, seeds: &mut dyn SeedSource) -> ElementStyle {
        ElementStyle {
            opacity: self.style.opacity,
            stroke: self.style.stroke.clone(),
            stroke_width: self.style.stroke_width,
            zoom: self.viewport.zoom_level(),
            fill: self.style.fill.clone(),
            fill_style: self.style.fill_style,
            stroke_line_dash: self.style.stroke_line_dash.clone(),
            seed: seeds.next_seed(),
            font: self.style.font,
            font_size: self.style.font_size,
        }
    }

    fn recompute_visibility(&mut self) {
        let origin = self.viewport.screen_origin();
        let (width, height, zoom) = (
            self.viewport.width(),
            self.viewport.height(),
            self.viewport.zoom_level(),
        );
        self.visible = self
            .objects
            .iter()
            .filter(|o| o.is_visible(origin, width, height, zoom))
            .map(|o| o.id().clone())
            .collect();
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::with_viewport(Viewport::default(), StyleDefaults::default())
    }
}
