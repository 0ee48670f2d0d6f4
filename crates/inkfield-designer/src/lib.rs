//! # Inkfield Designer
//!
//! The shape/viewport model of an infinite drawing canvas: shapes placed on
//! an unbounded world plane, viewed through a pannable, zoomable window.
//!
//! ## Core Components
//!
//! - **Shapes**: rectangles, lines, text, freehand strokes and images, as the
//!   closed [`Shape`] sum type
//! - **Drawing objects**: a shape plus its id, bounding rect, soft-delete flag
//!   and render cache
//! - **Viewport**: pan offset and zoom, zoom about the screen center,
//!   closed-interval visibility culling
//! - **Canvas**: ordered objects, selection, visible subset, image loads
//! - **Portable scenes**: versioned JSON export/import, atomic on failure
//! - **Rendering**: a stateless hand-drawn primitive generator and
//!   tiny-skia / recording backends
//! - **Fonts**: system faces for text metrics and glyph outlines
//!
//! ## Architecture
//!
//! ```text
//! Canvas (scene owner)
//!   ├── DrawingObject (id, bounding rect, cache)
//!   │     └── Shape (Rectangle | Line | Text | HandDrawn | Image)
//!   ├── Viewport (position, zoom)
//!   └── image load tickets
//!
//! rough (shape -> primitives) -> RenderContext (pixmap, recording)
//! serialization (PortableScene <-> DrawingObject)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inkfield_designer::{Canvas, RandomSeeds, ShapeGeometry};
//! use inkfield_core::Point;
//!
//! let mut canvas = Canvas::new(800.0, 600.0);
//! let mut seeds = RandomSeeds::new();
//! canvas.create_shape(
//!     &ShapeGeometry::Rectangle {
//!         point1: Point::new(10.0, 10.0),
//!         point2: Point::new(120.0, 80.0),
//!     },
//!     &mut seeds,
//! )?;
//! canvas.set_zoom_level(2.0);
//! let json = canvas.export_portable().to_json_pretty()?;
//! ```

pub mod canvas;
pub mod fonts;
pub mod image_loader;
pub mod model;
pub mod renderer;
pub mod rough;
pub mod seed;
pub mod serialization;
pub mod viewport;

pub use canvas::{
    Canvas, DrawingObject, ImageLoadRequest, ImageLoadTicket, ImportReport, RenderCache,
    SharedCanvas,
};
pub use image_loader::{
    load_pending, DataUrlLoader, DecodedImage, DefaultImageLoader, FileLoader, ImageLoader,
};
pub use fonts::{font_for, LineMetrics};
pub use model::{
    DesignerShape, ElementOptions, ElementStyle, ImageState, OptionsPatch, Shape, ShapeGeometry,
    ShapeId, ShapeKind,
};
pub use renderer::{render_canvas, PixmapContext, RecordingContext, RenderCall, RenderContext};
pub use rough::{Primitive, StrokeSpec};
pub use seed::{RandomSeeds, SeedSource};
pub use serialization::{
    export_scene, import_scene, import_str, load_from_file, PortableElement, PortableScene,
    PORTABLE_CONTENT_TYPE, PORTABLE_VERSION,
};
pub use viewport::Viewport;
