//! Numeric constants shared across the Inkfield crates.

/// Stroke widths a shape may carry, in world units at zoom 1.
pub const STROKE_WIDTHS: [u32; 3] = [1, 3, 6];

/// Font sizes a text shape may carry.
pub const FONT_SIZES: [u32; 4] = [16, 24, 32, 48];

/// Smallest zoom level the viewport accepts (exclusive).
pub const MIN_ZOOM: f64 = 0.1;

/// Largest zoom level the viewport accepts (exclusive).
pub const MAX_ZOOM: f64 = 50.0;

/// Multiplicative step used by zoom in/out.
pub const ZOOM_STEP: f64 = 1.2;

/// Extra screen pixels around a line's stroke that still count as a hit.
pub const LINE_HIT_SLOP_PX: f64 = 5.0;

/// Line height of multi-line text, as a multiple of the font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.2;

/// Alpha multiplier applied to shapes staged for deletion.
pub const PENDING_DELETE_ALPHA: f64 = 0.5;

/// Default canvas width in pixels before the host reports its size.
pub const DEFAULT_CANVAS_WIDTH: f64 = 400.0;

/// Default canvas height in pixels before the host reports its size.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 300.0;

/// Upper bound on dots in one dotted fill; the grid widens past it.
pub const MAX_FILL_DOTS: usize = 4096;
