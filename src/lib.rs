//! # Inkfield
//!
//! An infinite drawing canvas model: shapes on an unbounded world plane,
//! seen through a pannable, zoomable viewport.
//!
//! ## Architecture
//!
//! Inkfield is organized as a workspace with multiple crates:
//!
//! 1. **inkfield-core** - Geometry, option domains, error taxonomy, shared-state aliases
//! 2. **inkfield-settings** - Style defaults and canvas configuration (TOML/JSON)
//! 3. **inkfield-designer** - Shapes, viewport, canvas, portable scenes, rendering
//! 4. **inkfield** - Command-line front end that ties the crates together
//!
//! ## Features
//!
//! - **Five shape variants**: rectangle, line, text, freehand, image
//! - **Viewport**: pan, zoom about the screen center, edge-inclusive culling
//! - **Portable scenes**: versioned JSON with atomic import
//! - **Hand-drawn rendering**: seeded, reproducible sketch strokes and fills

pub mod cli;

pub use inkfield_designer as designer;
pub use inkfield_settings as settings;

pub use inkfield_core::{BoundingRect, Error, Point, PortableError, Result, SceneError, ShapeError};
pub use inkfield_designer::{
    Canvas, DrawingObject, PortableScene, RandomSeeds, Shape, ShapeGeometry, ShapeId, ShapeKind,
    Viewport,
};
pub use inkfield_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, keeping stdout for command results
/// - RUST_LOG environment variable support
/// - `default_level` as the floor when RUST_LOG says nothing
pub fn init_logging(default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(default_level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
