//! # Inkfield Core
//!
//! Core types and utilities shared by the Inkfield crates:
//! world-space points and the geometry primitives built on them,
//! the style domains every shape option is validated against,
//! and the error taxonomy surfaced to callers.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod style;
pub mod types;

pub use error::{Error, PortableError, Result, SceneError, ShapeError};
pub use geometry::{BoundingRect, Point};
pub use style::{FillStyle, FontFamily};

// Re-export type aliases for convenience
pub use types::{thread_safe_rw, ThreadSafeRw};
