//! Type system utilities and aliases.
//!
//! - [`aliases`]: The `Arc<RwLock<T>>` alias the canvas is shared through.

pub mod aliases;

pub use aliases::*;
