//! Type aliases for shared canvas state.
//!
//! The canvas is single-writer. Hosts that render or export from other
//! threads go through [`ThreadSafeRw`], so every mutation is serialized
//! behind one write lock while readers proceed concurrently.
//!
//! ```rust,ignore
//! use inkfield_core::types::*;
//!
//! let canvas: ThreadSafeRw<Canvas> = thread_safe_rw(Canvas::new(400.0, 300.0));
//! canvas.write().pan_by(10.0, 0.0);
//! ```

use parking_lot::RwLock;
use std::sync::Arc;

/// A thread-safe reader-writer lock wrapper for read-heavy workloads.
///
/// Multiple readers can access concurrently, but writes require exclusive access.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// Create a new `ThreadSafeRw<T>` from a value.
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}
