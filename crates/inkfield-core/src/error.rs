//! Error handling for Inkfield
//!
//! Provides the error taxonomy surfaced by the shape model:
//! - Shape errors (option values outside their domain)
//! - Portable errors (export/import payload problems)
//! - Scene errors (references to shapes that are gone, image loading)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Shape error type
///
/// Raised synchronously by `generate`/`regenerate`. Callers treat it as a
/// programming error: fix the input, never retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// An option value violates its range or enumerated domain
    #[error("Invalid option '{option}': {reason}")]
    InvalidOptions {
        /// The wire name of the offending option.
        option: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ShapeError {
    /// Shorthand for [`ShapeError::InvalidOptions`].
    pub fn invalid(option: impl Into<String>, reason: impl Into<String>) -> Self {
        ShapeError::InvalidOptions {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

/// Portable scene error type
///
/// Every variant aborts the whole import; no element of a failed payload
/// ever reaches the scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortableError {
    /// Payload fails the structural check
    #[error("Not a portable scene: {reason}")]
    NotPortable {
        /// What part of the structure was missing or malformed.
        reason: String,
    },

    /// Payload declares a schema version this codec does not know
    #[error("Unsupported portable scene version {found}")]
    UnsupportedVersion {
        /// The declared version.
        found: u64,
    },

    /// An element's `shape` tag names no known variant
    #[error("Unknown shape variant '{tag}'")]
    UnknownVariant {
        /// The unrecognized tag.
        tag: String,
    },

    /// An element's options fail the variant's schema or domain checks
    #[error("Element '{id}' has invalid options: {source}")]
    InvalidOptions {
        /// The id of the offending element.
        id: String,
        /// The underlying shape error.
        #[source]
        source: ShapeError,
    },
}

impl PortableError {
    pub fn not_portable(reason: impl Into<String>) -> Self {
        PortableError::NotPortable {
            reason: reason.into(),
        }
    }
}

/// Scene error type
///
/// Represents requests against the scene that reference shapes by id.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A deferred callback targets a shape no longer present in the scene
    #[error("Shape {id} is no longer part of the scene")]
    StaleShapeReference {
        /// The id the callback was issued for.
        id: String,
    },

    /// A direct request names a shape that does not exist
    #[error("Shape {id} not found")]
    ShapeNotFound {
        /// The requested id.
        id: String,
    },

    /// An image source could not be read or decoded
    #[error("Image load failed: {reason}")]
    ImageLoad {
        /// Why loading failed.
        reason: String,
    },
}

/// Main error type for Inkfield
///
/// Unified error type that can represent any error in the system.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Portable scene error
    #[error(transparent)]
    Portable(#[from] PortableError),

    /// Scene error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error must be reported to the user
    ///
    /// Stale references are an expected race and stay silent.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Error::Scene(SceneError::StaleShapeReference { .. }))
    }

    /// Check if this is an import/export error
    pub fn is_portable_error(&self) -> bool {
        matches!(self, Error::Portable(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
