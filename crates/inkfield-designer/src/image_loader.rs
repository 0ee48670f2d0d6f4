//! Image sources for image shapes.
//!
//! An image reference is either a `data:` URL with a base64 payload or a
//! path on disk. Loading is synchronous; hosts that want it off the UI
//! thread run a loader on a worker and report back through the canvas with
//! the request's ticket.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::RgbaImage;
use inkfield_core::SceneError;

use crate::canvas::Canvas;

/// A decoded raster ready to hand to the canvas.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub raster: Arc<RgbaImage>,
}

impl DecodedImage {
    pub fn new(raster: RgbaImage) -> Self {
        Self {
            raster: Arc::new(raster),
        }
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

pub trait ImageLoader {
    fn load(&self, source: &str) -> Result<DecodedImage, SceneError>;
}

fn load_error(reason: impl Into<String>) -> SceneError {
    SceneError::ImageLoad {
        reason: reason.into(),
    }
}

/// Decodes `data:<mime>;base64,<payload>` URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlLoader;

impl DataUrlLoader {
    pub fn accepts(source: &str) -> bool {
        source.starts_with("data:")
    }
}

impl ImageLoader for DataUrlLoader {
    fn load(&self, source: &str) -> Result<DecodedImage, SceneError> {
        let rest = source
            .strip_prefix("data:")
            .ok_or_else(|| load_error("not a data URL"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| load_error("data URL has no payload"))?;
        if !header.ends_with(";base64") {
            return Err(load_error("only base64 data URLs are supported"));
        }
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| load_error(format!("bad base64 payload: {e}")))?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| load_error(format!("cannot decode image: {e}")))?;
        Ok(DecodedImage::new(decoded.to_rgba8()))
    }
}

/// Reads images from disk, resolving relative paths against `base_dir`.
#[derive(Debug, Default, Clone)]
pub struct FileLoader {
    base_dir: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageLoader for FileLoader {
    fn load(&self, source: &str) -> Result<DecodedImage, SceneError> {
        let path = self.resolve(source);
        let decoded = image::open(&path)
            .map_err(|e| load_error(format!("{}: {e}", path.display())))?;
        Ok(DecodedImage::new(decoded.to_rgba8()))
    }
}

/// Data URLs first, files otherwise.
#[derive(Debug, Default, Clone)]
pub struct DefaultImageLoader {
    data: DataUrlLoader,
    files: FileLoader,
}

impl DefaultImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            data: DataUrlLoader,
            files: FileLoader::with_base_dir(base_dir),
        }
    }
}

impl ImageLoader for DefaultImageLoader {
    fn load(&self, source: &str) -> Result<DecodedImage, SceneError> {
        if DataUrlLoader::accepts(source) {
            self.data.load(source)
        } else {
            self.files.load(source)
        }
    }
}

/// Loads every pending image of `canvas` in place. Returns how many
/// became ready; failures are logged and leave a placeholder.
pub fn load_pending(canvas: &mut Canvas, loader: &dyn ImageLoader) -> usize {
    let mut ready = 0;
    for request in canvas.pending_image_loads() {
        match loader.load(&request.source) {
            Ok(image) => {
                if canvas.finish_image_load(&request.ticket, image.raster) {
                    ready += 1;
                }
            }
            Err(err) => {
                canvas.fail_image_load(&request.ticket, &err);
            }
        }
    }
    ready
}
