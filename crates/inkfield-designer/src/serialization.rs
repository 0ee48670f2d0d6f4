//! Portable scene export and import.
//!
//! A portable scene is the versioned JSON snapshot of a shape collection:
//!
//! ```text
//! { "type": "PortableContent", "version": 1,
//!   "elements": [ { "id": "...", "shape": "rectangle", "options": { ... } } ] }
//! ```
//!
//! Import is all or nothing. The payload is checked structurally, every
//! element is decoded and validated, and only then are objects handed back.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use inkfield_core::PortableError;
use serde::Serialize;
use serde_json::Value;

use crate::canvas::DrawingObject;
use crate::model::{ElementOptions, ShapeId, ShapeKind};

/// Value of the `type` field.
pub const PORTABLE_CONTENT_TYPE: &str = "PortableContent";

/// The only schema version this codec reads and writes.
pub const PORTABLE_VERSION: u64 = 1;

/// One exported shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortableElement {
    pub id: ShapeId,
    pub shape: ShapeKind,
    pub options: ElementOptions,
}

/// Complete portable scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortableScene {
    #[serde(rename = "type")]
    pub content_type: String,
    pub version: u64,
    pub elements: Vec<PortableElement>,
}

impl PortableScene {
    pub fn new(elements: Vec<PortableElement>) -> Self {
        Self {
            content_type: PORTABLE_CONTENT_TYPE.to_string(),
            version: PORTABLE_VERSION,
            elements,
        }
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Checks the payload structure and decodes every element's options.
    ///
    /// Option domains are not checked here; see [`PortableScene::into_objects`].
    pub fn from_value(payload: &Value) -> Result<Self, PortableError> {
        let root = payload
            .as_object()
            .ok_or_else(|| PortableError::not_portable("payload is not an object"))?;

        match root.get("type") {
            Some(Value::String(t)) if t == PORTABLE_CONTENT_TYPE => {}
            Some(_) => {
                return Err(PortableError::not_portable(format!(
                    "type is not \"{PORTABLE_CONTENT_TYPE}\""
                )))
            }
            None => return Err(PortableError::not_portable("missing type")),
        }
        let elements = root
            .get("elements")
            .ok_or_else(|| PortableError::not_portable("missing elements"))?;
        let version = root
            .get("version")
            .ok_or_else(|| PortableError::not_portable("missing version"))?;

        match version.as_u64() {
            Some(PORTABLE_VERSION) => {}
            Some(found) => return Err(PortableError::UnsupportedVersion { found }),
            None => {
                return Err(PortableError::not_portable(
                    "version is not a non-negative integer",
                ))
            }
        }

        let elements = elements
            .as_array()
            .ok_or_else(|| PortableError::not_portable("elements is not an array"))?;

        let mut seen = HashSet::with_capacity(elements.len());
        let decoded = elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let element = decode_element(index, element)?;
                if !seen.insert(element.id.clone()) {
                    return Err(PortableError::not_portable(format!(
                        "duplicate element id '{}'",
                        element.id
                    )));
                }
                Ok(element)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(decoded))
    }

    /// Validates every element and builds the drawing objects, in order.
    pub fn into_objects(self) -> Result<Vec<DrawingObject>, PortableError> {
        self.elements
            .into_iter()
            .map(|element| {
                let id = element.id.to_string();
                DrawingObject::generate(element.id, element.options)
                    .map_err(|source| PortableError::InvalidOptions { id, source })
            })
            .collect()
    }

    /// Save scene to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self
            .to_json_pretty()
            .context("Failed to serialize scene")?;

        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write scene file {}", path.as_ref().display()))?;

        tracing::info!(
            "Saved {} elements to {}",
            self.elements.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Load and structurally check a scene file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read scene file {}", path.as_ref().display()))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| PortableError::not_portable(format!("invalid JSON: {e}")))?;
        Ok(Self::from_value(&value)?)
    }
}

fn decode_element(index: usize, element: &Value) -> Result<PortableElement, PortableError> {
    let obj = element
        .as_object()
        .ok_or_else(|| PortableError::not_portable(format!("element {index} is not an object")))?;

    let id = match obj.get("id") {
        Some(Value::String(id)) => ShapeId::from(id.as_str()),
        _ => {
            return Err(PortableError::not_portable(format!(
                "element {index} has no string id"
            )))
        }
    };
    let tag = match obj.get("shape") {
        Some(Value::String(tag)) => tag,
        _ => {
            return Err(PortableError::not_portable(format!(
                "element {index} has no string shape tag"
            )))
        }
    };
    let options = obj
        .get("options")
        .ok_or_else(|| PortableError::not_portable(format!("element {index} has no options")))?;

    let kind: ShapeKind = tag.parse()?;
    let options = ElementOptions::from_value(kind, options.clone()).map_err(|source| {
        PortableError::InvalidOptions {
            id: id.to_string(),
            source,
        }
    })?;

    Ok(PortableElement {
        id,
        shape: kind,
        options,
    })
}

/// Portable snapshot of every object not staged for deletion, in z-order.
pub fn export_scene<'a>(objects: impl IntoIterator<Item = &'a DrawingObject>) -> PortableScene {
    let elements: Vec<PortableElement> = objects
        .into_iter()
        .filter(|o| !o.will_delete)
        .map(DrawingObject::copy)
        .collect();
    tracing::info!("Exported {} elements", elements.len());
    PortableScene::new(elements)
}

/// Imports a portable payload into drawing objects, all or nothing.
pub fn import_scene(payload: &Value) -> Result<Vec<DrawingObject>, PortableError> {
    let objects = PortableScene::from_value(payload)?.into_objects()?;
    tracing::info!("Imported {} elements", objects.len());
    Ok(objects)
}

/// Imports a portable scene from JSON text. Malformed JSON is `NotPortable`.
pub fn import_str(json: &str) -> Result<Vec<DrawingObject>, PortableError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| PortableError::not_portable(format!("invalid JSON: {e}")))?;
    import_scene(&value)
}

/// Reads a scene file and imports it.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<DrawingObject>> {
    let objects = PortableScene::load_from_file(path.as_ref())?.into_objects()?;
    tracing::info!(
        "Loaded {} elements from {}",
        objects.len(),
        path.as_ref().display()
    );
    Ok(objects)
}
