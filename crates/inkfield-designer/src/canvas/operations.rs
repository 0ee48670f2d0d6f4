//! Scene mutation operations for Canvas.

use std::collections::HashSet;
use std::sync::Arc;

use ::image::RgbaImage;
use inkfield_core::{Point, PortableError, SceneError, ShapeError};

use super::types::{DrawingObject, IdSet, ImageLoadRequest, ImageLoadTicket, ImportReport};
use super::Canvas;
use crate::model::{OptionsPatch, ShapeGeometry, ShapeId, ShapeKind};
use crate::renderer::RenderContext;
use crate::seed::SeedSource;
use crate::serialization::{export_scene, import_scene, PortableScene};

fn not_found(id: &ShapeId) -> SceneError {
    SceneError::ShapeNotFound { id: id.to_string() }
}

impl Canvas {
    /// Creates a shape from user geometry with the current style and adds it
    /// on top.
    pub fn create_shape(
        &mut self,
        geometry: &ShapeGeometry,
        seeds: &mut dyn SeedSource,
    ) -> Result<ShapeId, ShapeError> {
        let style = self.resolve_style(seeds);
        let object = DrawingObject::create(geometry, &style)?;
        let id = object.id().clone();
        self.add_object(object);
        Ok(id)
    }

    /// Adds an object on top. Image objects get a load ticket, returned as
    /// the request the host must fulfil.
    pub fn add_object(&mut self, mut object: DrawingObject) -> Option<ImageLoadRequest> {
        let request = self.issue_image_load(&mut object);
        if let Some(index) = self.index_of(object.id()) {
            tracing::warn!("Replacing object with duplicate id {}", object.id());
            self.objects[index] = object;
        } else {
            self.objects.push(object);
        }
        self.recompute_visibility();
        request
    }

    fn issue_image_load(&mut self, object: &mut DrawingObject) -> Option<ImageLoadRequest> {
        if object.kind() != ShapeKind::Image {
            return None;
        }
        let generation = self.next_generation;
        let source = object.begin_image_load(generation)?;
        self.next_generation += 1;
        self.image_loads.insert(object.id().clone(), generation);
        Some(ImageLoadRequest {
            ticket: ImageLoadTicket {
                shape_id: object.id().clone(),
                generation,
            },
            source,
        })
    }

    /// Removes an object immediately.
    pub fn remove(&mut self, id: &ShapeId) -> Result<DrawingObject, SceneError> {
        let index = self.index_of(id).ok_or_else(|| not_found(id))?;
        let object = self.objects.remove(index);
        self.forget(id);
        self.recompute_visibility();
        tracing::debug!("Removed {}", id);
        Ok(object)
    }

    fn forget(&mut self, id: &ShapeId) {
        self.selection.remove(id);
        self.image_loads.remove(id);
    }

    /// Stages an object for deletion; it stays drawn, dimmed, until purged.
    pub fn mark_for_deletion(&mut self, id: &ShapeId) -> Result<(), SceneError> {
        let object = self.get_mut(id).ok_or_else(|| not_found(id))?;
        object.will_delete = true;
        Ok(())
    }

    pub fn unmark(&mut self, id: &ShapeId) -> Result<(), SceneError> {
        let object = self.get_mut(id).ok_or_else(|| not_found(id))?;
        object.will_delete = false;
        Ok(())
    }

    /// Removes every object staged for deletion. Returns how many went.
    pub fn purge_deleted(&mut self) -> usize {
        let doomed: Vec<ShapeId> = self
            .objects
            .iter()
            .filter(|o| o.will_delete)
            .map(|o| o.id().clone())
            .collect();
        if doomed.is_empty() {
            return 0;
        }
        self.objects.retain(|o| !o.will_delete);
        for id in &doomed {
            self.forget(id);
        }
        self.recompute_visibility();
        tracing::debug!("Purged {} objects", doomed.len());
        doomed.len()
    }

    /// Top-most live object under `point`.
    pub fn hit_test(&self, point: Point) -> Option<&ShapeId> {
        self.objects
            .iter()
            .rev()
            .find(|o| !o.will_delete && o.is_hit(point))
            .map(|o| o.id())
    }

    /// Selects the top-most object under `point`, or clears the selection.
    pub fn select_at(&mut self, point: Point) -> Option<ShapeId> {
        let hit = self.hit_test(point).cloned();
        self.selection = hit.iter().cloned().collect();
        hit
    }

    /// Replaces the selection; ids not in the scene are dropped.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ShapeId>) {
        let known: HashSet<&ShapeId> = self.objects.iter().map(|o| o.id()).collect();
        let selection: IdSet = ids.into_iter().filter(|id| known.contains(id)).collect();
        self.selection = selection;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Moves the selected objects by (dx, dy).
    pub fn move_selected(&mut self, dx: f64, dy: f64) {
        if self.selection.is_empty() {
            return;
        }
        let selection = &self.selection;
        for object in self
            .objects
            .iter_mut()
            .filter(|o| selection.contains(o.id()))
        {
            object.move_by(dx, dy);
        }
        self.recompute_visibility();
    }

    /// Moves one object so its anchor lands on `point`.
    pub fn move_object_to(&mut self, id: &ShapeId, point: Point) -> Result<(), SceneError> {
        let object = self.get_mut(id).ok_or_else(|| not_found(id))?;
        object.move_to(point);
        self.recompute_visibility();
        Ok(())
    }

    /// Applies `patch` to every selected object, all or nothing.
    pub fn regenerate_selected(&mut self, patch: &OptionsPatch) -> Result<usize, ShapeError> {
        let mut updated = Vec::with_capacity(self.selection.len());
        for (index, object) in self.objects.iter().enumerate() {
            if self.selection.contains(object.id()) {
                let mut next = object.clone();
                next.regenerate(patch)?;
                updated.push((index, next));
            }
        }
        let count = updated.len();
        for (index, object) in updated {
            self.objects[index] = object;
        }
        self.recompute_visibility();
        Ok(count)
    }

    /// Draws a fresh seed for every selected rectangle and line.
    pub fn reshuffle_selected(&mut self, seeds: &mut dyn SeedSource) -> usize {
        let selection = &self.selection;
        self.objects
            .iter_mut()
            .filter(|o| selection.contains(o.id()) && o.shape().seed().is_some())
            .map(|o| o.reshuffle(seeds.next_seed()))
            .filter(|applied| *applied)
            .count()
    }

    /// Sets the pan offset.
    pub fn set_position(&mut self, position: Point) {
        self.viewport.set_position(position);
        self.recompute_visibility();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
        self.recompute_visibility();
    }

    /// Zooms about the screen center. Out-of-range levels are ignored.
    pub fn set_zoom_level(&mut self, zoom_level: f64) -> bool {
        let changed = self.viewport.set_zoom_level(zoom_level);
        if changed {
            self.recompute_visibility();
        }
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.viewport.zoom_in();
        if changed {
            self.recompute_visibility();
        }
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.viewport.zoom_out();
        if changed {
            self.recompute_visibility();
        }
        changed
    }

    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        self.viewport.set_dimensions(width, height);
        self.recompute_visibility();
    }

    /// Portable snapshot of every object not staged for deletion.
    pub fn export_portable(&self) -> PortableScene {
        export_scene(&self.objects)
    }

    /// Replaces the whole scene with an imported one.
    ///
    /// Nothing changes unless every element imports cleanly.
    pub fn load_portable(
        &mut self,
        payload: &serde_json::Value,
    ) -> Result<ImportReport, PortableError> {
        let objects = import_scene(payload)?;

        self.objects.clear();
        self.selection.clear();
        self.image_loads.clear();

        let mut report = ImportReport::default();
        for mut object in objects {
            if let Some(request) = self.issue_image_load(&mut object) {
                report.image_loads.push(request);
            }
            self.objects.push(object);
        }
        report.imported = self.objects.len();
        self.recompute_visibility();
        Ok(report)
    }

    /// Re-issues the load ticket of an image object, invalidating any
    /// earlier one.
    pub fn begin_image_load(&mut self, id: &ShapeId) -> Result<ImageLoadRequest, SceneError> {
        let index = self.index_of(id).ok_or_else(|| not_found(id))?;
        let mut object = self.objects[index].clone();
        let request = self
            .issue_image_load(&mut object)
            .ok_or_else(|| SceneError::ImageLoad {
                reason: format!("{id} is not an image"),
            })?;
        self.objects[index] = object;
        Ok(request)
    }

    /// Image loads still waiting for a result.
    pub fn pending_image_loads(&self) -> Vec<ImageLoadRequest> {
        self.objects
            .iter()
            .filter_map(|o| {
                let generation = *self.image_loads.get(o.id())?;
                let image = o.shape().as_image()?;
                (!image.is_ready()).then(|| ImageLoadRequest {
                    ticket: ImageLoadTicket {
                        shape_id: o.id().clone(),
                        generation,
                    },
                    source: image.options.image.clone(),
                })
            })
            .collect()
    }

    fn redeem(&mut self, ticket: &ImageLoadTicket) -> Result<usize, SceneError> {
        let stale = || SceneError::StaleShapeReference {
            id: ticket.shape_id.to_string(),
        };
        if self.image_loads.get(&ticket.shape_id) != Some(&ticket.generation) {
            return Err(stale());
        }
        self.image_loads.remove(&ticket.shape_id);
        self.index_of(&ticket.shape_id).ok_or_else(stale)
    }

    /// Applies a finished image load. Returns `false` when the ticket is
    /// stale (the object was deleted, replaced or re-issued meanwhile).
    pub fn finish_image_load(&mut self, ticket: &ImageLoadTicket, raster: Arc<RgbaImage>) -> bool {
        match self.redeem(ticket) {
            Ok(index) => {
                self.objects[index].finish_image_load(raster);
                self.recompute_visibility();
                tracing::debug!("Image ready for {}", ticket.shape_id);
                true
            }
            Err(err) => {
                tracing::debug!("Dropping image load: {}", err);
                false
            }
        }
    }

    /// Records a failed image load; the object keeps drawing a placeholder.
    pub fn fail_image_load(&mut self, ticket: &ImageLoadTicket, error: &SceneError) -> bool {
        match self.redeem(ticket) {
            Ok(_) => {
                tracing::warn!("Image for {} failed to load: {}", ticket.shape_id, error);
                true
            }
            Err(err) => {
                tracing::debug!("Dropping image load failure: {}", err);
                false
            }
        }
    }

    /// Builds render caches for the visible objects at the current zoom.
    pub fn prepare_render(&mut self) {
        let zoom = self.viewport.zoom_level();
        let visible = &self.visible;
        for object in self
            .objects
            .iter_mut()
            .filter(|o| visible.contains(o.id()))
        {
            object.refresh_cache(zoom);
        }
    }

    /// Draws the visible objects bottom to top.
    pub fn render(&self, ctx: &mut dyn RenderContext) {
        let zoom = self.viewport.zoom_level();
        for object in self.visible_objects() {
            object.render(ctx, zoom);
        }
    }
}
