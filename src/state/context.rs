//! The editor context: document, history, selection and the active drag.
//!
//! Every user-facing operation is a method here and reports whether it changed
//! anything. Misuse at the boundaries (undo with nothing to undo, delete with
//! no selection, crop without a rectangle) is a quiet no-op.

use std::sync::Arc;

use egui::Rect;
use image::RgbaImage;

use super::editor_state::DragSession;
use crate::command::{CheckpointStack, ImageCheckpoint, RegionHistory};
use crate::compositor::Compositor;
use crate::detect::{BoxPadding, DetectedBox};
use crate::document::Document;
use crate::error::{EditorError, EditorResult};
use crate::geometry::HandleMetrics;
use crate::region::{fresh_seed, meets_min_size, Region, RegionId};
use crate::renderer::{RenderOptions, Renderer};
use crate::settings::EditorSettings;
use crate::transform::ImageTransform;

#[derive(Debug, Clone)]
pub struct EditorContext {
    pub(super) document: Document,
    pub(super) history: RegionHistory,
    pub(super) checkpoints: CheckpointStack,
    pub(super) selected: Option<RegionId>,
    pub(super) drag: DragSession,
    pub(super) cropping: bool,
    pub(super) crop: Option<Rect>,
    pub(super) view_scale: f32,
    show_original: bool,
    pub settings: EditorSettings,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl EditorContext {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            document: Document::new(),
            history: RegionHistory::new(),
            checkpoints: CheckpointStack::new(),
            selected: None,
            drag: DragSession::Idle,
            cropping: false,
            crop: None,
            view_scale: 1.0,
            show_original: false,
            settings,
        }
    }

    // ---- accessors ----

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Name of the file the current image was loaded from.
    pub fn source_name(&self) -> Option<&str> {
        self.document.source_name()
    }

    pub fn set_source_name(&mut self, name: Option<String>) {
        self.document.set_source_name(name);
    }

    pub fn has_image(&self) -> bool {
        self.document.has_image()
    }

    pub fn regions(&self) -> &[Region] {
        self.document.regions()
    }

    pub fn history(&self) -> &RegionHistory {
        &self.history
    }

    pub fn checkpoints(&self) -> &CheckpointStack {
        &self.checkpoints
    }

    pub fn selected(&self) -> Option<RegionId> {
        self.selected
    }

    pub fn selected_region(&self) -> Option<&Region> {
        self.selected.and_then(|id| self.document.region(id))
    }

    /// Selects `id` if such a region exists; `None` clears the selection.
    pub fn select(&mut self, id: Option<RegionId>) {
        self.selected = id.filter(|id| self.document.region(*id).is_some());
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn is_cropping(&self) -> bool {
        self.cropping
    }

    pub fn crop_rect(&self) -> Option<Rect> {
        self.crop
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || !self.checkpoints.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Image pixels per screen pixel; sizes the on-canvas controls.
    pub fn set_view_scale(&mut self, view_scale: f32) {
        if view_scale.is_finite() && view_scale > 0.0 {
            self.view_scale = view_scale;
        }
    }

    pub fn view_scale(&self) -> f32 {
        self.view_scale
    }

    pub fn handle_metrics(&self) -> HandleMetrics {
        HandleMetrics::for_view_scale(self.view_scale)
    }

    /// Whether the next render skips all effects.
    pub fn show_original(&self) -> bool {
        self.show_original && !self.document.regions().is_empty()
    }

    pub fn set_show_original(&mut self, show: bool) -> bool {
        let changed = self.show_original != show;
        self.show_original = show;
        changed
    }

    // ---- history ----

    /// Records the live region list as a new history entry.
    pub fn commit(&mut self) {
        self.history.commit(self.document.regions());
    }

    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.history.undo() {
            self.document.set_regions(snapshot.to_vec());
            self.selected = None;
            self.drag = DragSession::Idle;
            log::info!("Undo (history index {})", self.history.index());
            return true;
        }
        match self.checkpoints.pop() {
            Some(checkpoint) => {
                self.restore_checkpoint(checkpoint);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.document.set_regions(snapshot.to_vec());
                self.selected = None;
                self.drag = DragSession::Idle;
                log::info!("Redo (history index {})", self.history.index());
                true
            }
            None => false,
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.take() else {
            return false;
        };
        if !self.document.remove_region(id) {
            return false;
        }
        if self.drag.region_id() == Some(id) {
            self.drag = DragSession::Idle;
        }
        self.commit();
        log::info!("Deleted region {id}");
        true
    }

    /// Leaves crop mode and clears the selection.
    pub fn escape(&mut self) -> bool {
        let changed = self.cropping || self.crop.is_some() || self.selected.is_some();
        if matches!(self.drag, DragSession::Cropping { .. }) {
            self.drag = DragSession::Idle;
        }
        self.cropping = false;
        self.crop = None;
        self.selected = None;
        changed
    }

    // ---- image lifecycle ----

    /// Makes `image` the base image. Replacing an existing image is recorded as
    /// a checkpoint so it can be undone.
    pub fn load_image(&mut self, image: RgbaImage) {
        if self.document.has_image() {
            self.push_checkpoint();
        }
        log::info!("Loaded image {}x{}", image.width(), image.height());
        self.document.set_image(Arc::new(image));
        self.document.set_source_name(None);
        self.document.ids_mut().reset();
        self.reset_editing_state();
    }

    /// Drops regions, history and checkpoints but keeps the image.
    pub fn clear(&mut self) {
        self.document.set_regions(Vec::new());
        self.history.clear();
        self.checkpoints.clear();
        self.selected = None;
        log::info!("Cleared all regions");
    }

    /// Back to the empty editor.
    pub fn remove_image(&mut self) {
        self.document.take_image();
        self.checkpoints.clear();
        self.reset_editing_state();
        log::info!("Removed image");
    }

    fn reset_editing_state(&mut self) {
        self.history.clear();
        self.selected = None;
        self.drag = DragSession::Idle;
        self.cropping = false;
        self.crop = None;
    }

    fn push_checkpoint(&mut self) {
        let Some(image) = self.document.image().cloned() else {
            return;
        };
        self.checkpoints.push(ImageCheckpoint {
            image,
            regions: self.document.regions().to_vec(),
            history: self.history.clone(),
            next_id: self.document.ids().peek(),
            source_name: self.document.source_name().map(str::to_owned),
        });
    }

    fn restore_checkpoint(&mut self, checkpoint: ImageCheckpoint) {
        let ImageCheckpoint { image, regions, history, next_id, source_name } = checkpoint;
        log::info!("Restored image checkpoint {}x{}", image.width(), image.height());
        self.document.set_image(image);
        self.document.set_source_name(source_name);
        self.document.set_regions(regions);
        self.document.ids_mut().reseed(next_id);
        self.history = history;
        self.selected = None;
        self.drag = DragSession::Idle;
        self.cropping = false;
        self.crop = None;
    }

    // ---- whole-image operations ----

    /// Applies a flip, rotation or crop to the base image. The previous state
    /// is checkpointed first; regions and history start over afterwards.
    pub fn transform_image(&mut self, transform: ImageTransform) -> bool {
        let Some(image) = self.document.image().cloned() else {
            return false;
        };
        let Some(transformed) = transform.apply(&image) else {
            return false;
        };
        self.push_checkpoint();
        log::info!(
            "Applied {}: {}x{} -> {}x{}",
            transform.name(),
            image.width(),
            image.height(),
            transformed.width(),
            transformed.height()
        );
        self.document.set_image(Arc::new(transformed));
        self.reset_editing_state();
        true
    }

    pub fn begin_crop(&mut self) -> bool {
        if !self.document.has_image() || self.cropping {
            return false;
        }
        self.cropping = true;
        self.crop = None;
        self.selected = None;
        true
    }

    /// Bakes the current effects into the image, then cuts out the crop
    /// rectangle.
    pub fn apply_crop(&mut self) -> bool {
        let Some(rect) = self.crop.filter(meets_min_size) else {
            return false;
        };
        let Some(baked) = Renderer::new(self.compositor()).render(self, RenderOptions::export()) else {
            return false;
        };
        let Some(cropped) = ImageTransform::Crop(rect).apply(&baked) else {
            return false;
        };
        self.push_checkpoint();
        log::info!("Cropped to {}x{}", cropped.width(), cropped.height());
        self.document.set_image(Arc::new(cropped));
        self.reset_editing_state();
        true
    }

    pub fn cancel_crop(&mut self) -> bool {
        let changed = self.cropping || self.crop.is_some();
        self.cropping = false;
        self.crop = None;
        if matches!(self.drag, DragSession::Cropping { .. }) {
            self.drag = DragSession::Idle;
        }
        changed
    }

    // ---- detections ----

    /// Turns a detector's boxes into regions with the current settings and
    /// commits them as one history entry. Returns how many were added.
    pub fn add_detections(&mut self, boxes: &[DetectedBox], padding: BoxPadding) -> usize {
        if boxes.is_empty() || !self.document.has_image() {
            return 0;
        }
        for detected in boxes {
            let id = self.document.next_id();
            let region = self.settings.effect.template(fresh_seed()).build(id, detected.padded(padding));
            self.document.add_region(region);
        }
        self.commit();
        log::info!("Added {} detected regions", boxes.len());
        boxes.len()
    }

    // ---- output ----

    pub fn compositor(&self) -> Compositor {
        Compositor::new(self.settings.blur_strategy)
    }

    /// The frame as the user sees it.
    pub fn render(&self) -> Option<RgbaImage> {
        let options = RenderOptions {
            show_ui: true,
            show_original: self.show_original(),
        };
        Renderer::new(self.compositor()).render(self, options)
    }

    /// The frame with effects and without any on-canvas controls. Selection
    /// and crop state are untouched.
    pub fn export_image(&self) -> EditorResult<RgbaImage> {
        Renderer::new(self.compositor())
            .render(self, RenderOptions::export())
            .ok_or(EditorError::NoImage)
    }
}
