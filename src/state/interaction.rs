//! Pointer gestures on the canvas, in image coordinates.

use egui::{CursorIcon, Pos2};

use super::context::EditorContext;
use super::editor_state::DragSession;
use crate::geometry::{
    angle_around, hit_selection_control, resize_anchor, resize_from_anchor, SelectionControl,
};
use crate::region::{fresh_seed, meets_min_size, normalized_rect};

impl EditorContext {
    /// Starts whatever the pointer landed on. First match wins: crop, delete
    /// control, rotation handle, resize handle, an existing region, a new one.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if !self.document.has_image() {
            return;
        }

        if self.cropping {
            self.crop = None;
            self.drag = DragSession::Cropping { start: pos };
            return;
        }

        let metrics = self.handle_metrics();
        if let Some(region) = self.selected_region() {
            match hit_selection_control(pos, region, metrics) {
                Some(SelectionControl::Delete) => {
                    self.delete_selected();
                    return;
                }
                Some(SelectionControl::Rotate) => {
                    self.drag = DragSession::Rotating {
                        region_id: region.id,
                        start_angle: angle_around(pos, region.center()),
                        original_rotation: region.rotation,
                    };
                    return;
                }
                Some(SelectionControl::Resize(handle)) => {
                    log::trace!("Resize from {}", handle.as_str());
                    self.drag = DragSession::Resizing {
                        region_id: region.id,
                        anchor: resize_anchor(handle, region),
                    };
                    return;
                }
                None => {}
            }
        }

        if let Some(region) = self.document.region_at(pos) {
            let region_id = region.id;
            self.drag = DragSession::Moving {
                region_id,
                offset: pos - region.pos,
            };
            self.selected = Some(region_id);
            return;
        }

        self.selected = None;
        self.drag = DragSession::Drawing {
            start: pos,
            current: pos,
            template: self.settings.effect.template(fresh_seed()),
        };
    }

    /// Updates the active drag. Returns whether anything visible changed.
    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        match &mut self.drag {
            DragSession::Idle => false,
            DragSession::Drawing { current, .. } => {
                *current = pos;
                true
            }
            DragSession::Cropping { start } => {
                self.crop = Some(normalized_rect(*start, pos));
                true
            }
            DragSession::Moving { region_id, offset } => {
                let offset = *offset;
                match self.document.region_mut(*region_id) {
                    Some(region) => {
                        region.pos = pos - offset;
                        true
                    }
                    None => false,
                }
            }
            DragSession::Resizing { region_id, anchor } => {
                let anchor = *anchor;
                match self.document.region_mut(*region_id) {
                    Some(region) => {
                        let rect = resize_from_anchor(&anchor, pos, region.size);
                        region.set_rect(rect);
                        true
                    }
                    None => false,
                }
            }
            DragSession::Rotating { region_id, start_angle, original_rotation } => {
                let (start_angle, original_rotation) = (*start_angle, *original_rotation);
                match self.document.region_mut(*region_id) {
                    Some(region) => {
                        region.rotation = original_rotation + (angle_around(pos, region.center()) - start_angle);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Finishes the active drag and returns to idle. Manipulations are
    /// committed; a drawn region or crop is kept only if big enough.
    pub fn pointer_up(&mut self, pos: Pos2) -> bool {
        if self.drag.is_idle() {
            return false;
        }
        self.pointer_move(pos);

        match std::mem::take(&mut self.drag) {
            DragSession::Idle => false,
            DragSession::Drawing { start, template, .. } => {
                let rect = normalized_rect(start, pos);
                if !meets_min_size(&rect) {
                    return true;
                }
                let id = self.document.next_id();
                self.document.add_region(template.build(id, rect));
                self.commit();
                self.selected = Some(id);
                log::info!("Drew region {id} at {:?}", rect);
                true
            }
            DragSession::Cropping { .. } => {
                self.crop = self.crop.filter(meets_min_size);
                true
            }
            DragSession::Moving { .. } | DragSession::Resizing { .. } | DragSession::Rotating { .. } => {
                self.commit();
                true
            }
        }
    }

    /// Cursor for a hovering pointer. Never changes state.
    pub fn cursor_hint(&self, pos: Pos2) -> CursorIcon {
        if self.cropping || !self.document.has_image() {
            return CursorIcon::Crosshair;
        }
        if let Some(region) = self.selected_region() {
            match hit_selection_control(pos, region, self.handle_metrics()) {
                Some(SelectionControl::Delete) => return CursorIcon::PointingHand,
                Some(SelectionControl::Rotate) => return CursorIcon::Grab,
                Some(SelectionControl::Resize(handle)) => return handle.cursor_icon(),
                None => {}
            }
        }
        if self.document.region_at(pos).is_some() {
            CursorIcon::Move
        } else {
            CursorIcon::Crosshair
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{delete_button_position, rotation_handle_position};
    use egui::Vec2;
    use image::RgbaImage;

    fn loaded() -> EditorContext {
        let mut ctx = EditorContext::default();
        ctx.load_image(RgbaImage::new(300, 300));
        ctx
    }

    fn drag(ctx: &mut EditorContext, from: Pos2, to: Pos2) {
        ctx.pointer_down(from);
        ctx.pointer_move(to);
        ctx.pointer_up(to);
    }

    #[test]
    fn test_no_image_ignores_pointer() {
        let mut ctx = EditorContext::default();
        ctx.pointer_down(Pos2::new(1.0, 1.0));
        assert!(ctx.drag().is_idle());
        assert!(!ctx.pointer_up(Pos2::new(50.0, 50.0)));
    }

    #[test]
    fn test_small_drawing_is_discarded() {
        let mut ctx = loaded();
        drag(&mut ctx, Pos2::new(10.0, 10.0), Pos2::new(13.0, 50.0));
        assert!(ctx.regions().is_empty());
        assert_eq!(ctx.history().len(), 1);
        assert!(ctx.drag().is_idle());
    }

    #[test]
    fn test_move_commits() {
        let mut ctx = loaded();
        drag(&mut ctx, Pos2::new(10.0, 10.0), Pos2::new(100.0, 80.0));
        drag(&mut ctx, Pos2::new(50.0, 50.0), Pos2::new(70.0, 60.0));
        assert_eq!(ctx.regions()[0].pos, Pos2::new(30.0, 20.0));
        assert_eq!(ctx.history().index(), 2);

        ctx.undo();
        assert_eq!(ctx.regions()[0].pos, Pos2::new(10.0, 10.0));
        assert!(ctx.selected().is_none());
    }

    #[test]
    fn test_rotate_by_handle() {
        let mut ctx = loaded();
        drag(&mut ctx, Pos2::new(100.0, 100.0), Pos2::new(200.0, 160.0));
        let region = ctx.regions()[0].clone();
        let handle = rotation_handle_position(&region, ctx.handle_metrics());

        // Swing the handle from straight above the center to straight right of it.
        ctx.pointer_down(handle);
        assert_eq!(ctx.drag().name(), "rotating");
        ctx.pointer_up(region.center() + Vec2::new(80.0, 0.0));
        assert!((ctx.regions()[0].rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert_eq!(ctx.regions()[0].size, region.size);
    }

    #[test]
    fn test_delete_control() {
        let mut ctx = loaded();
        drag(&mut ctx, Pos2::new(100.0, 100.0), Pos2::new(200.0, 160.0));
        let region = ctx.regions()[0].clone();
        ctx.pointer_down(delete_button_position(&region, ctx.handle_metrics()));
        assert!(ctx.regions().is_empty());
        assert!(ctx.drag().is_idle());
        assert_eq!(ctx.history().index(), 2);
    }

    #[test]
    fn test_click_on_empty_space_deselects() {
        let mut ctx = loaded();
        drag(&mut ctx, Pos2::new(100.0, 100.0), Pos2::new(200.0, 160.0));
        assert!(ctx.selected().is_some());
        ctx.pointer_down(Pos2::new(10.0, 250.0));
        assert!(ctx.selected().is_none());
        ctx.pointer_up(Pos2::new(10.0, 250.0));
        assert_eq!(ctx.regions().len(), 1);
    }

    #[test]
    fn test_cursor_hints() {
        let mut ctx = loaded();
        drag(&mut ctx, Pos2::new(100.0, 100.0), Pos2::new(200.0, 160.0));
        let region = ctx.regions()[0].clone();
        let metrics = ctx.handle_metrics();

        assert_eq!(ctx.cursor_hint(Pos2::new(200.0, 160.0)), CursorIcon::ResizeNwSe);
        assert_eq!(ctx.cursor_hint(Pos2::new(150.0, 160.0)), CursorIcon::ResizeVertical);
        assert_eq!(ctx.cursor_hint(rotation_handle_position(&region, metrics)), CursorIcon::Grab);
        assert_eq!(ctx.cursor_hint(delete_button_position(&region, metrics)), CursorIcon::PointingHand);
        assert_eq!(ctx.cursor_hint(Pos2::new(150.0, 130.0)), CursorIcon::Move);
        assert_eq!(ctx.cursor_hint(Pos2::new(20.0, 20.0)), CursorIcon::Crosshair);

        ctx.begin_crop();
        assert_eq!(ctx.cursor_hint(Pos2::new(150.0, 130.0)), CursorIcon::Crosshair);
    }
}
