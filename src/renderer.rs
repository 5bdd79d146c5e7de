use image::RgbaImage;

use crate::compositor::Compositor;
use crate::gizmo;
use crate::state::EditorContext;

/// What a frame should include besides the image itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Selection handles, preview outline and crop mask.
    pub show_ui: bool,
    /// Skip every effect and show the untouched base image.
    pub show_original: bool,
}

impl RenderOptions {
    /// What gets saved: effects, no controls.
    pub fn export() -> Self {
        Self {
            show_ui: false,
            show_original: false,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_ui: true,
            show_original: false,
        }
    }
}

/// Builds a full frame from scratch on every call; there is no dirty tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    compositor: Compositor,
}

impl Renderer {
    pub fn new(compositor: Compositor) -> Self {
        Self { compositor }
    }

    /// Base image, then each region's effect in order, then the drawing
    /// preview, then the controls. `None` when no image is loaded.
    pub fn render(&self, ctx: &EditorContext, options: RenderOptions) -> Option<RgbaImage> {
        let mut frame = RgbaImage::clone(ctx.document().image()?);
        if options.show_original {
            return Some(frame);
        }

        self.compositor.apply_all(&mut frame, ctx.regions());
        let preview = ctx.drag().preview_region();
        if let Some(preview) = &preview {
            self.compositor.apply_effect(&mut frame, preview);
        }

        if options.show_ui {
            if let Some(preview) = &preview {
                gizmo::draw_region_outline(&mut frame, preview, ctx.view_scale());
            }
            if let Some(selected) = ctx.selected_region() {
                gizmo::draw_selection(&mut frame, selected, ctx.handle_metrics());
            }
            if let Some(crop) = ctx.crop_rect() {
                gizmo::draw_crop_overlay(&mut frame, crop, ctx.view_scale());
            }
        }
        Some(frame)
    }
}
