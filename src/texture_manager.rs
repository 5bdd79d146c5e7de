use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use image::RgbaImage;

/// The GPU texture showing the rendered frame. Re-uploaded whenever the editor
/// marks it dirty; there is never more than one.
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    dirty: bool,
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self {
            handle: None,
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Uploads `frame` if the texture is stale. `None` drops the texture.
    pub fn update(&mut self, ctx: &Context, frame: Option<RgbaImage>) {
        match frame {
            Some(frame) => {
                let image = to_color_image(&frame);
                match &mut self.handle {
                    Some(handle) => handle.set(image, TextureOptions::LINEAR),
                    None => self.handle = Some(ctx.load_texture("redact_canvas", image, TextureOptions::LINEAR)),
                }
            }
            None => self.handle = None,
        }
        self.dirty = false;
    }

    pub fn handle(&self) -> Option<&TextureHandle> {
        self.handle.as_ref()
    }
}

impl Default for CanvasTexture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn to_color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}
