use crate::command::Command;
use crate::error::EditorError;
use crate::file_handler::{self, FileHandler, LoadedImage};
use crate::input::{CanvasView, InputHandler, route_event};
use crate::panels::{central_panel, tools_panel};
use crate::settings::EditorSettings;
use crate::state::EditorContext;
use crate::texture_manager::CanvasTexture;

/// The redaction editor window. Only the effect settings survive a restart.
#[derive(Default)]
pub struct RedactApp {
    editor: EditorContext,
    texture: CanvasTexture,
    input: InputHandler,
    files: FileHandler,
    /// Last failure shown in the toolbar.
    last_error: Option<String>,
}

impl RedactApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: EditorSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::debug!("Restored settings: {:?}", settings);

        Self {
            editor: EditorContext::new(settings),
            ..Default::default()
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn settings(&self) -> EditorSettings {
        self.editor.settings
    }

    /// Effect settings only shape regions drawn from now on; a different blur
    /// strategy changes how every existing blur looks.
    pub fn set_settings(&mut self, settings: EditorSettings) {
        if settings == self.editor.settings {
            return;
        }
        if settings.blur_strategy != self.editor.settings.blur_strategy {
            log::info!("Blur strategy: {}", settings.blur_strategy.label());
            self.texture.mark_dirty();
        }
        self.editor.settings = settings;
    }

    /// Name of the loaded file, used to name exports. Follows undo across
    /// image loads.
    pub fn source_name(&self) -> Option<&str> {
        self.editor.source_name()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn texture(&self) -> &CanvasTexture {
        &self.texture
    }

    pub fn execute(&mut self, command: Command) {
        if command.execute(&mut self.editor) {
            self.texture.mark_dirty();
        }
    }

    pub fn load_image(&mut self, loaded: LoadedImage) {
        self.editor.load_image(loaded.image);
        self.editor.set_source_name(Some(loaded.name));
        self.last_error = None;
        self.texture.mark_dirty();
    }

    /// Decodes and loads an encoded image.
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<(), EditorError> {
        let image = file_handler::decode_image(bytes)?;
        self.load_image(LoadedImage {
            name: name.to_owned(),
            image,
        });
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_path(&mut self, path: &std::path::Path) {
        match file_handler::read_image(path) {
            Ok(loaded) => self.load_image(loaded),
            Err(err) => self.report_error(err),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_dialog(&mut self) {
        match file_handler::open_image_dialog() {
            Ok(Some(loaded)) => self.load_image(loaded),
            Ok(None) => log::debug!("Open cancelled"),
            Err(err) => self.report_error(err),
        }
    }

    /// Saves the effects-only render as PNG.
    pub fn export(&mut self) {
        let file_name = file_handler::export_file_name(self.source_name());
        let result = self
            .editor
            .export_image()
            .and_then(|image| file_handler::save_png(&image, &file_name));
        match result {
            Ok(true) => self.last_error = None,
            Ok(false) => log::debug!("Export cancelled"),
            Err(err) => self.report_error(err),
        }
    }

    pub fn report_error(&mut self, err: EditorError) {
        log::error!("{err}");
        self.last_error = Some(err.to_string());
    }

    /// Feeds this frame's input to the editor and keeps the texture in step.
    pub fn handle_input(&mut self, ctx: &egui::Context, view: &CanvasView) {
        let scale_before = self.editor.view_scale();
        self.editor.set_view_scale(view.view_scale());
        if (self.editor.view_scale() - scale_before).abs() > f32::EPSILON {
            self.texture.mark_dirty();
        }

        let text_focus = ctx.wants_keyboard_input();
        for event in self.input.process_input(ctx, view) {
            if route_event(&event, &mut self.editor, text_focus) {
                self.texture.mark_dirty();
            }
        }

        let alt_held = ctx.input(|i| i.modifiers.alt);
        if self.editor.set_show_original(alt_held) {
            self.texture.mark_dirty();
        }
    }

    /// Re-renders the frame if anything changed since the last upload.
    pub fn refresh_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_dirty() {
            self.texture.update(ctx, self.editor.render());
        }
    }

    fn take_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.files.check_for_dropped_files(ctx) {
            return;
        }
        match self.files.take_dropped_image() {
            Some(Ok(loaded)) => self.load_image(loaded),
            Some(Err(err)) => self.report_error(err),
            None => log::warn!("Dropped files contained no image"),
        }
    }
}

impl eframe::App for RedactApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.editor.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.take_dropped_files(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.files.preview_files_being_dropped(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::BlurStrategy;
    use image::{Rgba, RgbaImage};

    fn png_bytes() -> Vec<u8> {
        file_handler::encode_png(&RgbaImage::from_pixel(40, 30, Rgba([10, 20, 30, 255]))).unwrap()
    }

    #[test]
    fn test_load_bytes() {
        let mut app = RedactApp::default();
        app.load_bytes("cat.jpg", &png_bytes()).unwrap();
        assert!(app.editor().has_image());
        assert_eq!(app.source_name(), Some("cat.jpg"));
        assert!(app.texture().is_dirty());
    }

    #[test]
    fn test_load_bad_bytes_keeps_state() {
        let mut app = RedactApp::default();
        assert!(app.load_bytes("junk.png", b"junk").is_err());
        assert!(!app.editor().has_image());
        assert_eq!(app.source_name(), None);
    }

    #[test]
    fn test_undo_restores_source_name() {
        let mut app = RedactApp::default();
        app.load_bytes("first.png", &png_bytes()).unwrap();
        app.execute(Command::Transform(crate::transform::ImageTransform::FlipHorizontal));
        assert_eq!(app.source_name(), Some("first.png"));

        app.load_bytes("second.jpg", &png_bytes()).unwrap();
        assert_eq!(app.source_name(), Some("second.jpg"));
        app.execute(Command::Undo);
        assert_eq!(app.source_name(), Some("first.png"));
        assert_eq!(file_handler::export_file_name(app.source_name()), "first_blurred.png");
    }

    #[test]
    fn test_set_settings() {
        let mut app = RedactApp::default();
        let mut settings = app.settings();
        settings.effect.blur_amount = 35.0;
        app.set_settings(settings);
        assert_eq!(app.settings().effect.blur_amount, 35.0);

        settings.blur_strategy = BlurStrategy::Downscale;
        app.set_settings(settings);
        assert_eq!(app.settings().blur_strategy, BlurStrategy::Downscale);
    }

    #[test]
    fn test_execute_command() {
        let mut app = RedactApp::default();
        app.load_bytes("a.png", &png_bytes()).unwrap();
        app.execute(Command::Transform(crate::transform::ImageTransform::RotateClockwise));
        let size = app.editor().document().image_size().unwrap();
        assert_eq!((size.x, size.y), (30.0, 40.0));
        assert!(app.editor().can_undo());
    }
}
