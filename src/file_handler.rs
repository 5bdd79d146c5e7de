use eframe::egui;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

use crate::error::{EditorError, EditorResult};

/// Name given to exports when the source file name is unknown.
pub const DEFAULT_EXPORT_NAME: &str = "blurred.png";

/// A decoded image together with the name it came from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub name: String,
    pub image: RgbaImage,
}

/// Picks up images dropped onto the window.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    /// Collect newly dropped files from the UI context.
    /// Returns true if any arrived this frame.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                false
            } else {
                self.dropped_files = i.raw.dropped_files.clone();
                true
            }
        })
    }

    /// Decodes the first dropped image file. Only one image is edited at a time,
    /// so any further files are ignored.
    pub fn take_dropped_image(&mut self) -> Option<EditorResult<LoadedImage>> {
        let files = std::mem::take(&mut self.dropped_files);
        let file = files.into_iter().find(is_image_file)?;
        let name = file_display_name(&file);
        Some(load_dropped_file(&file, name))
    }

    /// Dim the window while files hover over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop an image to redact",
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

fn file_display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = file
        .path
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.name.clone());
    has_image_extension(&name)
}

fn has_image_extension(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

fn load_dropped_file(file: &egui::DroppedFile, name: String) -> EditorResult<LoadedImage> {
    if let Some(bytes) = &file.bytes {
        log::info!("Loading image from memory: {} ({} bytes)", name, bytes.len());
        return decode_image(bytes).map(|image| LoadedImage { name, image });
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return read_image(path);
    }

    log::warn!("Dropped file has no accessible data: {}", name);
    Err(EditorError::NoImage)
}

pub fn decode_image(bytes: &[u8]) -> EditorResult<RgbaImage> {
    let image = image::load_from_memory(bytes).map_err(EditorError::Decode)?;
    log::debug!("Decoded image: {}x{}", image.width(), image.height());
    Ok(image.to_rgba8())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_image(path: &std::path::Path) -> EditorResult<LoadedImage> {
    log::info!("Loading image from path: {}", path.display());
    let bytes = std::fs::read(path)?;
    let image = decode_image(&bytes)?;
    Ok(LoadedImage {
        name: path.display().to_string(),
        image,
    })
}

pub fn encode_png(image: &RgbaImage) -> EditorResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(EditorError::Encode)?;
    Ok(bytes)
}

/// `photo.jpg` becomes `photo_blurred.png`.
pub fn export_file_name(source: Option<&str>) -> String {
    source
        .and_then(|name| std::path::Path::new(name).file_stem())
        .map(|stem| stem.to_string_lossy())
        .filter(|stem| !stem.is_empty())
        .map(|stem| format!("{stem}_blurred.png"))
        .unwrap_or_else(|| DEFAULT_EXPORT_NAME.to_owned())
}

/// Asks for an image file and decodes it. `Ok(None)` when the dialog is cancelled.
#[cfg(not(target_arch = "wasm32"))]
pub fn open_image_dialog() -> EditorResult<Option<LoadedImage>> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
        .pick_file()
    else {
        return Ok(None);
    };
    read_image(&path).map(Some)
}

/// Writes the PNG wherever the user picks. Returns false if they cancel.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(image: &RgbaImage, file_name: &str) -> EditorResult<bool> {
    let bytes = encode_png(image)?;
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(file_name)
        .add_filter("PNG", &["png"])
        .save_file()
    else {
        return Ok(false);
    };
    std::fs::write(&path, bytes)?;
    log::info!("Exported {}", path.display());
    Ok(true)
}

/// Hands the PNG to the browser as a download.
#[cfg(target_arch = "wasm32")]
pub fn save_png(image: &RgbaImage, file_name: &str) -> EditorResult<bool> {
    use eframe::wasm_bindgen::JsCast as _;

    fn js_error(err: eframe::wasm_bindgen::JsValue) -> EditorError {
        EditorError::Io(std::io::Error::other(format!("{err:?}")))
    }

    let bytes = encode_png(image)?;
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| EditorError::Io(std::io::Error::other("no document")))?;
    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|el| js_error(el.into()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(js_error)?;

    log::info!("Exported {}", file_name);
    Ok(true)
}
