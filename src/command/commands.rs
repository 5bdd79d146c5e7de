use crate::detect::{BoxPadding, DetectedBox};
use crate::state::EditorContext;
use crate::transform::ImageTransform;

/// Editor actions raised by the toolbar and keyboard shortcuts.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Undo,
    Redo,
    /// Delete the selected region
    DeleteSelected,
    /// Leave crop mode and drop the selection
    Escape,
    /// Drop every region and all history, keep the image
    ClearRegions,
    /// Back to the empty editor
    RemoveImage,
    /// Flip, rotate or crop the whole image
    Transform(ImageTransform),
    BeginCrop,
    ApplyCrop,
    CancelCrop,
    /// Add a detector's boxes as one history entry
    AddDetections {
        boxes: Vec<DetectedBox>,
        padding: BoxPadding,
    },
}

impl Command {
    /// Runs the command. Returns whether the editor changed.
    pub fn execute(&self, ctx: &mut EditorContext) -> bool {
        log::debug!("Executing {}", self.name());
        match self {
            Command::Undo => ctx.undo(),
            Command::Redo => ctx.redo(),
            Command::DeleteSelected => ctx.delete_selected(),
            Command::Escape => ctx.escape(),
            Command::ClearRegions => {
                ctx.clear();
                true
            }
            Command::RemoveImage => {
                ctx.remove_image();
                true
            }
            Command::Transform(transform) => ctx.transform_image(*transform),
            Command::BeginCrop => ctx.begin_crop(),
            Command::ApplyCrop => ctx.apply_crop(),
            Command::CancelCrop => ctx.cancel_crop(),
            Command::AddDetections { boxes, padding } => ctx.add_detections(boxes, *padding) > 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::DeleteSelected => "delete selected",
            Command::Escape => "escape",
            Command::ClearRegions => "clear regions",
            Command::RemoveImage => "remove image",
            Command::Transform(transform) => transform.name(),
            Command::BeginCrop => "begin crop",
            Command::ApplyCrop => "apply crop",
            Command::CancelCrop => "cancel crop",
            Command::AddDetections { .. } => "add detections",
        }
    }
}
