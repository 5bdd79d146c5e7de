mod editor_state;
pub mod context;
mod interaction;

pub use editor_state::{DragSession, PREVIEW_REGION_ID};
pub use context::EditorContext;
