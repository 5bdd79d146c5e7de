#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod compositor;
pub mod detect;
pub mod document;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod gizmo;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod region;
pub mod renderer;
pub mod settings;
pub mod state;
pub mod texture_manager;
pub mod transform;

pub use app::RedactApp;
pub use command::{Command, RegionHistory};
pub use compositor::{BlurStrategy, Compositor};
pub use detect::{BoxPadding, DetectedBox};
pub use document::Document;
pub use error::{EditorError, EditorResult};
pub use input::{InputEvent, InputLocation};
pub use region::{Effect, EffectMode, Region, RegionId, Shape};
pub use renderer::{RenderOptions, Renderer};
pub use settings::{EditorSettings, EffectSettings};
pub use state::EditorContext;
pub use transform::ImageTransform;
