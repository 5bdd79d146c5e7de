/// The in-progress pointer interaction.
///
/// Exactly one drag is active between pointer-down and pointer-up; each
/// variant carries what its pointer-move and pointer-up need.
///
/// ```text
///              ┌──────────► Drawing ───────────┐
///              ├──────────► Moving ────────────┤
///   Idle ──────┼──────────► Resizing ──────────┼──────► Idle
///   (down)     ├──────────► Rotating ──────────┤  (up)
///              └──────────► Cropping ──────────┘
/// ```
use egui::{Pos2, Rect, Vec2};

use crate::geometry::ResizeAnchor;
use crate::region::{normalized_rect, Region, RegionId, RegionTemplate};

/// Id used for the not-yet-committed drawing preview.
pub const PREVIEW_REGION_ID: RegionId = RegionId(0);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    /// Dragging out a new region.
    Drawing {
        start: Pos2,
        current: Pos2,
        template: RegionTemplate,
    },
    Moving {
        region_id: RegionId,
        /// Pointer position minus the region origin at pointer-down.
        offset: Vec2,
    },
    Resizing {
        region_id: RegionId,
        anchor: ResizeAnchor,
    },
    Rotating {
        region_id: RegionId,
        start_angle: f32,
        original_rotation: f32,
    },
    Cropping {
        start: Pos2,
    },
}

impl DragSession {
    pub fn name(&self) -> &'static str {
        match self {
            DragSession::Idle => "idle",
            DragSession::Drawing { .. } => "drawing",
            DragSession::Moving { .. } => "moving",
            DragSession::Resizing { .. } => "resizing",
            DragSession::Rotating { .. } => "rotating",
            DragSession::Cropping { .. } => "cropping",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragSession::Idle)
    }

    /// The region being manipulated, if any.
    pub fn region_id(&self) -> Option<RegionId> {
        match self {
            DragSession::Moving { region_id, .. }
            | DragSession::Resizing { region_id, .. }
            | DragSession::Rotating { region_id, .. } => Some(*region_id),
            _ => None,
        }
    }

    /// The rectangle a drawing drag currently spans.
    pub fn drawn_rect(&self) -> Option<Rect> {
        match self {
            DragSession::Drawing { start, current, .. } => Some(normalized_rect(*start, *current)),
            _ => None,
        }
    }

    /// Live preview of the region a drawing drag would create.
    pub fn preview_region(&self) -> Option<Region> {
        match self {
            DragSession::Drawing { start, current, template } => {
                Some(template.build(PREVIEW_REGION_ID, normalized_rect(*start, *current)))
            }
            _ => None,
        }
    }
}
