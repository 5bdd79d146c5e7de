use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

mod common;

pub use common::{meets_min_size, normalized_rect, MIN_REGION_SIZE, MIN_RENDER_SIZE, ROUNDED_CORNER_FACTOR};

/// Process-unique region identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u64);

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outline used to clip a region's effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Rectangle,
    RoundedRectangle,
    Ellipse,
}

impl Shape {
    pub const ALL: [Shape; 3] = [Shape::Rectangle, Shape::RoundedRectangle, Shape::Ellipse];

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Rectangle => "Rectangle",
            Shape::RoundedRectangle => "Rounded",
            Shape::Ellipse => "Ellipse",
        }
    }

    /// Containment test in the shape's own frame: `p` is relative to the center
    /// and `size` is the unrotated box size.
    pub fn contains_local(&self, p: Vec2, size: Vec2) -> bool {
        let half = size * 0.5;
        if half.x <= 0.0 || half.y <= 0.0 {
            return false;
        }
        let (ax, ay) = (p.x.abs(), p.y.abs());
        if ax > half.x || ay > half.y {
            return false;
        }
        match self {
            Shape::Rectangle => true,
            Shape::Ellipse => {
                let nx = p.x / half.x;
                let ny = p.y / half.y;
                nx * nx + ny * ny <= 1.0
            }
            Shape::RoundedRectangle => {
                let radius = size.x.min(size.y) * ROUNDED_CORNER_FACTOR;
                let qx = ax - (half.x - radius);
                let qy = ay - (half.y - radius);
                if qx <= 0.0 || qy <= 0.0 {
                    true
                } else {
                    qx * qx + qy * qy <= radius * radius
                }
            }
        }
    }
}

/// Which effect a region applies. Only used to pick settings in the UI;
/// the region itself stores a full [`Effect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EffectMode {
    #[default]
    Blur,
    Redact,
    Erase,
}

impl EffectMode {
    pub const ALL: [EffectMode; 3] = [EffectMode::Blur, EffectMode::Redact, EffectMode::Erase];

    pub fn label(&self) -> &'static str {
        match self {
            EffectMode::Blur => "Blur",
            EffectMode::Redact => "Redact",
            EffectMode::Erase => "Erase",
        }
    }
}

/// Block-pattern overlay painted over a blurred region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkyOverlay {
    pub block_size: u32,
    pub seed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Blur {
        /// Blur radius in image pixels.
        amount: f32,
        chunky: Option<ChunkyOverlay>,
    },
    /// Opaque black.
    Redact,
    /// Opaque white.
    Erase,
}

impl Effect {
    pub fn mode(&self) -> EffectMode {
        match self {
            Effect::Blur { .. } => EffectMode::Blur,
            Effect::Redact => EffectMode::Redact,
            Effect::Erase => EffectMode::Erase,
        }
    }
}

/// A user-placed redaction area: an axis-aligned box in image pixels, rotated
/// by `rotation` radians about its center.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub pos: Pos2,
    pub size: Vec2,
    pub rotation: f32,
    pub shape: Shape,
    pub effect: Effect,
}

impl Region {
    pub fn new(id: RegionId, rect: Rect, shape: Shape, effect: Effect) -> Self {
        Self {
            id,
            pos: rect.min,
            size: rect.size(),
            rotation: 0.0,
            shape,
            effect,
        }
    }

    /// The unrotated box.
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.pos, self.size)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.pos = rect.min;
        self.size = rect.size();
    }

    pub fn center(&self) -> Pos2 {
        self.pos + self.size * 0.5
    }

    pub fn is_renderable(&self) -> bool {
        self.size.x >= MIN_RENDER_SIZE && self.size.y >= MIN_RENDER_SIZE
    }

    /// Axis-aligned bounds of the rotated box.
    pub fn world_bounds(&self) -> Rect {
        let center = self.center();
        let mut bounds = Rect::NOTHING;
        let rect = self.rect();
        for corner in [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()] {
            bounds.extend_with(crate::geometry::rotate_point(corner, center, self.rotation));
        }
        bounds
    }
}

/// Shape and effect captured when a drag starts, applied to whatever box the
/// drag ends up covering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionTemplate {
    pub shape: Shape,
    pub effect: Effect,
}

impl RegionTemplate {
    pub fn build(&self, id: RegionId, rect: Rect) -> Region {
        Region::new(id, rect, self.shape, self.effect)
    }
}

/// A fresh seed for a new region's chunky pattern.
pub fn fresh_seed() -> u32 {
    uuid::Uuid::new_v4().as_u128() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(shape: Shape) -> Region {
        Region::new(
            RegionId(1),
            Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(90.0, 70.0)),
            shape,
            Effect::Redact,
        )
    }

    #[test]
    fn test_region_geometry() {
        let r = region(Shape::Rectangle);
        assert_eq!(r.center(), Pos2::new(55.0, 45.0));
        assert_eq!(r.rect().max, Pos2::new(100.0, 80.0));
        assert_eq!(r.effect.mode(), EffectMode::Redact);
    }

    #[test]
    fn test_world_bounds_of_quarter_turn() {
        let mut r = region(Shape::Rectangle);
        r.rotation = std::f32::consts::FRAC_PI_2;
        let bounds = r.world_bounds();
        assert!((bounds.width() - 70.0).abs() < 1e-3);
        assert!((bounds.height() - 90.0).abs() < 1e-3);
        assert!((bounds.center().x - 55.0).abs() < 1e-3);
    }

    #[test]
    fn test_shape_containment() {
        let size = Vec2::new(100.0, 60.0);
        // Box corner is only inside the plain rectangle.
        let corner = Vec2::new(49.0, 29.0);
        assert!(Shape::Rectangle.contains_local(corner, size));
        assert!(!Shape::RoundedRectangle.contains_local(corner, size));
        assert!(!Shape::Ellipse.contains_local(corner, size));

        // Edge midpoints are inside all of them.
        let edge = Vec2::new(49.0, 0.0);
        for shape in Shape::ALL {
            assert!(shape.contains_local(edge, size));
            assert!(shape.contains_local(Vec2::ZERO, size));
            assert!(!shape.contains_local(Vec2::new(51.0, 0.0), size));
        }
    }
}
