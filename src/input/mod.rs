use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect, Vec2};

mod router;
pub use router::{route_event, shortcut_command};

/// Where the image is drawn on screen and at what scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    /// Screen rectangle covered by the image.
    pub rect: Rect,
    /// Screen pixels per image pixel.
    pub zoom: f32,
}

impl CanvasView {
    /// Fits an image into `available`, centered, never enlarged past 1:1.
    /// `None` while either the area or the image has no size, e.g. a minimised
    /// window or a side panel dragged across the canvas.
    pub fn fit(available: Rect, image_size: Vec2) -> Option<Self> {
        if available.width() < 1.0 || available.height() < 1.0 || image_size.x < 1.0 || image_size.y < 1.0 {
            return None;
        }
        let zoom = (available.width() / image_size.x)
            .min(available.height() / image_size.y)
            .min(1.0);
        let rect = Rect::from_center_size(available.center(), image_size * zoom);
        Some(Self { rect, zoom })
    }

    pub fn to_image(&self, screen: Pos2) -> Pos2 {
        Pos2::ZERO + (screen - self.rect.min) / self.zoom
    }

    pub fn to_screen(&self, image: Pos2) -> Pos2 {
        self.rect.min + image.to_vec2() * self.zoom
    }

    /// Image pixels per screen pixel, the scale on-canvas controls are sized by.
    pub fn view_scale(&self) -> f32 {
        1.0 / self.zoom
    }
}

/// A position both on screen and in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    pub screen: Pos2,
    pub image: Pos2,
    /// Whether the screen position is over the displayed image.
    pub on_canvas: bool,
}

/// Input relevant to the editor, already mapped into image space.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Pointer moved, with or without a button held.
    PointerMove {
        location: InputLocation,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
}

/// Turns raw egui input into [`InputEvent`]s for one frame.
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn make_location(view: &CanvasView, pos: Pos2) -> InputLocation {
        InputLocation {
            screen: pos,
            image: view.to_image(pos),
            on_canvas: view.rect.contains(pos),
        }
    }

    pub fn process_input(&mut self, ctx: &Context, view: &CanvasView) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let pos = input.pointer.interact_pos().or(self.last_pointer_pos);

            if let Some(pos) = input.pointer.hover_pos() {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        location: Self::make_location(view, pos),
                    });
                }
                self.last_pointer_pos = Some(pos);
            }

            if let Some(pos) = pos {
                let button = PointerButton::Primary;
                if input.pointer.button_pressed(button) {
                    events.push(InputEvent::PointerDown {
                        location: Self::make_location(view, pos),
                        button,
                    });
                }
                if input.pointer.button_released(button) {
                    events.push(InputEvent::PointerUp {
                        location: Self::make_location(view, pos),
                        button,
                    });
                }
            }

            for event in &input.events {
                if let egui::Event::Key { key, pressed: true, modifiers, .. } = event {
                    events.push(InputEvent::KeyPressed { key: *key, modifiers: *modifiers });
                }
            }
        });

        events
    }
}
