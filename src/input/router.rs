use egui::{Key, Modifiers, PointerButton};

use super::InputEvent;
use crate::command::Command;
use crate::state::EditorContext;

/// Feeds one input event to the editor. Returns whether the frame needs
/// re-rendering.
///
/// Pointer presses only start a gesture over the canvas; moves and releases
/// are always forwarded so a drag can leave the image and still finish.
/// `text_focus` suppresses the delete shortcut while a text field is edited.
pub fn route_event(event: &InputEvent, ctx: &mut EditorContext, text_focus: bool) -> bool {
    match event {
        InputEvent::PointerDown { location, button: PointerButton::Primary } if location.on_canvas => {
            ctx.pointer_down(location.image);
            true
        }
        InputEvent::PointerDown { .. } => false,
        InputEvent::PointerMove { location } => ctx.pointer_move(location.image),
        InputEvent::PointerUp { location, button: PointerButton::Primary } => ctx.pointer_up(location.image),
        InputEvent::PointerUp { .. } => false,
        InputEvent::KeyPressed { key, modifiers } => match shortcut_command(*key, *modifiers, text_focus) {
            Some(command) => command.execute(ctx),
            None => false,
        },
    }
}

/// Keyboard shortcut table.
pub fn shortcut_command(key: Key, modifiers: Modifiers, text_focus: bool) -> Option<Command> {
    match key {
        Key::Z if modifiers.command && modifiers.shift => Some(Command::Redo),
        Key::Z if modifiers.command => Some(Command::Undo),
        Key::Delete | Key::Backspace if !text_focus => Some(Command::DeleteSelected),
        Key::Escape => Some(Command::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputLocation;
    use egui::Pos2;
    use image::RgbaImage;

    fn at(x: f32, y: f32, on_canvas: bool) -> InputLocation {
        InputLocation { screen: Pos2::new(x, y), image: Pos2::new(x, y), on_canvas }
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(shortcut_command(Key::Z, Modifiers::COMMAND, false), Some(Command::Undo));
        assert_eq!(
            shortcut_command(Key::Z, Modifiers::COMMAND | Modifiers::SHIFT, false),
            Some(Command::Redo)
        );
        assert_eq!(shortcut_command(Key::Z, Modifiers::NONE, false), None);
        assert_eq!(shortcut_command(Key::Backspace, Modifiers::NONE, false), Some(Command::DeleteSelected));
        assert_eq!(shortcut_command(Key::Delete, Modifiers::NONE, true), None);
        assert_eq!(shortcut_command(Key::Escape, Modifiers::NONE, true), Some(Command::Escape));
    }

    #[test]
    fn test_route_drag_across_canvas_edge() {
        let mut ctx = EditorContext::default();
        ctx.load_image(RgbaImage::new(100, 100));

        let down = InputEvent::PointerDown { location: at(150.0, 10.0, false), button: PointerButton::Primary };
        assert!(!route_event(&down, &mut ctx, false));

        let down = InputEvent::PointerDown { location: at(10.0, 10.0, true), button: PointerButton::Primary };
        assert!(route_event(&down, &mut ctx, false));
        assert!(route_event(&InputEvent::PointerMove { location: at(60.0, 40.0, true) }, &mut ctx, false));
        let up = InputEvent::PointerUp { location: at(120.0, 50.0, false), button: PointerButton::Primary };
        assert!(route_event(&up, &mut ctx, false));
        assert_eq!(ctx.regions().len(), 1);

        let undo = InputEvent::KeyPressed { key: Key::Z, modifiers: Modifiers::COMMAND };
        assert!(route_event(&undo, &mut ctx, false));
        assert!(ctx.regions().is_empty());
    }
}
