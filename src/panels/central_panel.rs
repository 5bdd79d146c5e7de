use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Vec2};

use crate::RedactApp;
use crate::input::CanvasView;

pub fn central_panel(app: &mut RedactApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_rect_before_wrap();
        let (response, painter) = ui.allocate_painter(available.size(), Sense::click_and_drag());

        let Some(image_size) = app.editor().document().image_size() else {
            app.refresh_texture(ctx);
            empty_canvas(app, ui, response.rect);
            return;
        };

        let Some(view) = CanvasView::fit(response.rect, image_size) else {
            return;
        };
        app.handle_input(ctx, &view);
        app.refresh_texture(ctx);

        if let Some(texture) = app.texture().handle() {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), view.rect, uv, Color32::WHITE);
        }

        if let Some(pos) = response.hover_pos() {
            ctx.set_cursor_icon(app.editor().cursor_hint(view.to_image(pos)));
        }

        if app.editor().show_original() {
            let badge = Rect::from_min_size(view.rect.left_top() + Vec2::splat(8.0), Vec2::new(72.0, 22.0));
            painter.rect_filled(badge, 4.0, Color32::from_black_alpha(170));
            painter.text(badge.center(), Align2::CENTER_CENTER, "Original", FontId::proportional(13.0), Color32::WHITE);
        }
    });
}

fn empty_canvas(app: &mut RedactApp, ui: &mut egui::Ui, rect: Rect) {
    ui.painter().text(
        rect.center() - Vec2::new(0.0, 24.0),
        Align2::CENTER_CENTER,
        "Drop an image here",
        FontId::proportional(20.0),
        ui.visuals().weak_text_color(),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        let button = Rect::from_center_size(rect.center() + Vec2::new(0.0, 12.0), Vec2::new(120.0, 28.0));
        if ui.put(button, egui::Button::new("Open image…")).clicked() {
            app.open_dialog();
        }
    }
    #[cfg(target_arch = "wasm32")]
    let _ = app;
}
