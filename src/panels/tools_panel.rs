use egui::{Button, Slider};

use crate::RedactApp;
use crate::command::Command;
use crate::compositor::BlurStrategy;
use crate::region::{EffectMode, Shape};
use crate::settings::{BLUR_AMOUNT_RANGE, CHUNK_SIZE_RANGE, EditorSettings};
use crate::transform::ImageTransform;

/// Actions picked in the toolbar that need the app rather than the editor.
enum AppAction {
    #[cfg(not(target_arch = "wasm32"))]
    Open,
    Export,
}

pub fn tools_panel(app: &mut RedactApp, ctx: &egui::Context) {
    let mut settings = app.settings();
    let mut commands = Vec::new();
    let mut action = None;

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            let editor = app.editor();
            let has_image = editor.has_image();

            ui.heading("Redact");
            ui.horizontal(|ui| {
                #[cfg(not(target_arch = "wasm32"))]
                if ui.button("Open…").clicked() {
                    action = Some(AppAction::Open);
                }
                if ui.add_enabled(has_image, Button::new("Export")).clicked() {
                    action = Some(AppAction::Export);
                }
            });
            ui.separator();

            effect_settings_ui(ui, &mut settings);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.add_enabled(editor.can_undo(), Button::new("Undo")).clicked() {
                    commands.push(Command::Undo);
                }
                if ui.add_enabled(editor.can_redo(), Button::new("Redo")).clicked() {
                    commands.push(Command::Redo);
                }
            });
            let has_regions = !editor.regions().is_empty();
            if ui.add_enabled(editor.selected().is_some(), Button::new("Delete selected")).clicked() {
                commands.push(Command::DeleteSelected);
            }
            if ui.add_enabled(has_regions, Button::new("Clear regions")).clicked() {
                commands.push(Command::ClearRegions);
            }
            ui.separator();

            ui.add_enabled_ui(has_image, |ui| {
                if editor.is_cropping() {
                    ui.label("Drag on the image to choose the crop.");
                    ui.horizontal(|ui| {
                        if ui.add_enabled(editor.crop_rect().is_some(), Button::new("Apply crop")).clicked() {
                            commands.push(Command::ApplyCrop);
                        }
                        if ui.button("Cancel").clicked() {
                            commands.push(Command::CancelCrop);
                        }
                    });
                } else if ui.button("Crop").clicked() {
                    commands.push(Command::BeginCrop);
                }

                ui.horizontal(|ui| {
                    for (label, transform) in [
                        ("Flip H", ImageTransform::FlipHorizontal),
                        ("Flip V", ImageTransform::FlipVertical),
                        ("⟲ 90°", ImageTransform::RotateCounterClockwise),
                        ("⟳ 90°", ImageTransform::RotateClockwise),
                    ] {
                        if ui.button(label).on_hover_text(transform.name()).clicked() {
                            commands.push(Command::Transform(transform));
                        }
                    }
                });

                if ui.button("Remove image").clicked() {
                    commands.push(Command::RemoveImage);
                }
            });
            ui.separator();

            ui.label(format!("Regions: {}", editor.regions().len()));
            ui.label(format!(
                "History: {}/{} (checkpoints: {})",
                editor.history().index() + 1,
                editor.history().len(),
                editor.checkpoints().len()
            ));
            ui.weak("Hold Alt to compare with the original.");

            if let Some(err) = app.last_error() {
                ui.colored_label(ui.visuals().error_fg_color, err);
            }
        });

    app.set_settings(settings);
    for command in commands {
        app.execute(command);
    }
    match action {
        #[cfg(not(target_arch = "wasm32"))]
        Some(AppAction::Open) => app.open_dialog(),
        Some(AppAction::Export) => app.export(),
        None => {}
    }
}

fn effect_settings_ui(ui: &mut egui::Ui, settings: &mut EditorSettings) {
    let effect = &mut settings.effect;

    ui.label("Effect");
    ui.horizontal(|ui| {
        for mode in EffectMode::ALL {
            ui.selectable_value(&mut effect.mode, mode, mode.label());
        }
    });

    ui.label("Shape");
    ui.horizontal(|ui| {
        for shape in Shape::ALL {
            ui.selectable_value(&mut effect.shape, shape, shape.label());
        }
    });

    if effect.mode == EffectMode::Blur {
        ui.add(Slider::new(&mut effect.blur_amount, BLUR_AMOUNT_RANGE).text("Blur"));
        ui.checkbox(&mut effect.chunky, "Chunky");
        if effect.chunky {
            ui.add(Slider::new(&mut effect.chunk_size, CHUNK_SIZE_RANGE).text("Block size"));
        }

        egui::ComboBox::from_label("Blur style")
            .selected_text(settings.blur_strategy.label())
            .show_ui(ui, |ui| {
                for strategy in BlurStrategy::ALL {
                    ui.selectable_value(&mut settings.blur_strategy, strategy, strategy.label());
                }
            });
    }
}
