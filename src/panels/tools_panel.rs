use egui::color_picker::{color_edit_button_srgba, Alpha};
use log::info;

use crate::app::ShapeApp;
use crate::scene::Mode;

/// Mode selection, default style for new shapes, clear, and undo/redo.
pub fn tools_panel(app: &mut ShapeApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(150.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            let active = app.store().state().mode;
            for mode in Mode::ALL {
                if ui.selectable_label(active == mode, mode.label()).clicked() && mode != active {
                    info!("mode selected from panel: {}", mode.label());
                    app.set_mode(mode);
                }
            }

            ui.separator();

            ui.label("New shape style");
            let defaults = app.defaults_mut();
            ui.horizontal(|ui| {
                ui.label("Stroke:");
                color_edit_button_srgba(ui, &mut defaults.stroke_color, Alpha::Opaque);
            });
            ui.horizontal(|ui| {
                ui.label("Fill:");
                color_edit_button_srgba(ui, &mut defaults.fill_color, Alpha::Opaque);
            });

            ui.separator();

            if ui.button("Clear").clicked() {
                app.clear_canvas();
            }

            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.history().can_undo();
                let can_redo = app.history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            ui.separator();

            ui.label(format!("History: {} entries", app.history().undo_stack().len()));
            for command in app.history().undo_stack().iter().rev().take(8) {
                ui.weak(command.label());
            }
        });
}
