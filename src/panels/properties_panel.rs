use egui::color_picker::{color_edit_button_srgba, Alpha};

use crate::app::ShapeApp;
use crate::command::Command;
use crate::shape::{registry, ShapeKind};

/// Property editing for the current selection.
///
/// The edited object is the single selected shape or, for a
/// multi-selection, the selected shape with the highest z-index. Every
/// edit round-trips through an update command so it is undoable.
pub fn properties_panel(app: &mut ShapeApp, ctx: &egui::Context) {
    let Some(target) = app.store().state().primary_selected().cloned() else {
        return;
    };

    egui::SidePanel::right("properties_panel")
        .resizable(false)
        .default_width(190.0)
        .show(ctx, |ui| {
            ui.heading("Object");
            ui.separator();

            let mut edited = target.clone();

            egui::ComboBox::from_label("Type")
                .selected_text(edited.kind.label())
                .show_ui(ui, |ui| {
                    for kind in ShapeKind::ALL {
                        ui.selectable_value(&mut edited.kind, kind, kind.label());
                    }
                });

            ui.horizontal(|ui| {
                ui.label("Stroke:");
                color_edit_button_srgba(ui, &mut edited.stroke_color, Alpha::Opaque);
            });
            ui.horizontal(|ui| {
                ui.label("Fill:");
                color_edit_button_srgba(ui, &mut edited.fill_color, Alpha::Opaque);
            });

            ui.separator();

            ui.label("Position");
            ui.horizontal(|ui| {
                ui.label("X");
                ui.add(egui::DragValue::new(&mut edited.start.x).speed(1.0));
                ui.label("Y");
                ui.add(egui::DragValue::new(&mut edited.start.y).speed(1.0));
            });

            ui.separator();

            ui.label("Size");
            for field in registry::size_fields(edited.kind) {
                let mut value = (field.get)(&edited);
                ui.horizontal(|ui| {
                    ui.label(field.label);
                    if ui.add(egui::DragValue::new(&mut value).speed(1.0)).changed() {
                        (field.set)(&mut edited, value);
                    }
                });
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Z-index");
                ui.add(egui::DragValue::new(&mut edited.z_index).speed(1.0));
            });

            if edited != target {
                app.execute(Command::update(edited));
            }
        });
}
