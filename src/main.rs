#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Shapes"),
        ..Default::default()
    };
    eframe::run_native(
        "eframe_shapes",
        native_options,
        Box::new(|cc| Ok(Box::new(eframe_shapes::ShapeApp::new(cc)))),
    )
}
