mod app;
mod data;
mod state;
mod theme;
mod ui;

use app::SlotboardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Slotboard – Warehouse Occupancy",
        options,
        Box::new(|_cc| Ok(Box::new(SlotboardApp::default()))),
    )
}
