use eframe::egui::{self, Button, Color32, DragValue, RichText, Ui};

use crate::data::loader::{HEIGHT_COLUMN, STATUS_COLUMN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – warehouse configuration
// ---------------------------------------------------------------------------

/// Render the configuration panel: capacity inputs and file loading.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Warehouse setup");
    ui.separator();

    let mut changed = false;

    ui.label("Total positions");
    changed |= ui
        .add(
            DragValue::new(&mut state.capacity.total)
                .speed(10)
                .range(0..=500_000),
        )
        .changed();

    ui.add_space(8.0);
    ui.strong("Positions by height");
    ui.label("0.75 m positions");
    changed |= ui
        .add(
            DragValue::new(&mut state.capacity.height_075)
                .speed(10)
                .range(0..=500_000),
        )
        .changed();
    ui.label("1.50 m positions");
    changed |= ui
        .add(
            DragValue::new(&mut state.capacity.height_150)
                .speed(10)
                .range(0..=500_000),
        )
        .changed();

    // Advisory only: aggregation proceeds regardless.
    if !state.capacity.split_matches_total() {
        ui.add_space(4.0);
        ui.colored_label(
            ui.visuals().warn_fg_color,
            "0.75 m and 1.50 m positions do not add up to the total.",
        );
    }

    if changed {
        state.recompute();
    }

    ui.separator();
    if ui.button("Load spreadsheet…").clicked() {
        open_file_dialog(state);
    }
    ui.add_space(4.0);
    ui.label(
        RichText::new(format!(
            "XLS or XLSX with '{HEIGHT_COLUMN}' and '{STATUS_COLUMN}' columns on the first sheet."
        ))
        .small()
        .weak(),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.report.is_some();
            if ui
                .add_enabled(can_export, Button::new("Export report…"))
                .clicked()
            {
                export_report_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let name = state.source_name.as_deref().unwrap_or("(unnamed)");
            ui.label(format!(
                "{name}: {} row(s) loaded, {} with recognized status",
                table.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open occupancy spreadsheet")
        .add_filter("Spreadsheets", &["xlsx", "xls"])
        .pick_file();

    if let Some(path) = file {
        match std::fs::read(&path) {
            Ok(bytes) => {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("upload")
                    .to_string();
                state.ingest_bytes(&name, &bytes);
            }
            Err(e) => {
                log::error!("failed to read {}: {e}", path.display());
                state.status_message =
                    Some(format!("Error: could not read {}: {e}", path.display()));
            }
        }
    }
}

fn export_report_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export occupancy report")
        .add_filter("JSON", &["json"])
        .set_file_name("occupancy_report.json")
        .save_file();

    if let Some(path) = file {
        match state.export_report(&path) {
            Ok(()) => log::info!("report exported to {}", path.display()),
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
