use eframe::egui::{Color32, Frame, RichText, ScrollArea, Stroke, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{CapacityConfig, OccupancyReport};
use crate::data::filter::{STATUS_OUTSIDE, STATUS_STORED};
use crate::data::model::SlotTable;
use crate::state::AppState;
use crate::theme;
use crate::ui::charts::{self, Slice};

// ---------------------------------------------------------------------------
// Central panel – the dashboard itself
// ---------------------------------------------------------------------------

/// Render the dashboard: overview metrics, per-height detail, donut charts,
/// the discrepancy bar chart and the detail table.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an occupancy spreadsheet to start  (File → Open…)");
        });
        return;
    };

    if state.no_recognized_rows {
        ui.add_space(24.0);
        ui.vertical_centered(|ui: &mut Ui| {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                format!(
                    "The file loaded, but no row has status '{STATUS_STORED}' or '{STATUS_OUTSIDE}'."
                ),
            );
        });
        return;
    }

    let Some(report) = &state.report else {
        return;
    };
    let capacity = &state.capacity;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            overview(ui, report, capacity);
            ui.separator();
            height_detail(ui, report, capacity);
            ui.separator();
            occupancy_donuts(ui, report, capacity);
            outside_section(ui, report);
            ui.separator();
            detail_table(ui, state, table);
        });
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn overview(ui: &mut Ui, report: &OccupancyReport, capacity: &CapacityConfig) {
    ui.heading("Warehouse overview");
    ui.add_space(4.0);

    let balance = report.balance_total;
    ui.columns(3, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            "Stored (occupancy)",
            &theme::format_count(i64::from(report.stored_total)),
            None,
            theme::STORED_GREEN,
        );
        metric_card(
            &mut cols[1],
            &theme::balance_title("Total", balance),
            &theme::format_count(balance),
            Some(theme::balance_caption(balance, capacity.total)),
            theme::balance_color(balance),
        );
        metric_card(
            &mut cols[2],
            "Outside warehouse (discrepancy)",
            &theme::format_count(i64::from(report.outside_total)),
            None,
            theme::ALERT_RED,
        );
    });

    ui.label(
        RichText::new(format!(
            "The discrepancy figure counts only rows with status '{STATUS_OUTSIDE}'. \
             Temporary statuses such as 'Em Trânsito' are ignored to keep the focus \
             on inventory problems."
        ))
        .small()
        .weak(),
    );
}

fn height_detail(ui: &mut Ui, report: &OccupancyReport, capacity: &CapacityConfig) {
    ui.heading("Detail by height class");
    ui.label(
        RichText::new(format!(
            "0.75 m positions: {}  |  1.50 m positions: {}",
            theme::format_count(i64::from(capacity.height_075)),
            theme::format_count(i64::from(capacity.height_150)),
        ))
        .small()
        .weak(),
    );
    ui.add_space(4.0);

    ui.columns(6, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            &theme::balance_title("0.75 m", report.balance_075),
            &theme::format_count(report.balance_075),
            None,
            theme::balance_color(report.balance_075),
        );
        metric_card(
            &mut cols[1],
            "0.75 m stored",
            &theme::format_count(i64::from(report.stored_075)),
            None,
            theme::STORED_GREEN,
        );
        metric_card(
            &mut cols[2],
            "0.75 m outside",
            &theme::format_count(i64::from(report.outside_075)),
            None,
            theme::ALERT_RED,
        );
        metric_card(
            &mut cols[3],
            &theme::balance_title("1.50 m", report.balance_150),
            &theme::format_count(report.balance_150),
            None,
            theme::balance_color(report.balance_150),
        );
        metric_card(
            &mut cols[4],
            "1.50 m stored",
            &theme::format_count(i64::from(report.stored_150)),
            None,
            theme::STORED_GREEN,
        );
        metric_card(
            &mut cols[5],
            "1.50 m outside",
            &theme::format_count(i64::from(report.outside_150)),
            None,
            theme::ALERT_RED,
        );
    });
}

fn occupancy_donuts(ui: &mut Ui, report: &OccupancyReport, capacity: &CapacityConfig) {
    ui.heading("Occupancy by height class");
    ui.label(
        RichText::new("Share of stored positions against empty (or over-allocated) positions.")
            .small()
            .weak(),
    );
    ui.add_space(4.0);

    ui.columns(2, |cols: &mut [Ui]| {
        charts::donut_chart(
            &mut cols[0],
            &format!(
                "0.75 m positions (capacity {})",
                theme::format_count(i64::from(capacity.height_075))
            ),
            &occupancy_slices(report.stored_075, report.balance_075),
        );
        charts::donut_chart(
            &mut cols[1],
            &format!(
                "1.50 m positions (capacity {})",
                theme::format_count(i64::from(capacity.height_150))
            ),
            &occupancy_slices(report.stored_150, report.balance_150),
        );
    });
}

/// Slices for one height class: stored count plus the absolute balance,
/// relabeled as over-allocation when the balance is negative.
fn occupancy_slices(stored: u32, balance: i64) -> Vec<Slice> {
    vec![
        Slice {
            label: "Stored".to_string(),
            value: u64::from(stored),
            color: theme::STORED_GREEN,
        },
        Slice {
            label: theme::remainder_label(balance).to_string(),
            value: balance.unsigned_abs(),
            color: theme::balance_color(balance),
        },
    ]
}

fn outside_section(ui: &mut Ui, report: &OccupancyReport) {
    ui.heading("Outside warehouse by height class");
    ui.label(
        RichText::new("Containers tracked outside the warehouse: candidates for put-away.")
            .small()
            .weak(),
    );
    charts::outside_bar_chart(ui, report.outside_075, report.outside_150);
}

fn detail_table(ui: &mut Ui, state: &AppState, table: &SlotTable) {
    ui.heading(format!(
        "Detailed records ({} with recognized status)",
        state.visible_indices.len()
    ));
    ui.add_space(4.0);

    ui.push_id("detail_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(360.0)
            .columns(Column::auto().at_least(80.0), table.columns.len())
            .header(20.0, |mut header| {
                for name in &table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                let indices = &state.visible_indices;
                body.rows(18.0, indices.len(), |mut row| {
                    let record = &table.rows[indices[row.index()]];
                    for (idx, cell) in record.cells.iter().enumerate() {
                        row.col(|ui: &mut Ui| {
                            if idx == table.status_idx {
                                let color = if record.status == STATUS_STORED {
                                    theme::STORED_GREEN
                                } else {
                                    theme::ALERT_RED
                                };
                                ui.colored_label(color, &record.status);
                            } else if idx == table.height_idx {
                                ui.label(format!("{:.2}", record.height.meters()));
                            } else {
                                ui.label(cell.to_string());
                            }
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Metric card widget
// ---------------------------------------------------------------------------

fn metric_card(ui: &mut Ui, title: &str, value: &str, caption: Option<String>, color: Color32) {
    Frame::group(ui.style())
        .fill(theme::tint(color, 0.15))
        .stroke(Stroke::new(1.0, color))
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical(|ui: &mut Ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).size(22.0).strong());
                if let Some(caption) = caption {
                    ui.label(RichText::new(caption).small().color(color));
                }
            });
        });
}
