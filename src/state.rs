use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use crate::data::aggregate::{aggregate, CapacityConfig, OccupancyReport};
use crate::data::cache::TableCache;
use crate::data::filter::recognized_indices;
use crate::data::model::SlotTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering. One instance per
/// session; nothing here is shared or persisted.
pub struct AppState {
    /// Operator-entered warehouse capacities.
    pub capacity: CapacityConfig,

    /// Cleaned table of the current file (None until a file is loaded).
    pub table: Option<Arc<SlotTable>>,

    /// Display name of the loaded file.
    pub source_name: Option<String>,

    /// Current occupancy figures (None before a load or when no row has a
    /// recognized status).
    pub report: Option<OccupancyReport>,

    /// Indices of recognized-status rows, the detail table's working set.
    pub visible_indices: Vec<usize>,

    /// The file loaded but held no recognized status; show a warning
    /// instead of the dashboard.
    pub no_recognized_rows: bool,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Parse cache keyed by file content.
    pub cache: TableCache,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            capacity: CapacityConfig::default(),
            table: None,
            source_name: None,
            report: None,
            visible_indices: Vec::new(),
            no_recognized_rows: false,
            status_message: None,
            cache: TableCache::default(),
        }
    }
}

impl AppState {
    /// Ingest an uploaded file: parse (or fetch from the cache), then
    /// recompute the figures. Load failures land in `status_message`.
    pub fn ingest_bytes(&mut self, name: &str, bytes: &[u8]) {
        match self.cache.get_or_load(bytes) {
            Ok(table) => {
                log::info!("loaded {} slot record(s) from {name}", table.len());
                self.table = Some(table);
                self.source_name = Some(name.to_string());
                self.status_message = None;
                self.recompute();
            }
            Err(e) => {
                log::error!("failed to load {name}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-run filtering and aggregation against the current table. Cheap;
    /// called after every load and capacity edit, never re-parses.
    pub fn recompute(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        self.visible_indices = recognized_indices(table);
        match aggregate(table, &self.capacity) {
            Ok(report) => {
                self.report = Some(report);
                self.no_recognized_rows = false;
            }
            Err(_) => {
                self.report = None;
                self.no_recognized_rows = true;
            }
        }
    }

    /// Write the current figures as JSON next to the capacities they were
    /// computed against.
    pub fn export_report(&self, path: &Path) -> anyhow::Result<()> {
        let report = self.report.context("no report to export")?;
        let payload = ReportExport {
            capacity: self.capacity,
            report,
        };
        let json = serde_json::to_string_pretty(&payload).context("serializing report")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ReportExport {
    capacity: CapacityConfig,
    report: OccupancyReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{HEIGHT_COLUMN, STATUS_COLUMN};
    use rust_xlsxwriter::Workbook;

    fn sheet(rows: &[(&str, &str)]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(0, 0, HEIGHT_COLUMN).unwrap();
        ws.write_string(0, 1, STATUS_COLUMN).unwrap();
        for (i, (height, status)) in rows.iter().enumerate() {
            let row = (i + 1) as u32;
            ws.write_string(row, 0, *height).unwrap();
            ws.write_string(row, 1, *status).unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn ingest_builds_a_report_and_capacity_edits_refresh_it() {
        let mut state = AppState::default();
        state.ingest_bytes(
            "stock.xlsx",
            &sheet(&[("0.75", "Armazenado"), ("1,50", "Fora do Armazém")]),
        );

        let report = state.report.expect("report after ingest");
        assert_eq!(report.stored_total, 1);
        assert_eq!(report.outside_total, 1);
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.source_name.as_deref(), Some("stock.xlsx"));

        state.capacity.height_075 = 1;
        state.recompute();
        assert_eq!(state.report.unwrap().balance_075, 0);
    }

    #[test]
    fn unrecognized_only_file_raises_the_warning() {
        let mut state = AppState::default();
        state.ingest_bytes("transit.xlsx", &sheet(&[("0.75", "Em Trânsito")]));

        assert!(state.no_recognized_rows);
        assert!(state.report.is_none());
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn load_failure_sets_the_status_message() {
        let mut state = AppState::default();
        state.ingest_bytes("broken.xlsx", b"not a workbook");

        assert!(state.table.is_none());
        let msg = state.status_message.expect("error message");
        assert!(msg.starts_with("Error:"));
    }

    #[test]
    fn export_writes_the_json_payload() {
        let mut state = AppState::default();
        state.ingest_bytes("stock.xlsx", &sheet(&[("0.75", "Armazenado")]));

        let path = std::env::temp_dir().join("slotboard_export_test.json");
        state.export_report(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["capacity"]["total"], 4060);
        assert_eq!(value["report"]["stored_total"], 1);
        assert_eq!(value["report"]["balance_total"], 4059);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn export_without_a_report_fails() {
        let state = AppState::default();
        let path = std::env::temp_dir().join("slotboard_export_none.json");
        assert!(state.export_report(&path).is_err());
    }
}
