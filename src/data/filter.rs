use super::model::SlotTable;

// ---------------------------------------------------------------------------
// Recognized-status filter
// ---------------------------------------------------------------------------

/// Status literal: the container is physically present in the warehouse.
pub const STATUS_STORED: &str = "Armazenado";
/// Status literal: tracked but not physically in the warehouse.
pub const STATUS_OUTSIDE: &str = "Fora do Armazém";

/// Whether a status participates in the occupancy figures. Everything else
/// (`Em Trânsito`, `Lost and Found`, …) is ignored by the dashboard.
/// Matching is exact and case-sensitive.
pub fn is_recognized(status: &str) -> bool {
    status == STATUS_STORED || status == STATUS_OUTSIDE
}

/// Indices of the rows whose status is one of the two recognized literals.
/// This is the working set for both the aggregate figures and the detail
/// table.
pub fn recognized_indices(table: &SlotTable) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| is_recognized(&row.status))
        .map(|(i, _)| i)
        .collect()
}
