use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::filter::{STATUS_OUTSIDE, STATUS_STORED};
use super::model::{HeightClass, SlotTable};

// ---------------------------------------------------------------------------
// Capacity configuration
// ---------------------------------------------------------------------------

/// Operator-supplied slot counts for the warehouse, entered in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// Total storage positions.
    pub total: u32,
    /// Positions in the 0.75 m racking.
    pub height_075: u32,
    /// Positions in the 1.50 m racking.
    pub height_150: u32,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            total: 4060,
            height_075: 2030,
            height_150: 2030,
        }
    }
}

impl CapacityConfig {
    /// Advisory consistency check: the per-height totals should add up to
    /// the overall total. A mismatch warns but never blocks aggregation.
    pub fn split_matches_total(&self) -> bool {
        u64::from(self.height_075) + u64::from(self.height_150) == u64::from(self.total)
    }
}

// ---------------------------------------------------------------------------
// Aggregate result
// ---------------------------------------------------------------------------

/// The derived occupancy figures. Balances are signed: a negative balance
/// means more containers are stored than the configured capacity holds
/// (over-allocation) and is surfaced as-is, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancyReport {
    pub stored_total: u32,
    pub outside_total: u32,
    pub stored_075: u32,
    pub outside_075: u32,
    pub stored_150: u32,
    pub outside_150: u32,
    pub balance_total: i64,
    pub balance_075: i64,
    pub balance_150: i64,
}

/// The cleaned table holds no row with either recognized status, so there is
/// nothing to aggregate. The dashboard shows a warning instead of charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no rows with status 'Armazenado' or 'Fora do Armazém' were found after filtering")]
pub struct NoRecognizedRows;

/// Compute the occupancy figures for a cleaned table.
///
/// Pure and deterministic: the same table and capacities always produce the
/// same report. Rows whose status is not one of the two recognized literals
/// contribute to no count.
pub fn aggregate(
    table: &SlotTable,
    capacity: &CapacityConfig,
) -> Result<OccupancyReport, NoRecognizedRows> {
    let mut stored_075 = 0u32;
    let mut stored_150 = 0u32;
    let mut outside_075 = 0u32;
    let mut outside_150 = 0u32;

    for row in &table.rows {
        let counter = match (row.status.as_str(), row.height) {
            (STATUS_STORED, HeightClass::H075) => &mut stored_075,
            (STATUS_STORED, HeightClass::H150) => &mut stored_150,
            (STATUS_OUTSIDE, HeightClass::H075) => &mut outside_075,
            (STATUS_OUTSIDE, HeightClass::H150) => &mut outside_150,
            _ => continue,
        };
        *counter += 1;
    }

    let stored_total = stored_075 + stored_150;
    let outside_total = outside_075 + outside_150;
    if stored_total == 0 && outside_total == 0 {
        return Err(NoRecognizedRows);
    }

    Ok(OccupancyReport {
        stored_total,
        outside_total,
        stored_075,
        outside_075,
        stored_150,
        outside_150,
        balance_total: i64::from(capacity.total) - i64::from(stored_total),
        balance_075: i64::from(capacity.height_075) - i64::from(stored_075),
        balance_150: i64::from(capacity.height_150) - i64::from(stored_150),
    })
}
