/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .xls / .xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean sheet → SlotTable
///   └──────────┘
///        │            (cache: sha256(content) → SlotTable)
///        ▼
///   ┌──────────┐
///   │  filter   │  keep recognized statuses → row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  counts + signed balances → OccupancyReport
///   └───────────┘
/// ```
pub mod aggregate;
pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
