use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use thiserror::Error;

use super::model::{CellValue, HeightClass, SlotRecord, SlotTable};

/// Column holding the slot height, in meters.
pub const HEIGHT_COLUMN: &str = "Altura";
/// Column holding the container status literal.
pub const STATUS_COLUMN: &str = "Estado Contentor";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A failed load. Every variant is terminal for the request: nothing is
/// rendered downstream and the message is shown to the operator as-is.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read the spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    #[error("the workbook contains no sheets")]
    NoSheets,

    #[error("the file is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("the file loaded, but no row has a valid height (0.75 or 1.50) after cleaning")]
    NoValidData,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse and clean an uploaded occupancy workbook (`.xls` or `.xlsx`).
///
/// Only the first sheet is read. Cleaning steps, in order:
/// 1. drop columns with a placeholder header (blank or `Unnamed:`-prefixed)
/// 2. trim whitespace from the remaining column names
/// 3. require [`HEIGHT_COLUMN`] and [`STATUS_COLUMN`] to be present
/// 4. strip wrapping quotes/spaces from status values
/// 5. normalize heights (wrapping quotes, decimal comma) and coerce to a
///    [`HeightClass`], silently dropping rows that fail
pub fn load_slots(bytes: &[u8]) -> Result<SlotTable, LoadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoadError::NoSheets)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter.next().unwrap_or(&[]);

    // Kept columns: (index in the sheet, trimmed name).
    let kept: Vec<(usize, String)> = header_row
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| {
            let name = header_cell_name(cell);
            if placeholder_header(&name) {
                None
            } else {
                Some((idx, name.trim().to_string()))
            }
        })
        .collect();

    let columns: Vec<String> = kept.iter().map(|(_, name)| name.clone()).collect();

    let (height_idx, status_idx) = match (
        columns.iter().position(|c| c == HEIGHT_COLUMN),
        columns.iter().position(|c| c == STATUS_COLUMN),
    ) {
        (Some(height), Some(status)) => (height, status),
        (height, status) => {
            let mut missing = Vec::new();
            if height.is_none() {
                missing.push(HEIGHT_COLUMN.to_string());
            }
            if status.is_none() {
                missing.push(STATUS_COLUMN.to_string());
            }
            return Err(LoadError::MissingColumns(missing));
        }
    };
    let height_src = kept[height_idx].0;
    let status_src = kept[status_idx].0;

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for row in rows_iter {
        let Some(height) = row
            .get(height_src)
            .and_then(coerce_height)
            .and_then(HeightClass::from_value)
        else {
            dropped += 1;
            continue;
        };

        let status = row
            .get(status_src)
            .map(status_text)
            .unwrap_or_default();

        let cells: Vec<CellValue> = kept
            .iter()
            .map(|&(src, _)| {
                if src == height_src {
                    CellValue::Float(height.meters())
                } else if src == status_src {
                    CellValue::String(status.clone())
                } else {
                    row.get(src).map(cell_value).unwrap_or(CellValue::Empty)
                }
            })
            .collect();

        rows.push(SlotRecord {
            height,
            status,
            cells,
        });
    }

    if dropped > 0 {
        log::debug!("dropped {dropped} row(s) without a valid height");
    }

    if rows.is_empty() {
        return Err(LoadError::NoValidData);
    }

    Ok(SlotTable {
        columns,
        height_idx,
        status_idx,
        rows,
    })
}

// ---------------------------------------------------------------------------
// Cleaning helpers
// ---------------------------------------------------------------------------

/// Strip wrapping double/single quotes and whitespace from a raw cell value.
pub fn strip_wrapping(s: &str) -> &str {
    s.trim().trim_matches(['"', '\'', ' ']).trim()
}

/// Parse a raw height string: wrapping quotes stripped, decimal comma
/// normalized to a decimal point. `None` when the result is not a number.
pub fn parse_height(raw: &str) -> Option<f64> {
    strip_wrapping(raw).replace(',', ".").parse::<f64>().ok()
}

/// Whether a trimmed header name is a "no header" placeholder. Exporters
/// commonly emit `Unnamed: N` for columns without a title.
pub fn placeholder_header(name: &str) -> bool {
    let name = name.trim();
    name.is_empty() || name.starts_with("Unnamed:")
}

fn header_cell_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Numeric coercion of the height cell. Numeric cells pass through; text
/// cells go through [`parse_height`]; everything else fails.
fn coerce_height(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_height(s),
        _ => None,
    }
}

fn status_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => strip_wrapping(s).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{Workbook, Worksheet};

    fn sheet_bytes(build: impl FnOnce(&mut Worksheet)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        build(sheet);
        workbook.save_to_buffer().unwrap()
    }

    fn occupancy_sheet(rows: &[(&str, &str)]) -> Vec<u8> {
        sheet_bytes(|sheet| {
            sheet.write_string(0, 0, HEIGHT_COLUMN).unwrap();
            sheet.write_string(0, 1, STATUS_COLUMN).unwrap();
            for (i, (height, status)) in rows.iter().enumerate() {
                let row = (i + 1) as u32;
                sheet.write_string(row, 0, *height).unwrap();
                sheet.write_string(row, 1, *status).unwrap();
            }
        })
    }

    #[test]
    fn loads_and_cleans_a_typical_file() {
        let bytes = sheet_bytes(|sheet| {
            sheet.write_string(0, 0, "  Altura ").unwrap();
            sheet.write_string(0, 1, "Estado Contentor").unwrap();
            sheet.write_string(0, 2, "Posição").unwrap();
            // Quoted text height with decimal comma.
            sheet.write_string(1, 0, "\"0,75\"").unwrap();
            sheet.write_string(1, 1, " \"Armazenado\" ").unwrap();
            sheet.write_string(1, 2, "A-01").unwrap();
            // Native numeric height.
            sheet.write_number(2, 0, 1.5).unwrap();
            sheet.write_string(2, 1, "Fora do Armazém").unwrap();
            sheet.write_string(2, 2, "B-07").unwrap();
            // Unparseable height: dropped silently.
            sheet.write_string(3, 0, "n/a").unwrap();
            sheet.write_string(3, 1, "Armazenado").unwrap();
        });

        let table = load_slots(&bytes).unwrap();
        assert_eq!(table.columns, vec!["Altura", "Estado Contentor", "Posição"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].height, HeightClass::H075);
        assert_eq!(table.rows[0].status, "Armazenado");
        assert_eq!(table.rows[1].height, HeightClass::H150);
        assert_eq!(table.rows[1].status, "Fora do Armazém");
        // The cleaned values are what the detail view shows.
        assert_eq!(table.rows[0].cells[0], CellValue::Float(0.75));
        assert_eq!(
            table.rows[0].cells[1],
            CellValue::String("Armazenado".into())
        );
    }

    #[test]
    fn missing_status_column_is_named() {
        let bytes = sheet_bytes(|sheet| {
            sheet.write_string(0, 0, HEIGHT_COLUMN).unwrap();
            sheet.write_string(0, 1, "Estado").unwrap();
            sheet.write_string(1, 0, "0.75").unwrap();
        });

        match load_slots(&bytes) {
            Err(LoadError::MissingColumns(cols)) => {
                assert_eq!(cols, vec![STATUS_COLUMN.to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn missing_both_columns_names_both() {
        let bytes = sheet_bytes(|sheet| {
            sheet.write_string(0, 0, "Corredor").unwrap();
            sheet.write_string(1, 0, "X").unwrap();
        });

        match load_slots(&bytes) {
            Err(LoadError::MissingColumns(cols)) => {
                assert_eq!(
                    cols,
                    vec![HEIGHT_COLUMN.to_string(), STATUS_COLUMN.to_string()]
                );
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn placeholder_columns_are_dropped() {
        let bytes = sheet_bytes(|sheet| {
            sheet.write_string(0, 0, HEIGHT_COLUMN).unwrap();
            sheet.write_string(0, 1, "Unnamed: 1").unwrap();
            sheet.write_string(0, 2, STATUS_COLUMN).unwrap();
            // Column 3 header left blank on purpose.
            sheet.write_string(1, 0, "0.75").unwrap();
            sheet.write_string(1, 1, "noise").unwrap();
            sheet.write_string(1, 2, "Armazenado").unwrap();
            sheet.write_string(1, 3, "more noise").unwrap();
        });

        let table = load_slots(&bytes).unwrap();
        assert_eq!(table.columns, vec![HEIGHT_COLUMN, STATUS_COLUMN]);
        assert_eq!(table.rows[0].cells.len(), 2);
    }

    #[test]
    fn quoted_comma_decimal_height_is_retained() {
        let bytes = occupancy_sheet(&[("\"1,50\"", "Armazenado")]);
        let table = load_slots(&bytes).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].height, HeightClass::H150);
    }

    #[test]
    fn only_the_two_rack_heights_survive() {
        let bytes = occupancy_sheet(&[
            ("0.75", "Armazenado"),
            ("0.76", "Armazenado"),
            ("1,49", "Armazenado"),
            ("1.50", "Armazenado"),
            ("2", "Armazenado"),
            ("", "Armazenado"),
        ]);

        let table = load_slots(&bytes).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table
            .rows
            .iter()
            .all(|r| matches!(r.height, HeightClass::H075 | HeightClass::H150)));
    }

    #[test]
    fn all_rows_invalid_is_no_valid_data() {
        let bytes = occupancy_sheet(&[("n/a", "Armazenado"), ("2.00", "Armazenado")]);
        assert!(matches!(load_slots(&bytes), Err(LoadError::NoValidData)));
    }

    #[test]
    fn empty_sheet_reports_missing_columns() {
        let bytes = sheet_bytes(|_| {});
        assert!(matches!(
            load_slots(&bytes),
            Err(LoadError::MissingColumns(_))
        ));
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        assert!(matches!(
            load_slots(b"definitely not a workbook"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn strip_wrapping_removes_quotes_and_spaces() {
        assert_eq!(strip_wrapping("  \"Armazenado\"  "), "Armazenado");
        assert_eq!(strip_wrapping("'Fora do Armazém'"), "Fora do Armazém");
        assert_eq!(strip_wrapping("\" 0,75 \""), "0,75");
        assert_eq!(strip_wrapping("plain"), "plain");
    }

    #[test]
    fn parse_height_handles_locale_commas() {
        assert_eq!(parse_height("0,75"), Some(0.75));
        assert_eq!(parse_height("\"1,50\""), Some(1.5));
        assert_eq!(parse_height(" 1.50 "), Some(1.5));
        assert_eq!(parse_height("abc"), None);
        assert_eq!(parse_height(""), None);
    }

    #[test]
    fn placeholder_headers_are_recognized() {
        assert!(placeholder_header(""));
        assert!(placeholder_header("   "));
        assert!(placeholder_header("Unnamed: 3"));
        assert!(!placeholder_header("Altura"));
    }
}
