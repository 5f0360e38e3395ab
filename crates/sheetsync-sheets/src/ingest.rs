use std::path::Path;

use sheetsync_core::PriceRow;

use crate::error::SheetsError;

/// Maps a grid whose first row is the header onto [`PriceRow`]s.
///
/// Missing trailing cells read as empty. Columns beyond the header are
/// ignored, as are rows where every cell is blank. Each row remembers its
/// position in the grid, counting the header as row 1.
///
/// # Errors
///
/// Returns [`SheetsError::Row`] if a row cannot be mapped onto the schema.
pub fn rows_from_grid(grid: &[Vec<String>]) -> Result<Vec<PriceRow>, SheetsError> {
    let Some((header, data)) = grid.split_first() else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::with_capacity(data.len());
    for (index, cells) in data.iter().enumerate() {
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let object: serde_json::Map<String, serde_json::Value> = header
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.trim().is_empty())
            .map(|(col, name)| {
                let value = cells.get(col).cloned().unwrap_or_default();
                (name.trim().to_string(), serde_json::Value::String(value))
            })
            .collect();

        let sheet_row = index + 2;
        let mut row: PriceRow = serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|source| SheetsError::Row {
                row: sheet_row,
                source,
            })?;
        row.sheet_row = Some(sheet_row);
        rows.push(row);
    }
    Ok(rows)
}

/// Reads a local CSV export of the price sheet.
///
/// # Errors
///
/// Returns [`SheetsError::Csv`] if the file cannot be opened or a row is
/// malformed.
pub fn read_price_csv(path: &Path) -> Result<Vec<PriceRow>, SheetsError> {
    let to_error = |source| SheetsError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(to_error)?;

    let headers = reader.headers().map_err(to_error)?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(to_error)?;
        let mut row: PriceRow = record.deserialize(Some(&headers)).map_err(to_error)?;
        row.sheet_row = record
            .position()
            .and_then(|pos| usize::try_from(pos.line()).ok());
        rows.push(row);
    }

    tracing::info!(path = %path.display(), rows = rows.len(), "loaded price rows from CSV");
    Ok(rows)
}
