use std::io::{Read, Write};
use std::path::Path;

use sheetsync_core::ProductRecord;

use crate::error::ExportError;

/// Writes the bulk-import CSV to `path`, creating parent directories.
///
/// Every field is quoted, including empty ones. Returns the number of records
/// written.
///
/// # Errors
///
/// Returns [`ExportError`] if the directory or file cannot be created or a
/// record cannot be serialized.
pub fn write_products_csv(records: &[ProductRecord], path: &Path) -> Result<usize, ExportError> {
    let shown = path.display().to_string();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.display().to_string(),
            source,
        })?;
    }

    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: shown.clone(),
        source,
    })?;
    write_products(records, file).map_err(|source| ExportError::Csv {
        path: shown.clone(),
        source,
    })?;

    tracing::info!(path = %shown, records = records.len(), "wrote product CSV");
    Ok(records.len())
}

/// Serializes records with a header row to any writer.
///
/// # Errors
///
/// Returns a `csv::Error` if serialization or the underlying write fails.
pub fn write_products<W: Write>(records: &[ProductRecord], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Reads a previously exported product CSV.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be opened or a row is malformed.
pub fn read_products_csv(path: &Path) -> Result<Vec<ProductRecord>, ExportError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|source| ExportError::Io {
        path: display.clone(),
        source,
    })?;
    read_products(file).map_err(|source| ExportError::Csv {
        path: display,
        source,
    })
}

/// Reads product records from any reader whose first line is the header.
///
/// # Errors
///
/// Returns a `csv::Error` if a row cannot be parsed.
pub fn read_products<R: Read>(reader: R) -> Result<Vec<ProductRecord>, csv::Error> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader)
        .deserialize()
        .collect()
}
