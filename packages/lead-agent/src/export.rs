//! CSV export of flattened rows.

use crate::error::{LeadError, Result};
use crate::types::{FlattenedRow, COLUMNS};

/// File name offered for download.
pub const CSV_FILE_NAME: &str = "leads.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Render rows as CSV with a header line.
///
/// The header is written even when `rows` is empty.
pub fn to_csv(rows: &[FlattenedRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LeadError::Export(e.into_error().into()))?;

    String::from_utf8(bytes).map_err(|e| {
        LeadError::Export(std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    })
}

/// Parse CSV produced by [`to_csv`] back into rows.
pub fn from_csv(text: &str) -> Result<Vec<FlattenedRow>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let rows = reader.deserialize().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
