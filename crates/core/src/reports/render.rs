//! CSV rendering of the journal.

use chrono::NaiveDate;
use csv::WriterBuilder;

use super::error::ReportError;
use super::export::ExportRow;

/// Byte-order mark so spreadsheet tools detect UTF-8.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Renders rows as a `;`-delimited, BOM-prefixed CSV document.
///
/// # Errors
///
/// Returns `NoDataFound` for an empty row set and `Render` if serialization fails.
pub fn render_journal_csv(rows: &[ExportRow]) -> Result<Vec<u8>, ReportError> {
    if rows.is_empty() {
        return Err(ReportError::NoDataFound);
    }

    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .from_writer(UTF8_BOM.to_vec());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ReportError::Render(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ReportError::Render(e.to_string()))
}

/// Attachment name for a journal exported on `today`.
#[must_use]
pub fn journal_csv_filename(today: NaiveDate) -> String {
    format!("journal-comptable-{}.csv", today.format("%Y-%m-%d"))
}
