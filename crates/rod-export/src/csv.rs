use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use rod_core::models::document::DocumentModel;
use rod_core::template::TASK_HEADER;

use crate::error::ExportError;

/// Render the task table as CSV.
///
/// Every field is quoted (embedded quotes doubled) and rows are joined with
/// `\n`, without a trailing newline.
pub fn generate_csv(doc: &DocumentModel) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(TASK_HEADER)?;
    for row in &doc.tasks {
        writer.write_record(row.cells())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))?;

    if text.ends_with('\n') {
        text.pop();
    }

    tracing::debug!(bytes = text.len(), "rendered csv");
    Ok(text)
}
