use rust_xlsxwriter::{Format, Workbook};

use rod_core::models::document::DocumentModel;
use rod_core::template::TASK_HEADER;

use crate::error::ExportError;

pub const SHEET_NAME: &str = "Producción";

/// Display widths (in characters) for the Tarea, Responsable and Hora columns.
pub const COLUMN_WIDTHS: [f64; 3] = [32.0, 28.0, 12.0];

/// Render the task table as a single-sheet workbook.
///
/// Bold header row with an autofilter over it, then the plan rows in the
/// same order as the CSV output. All cells are strings.
pub fn generate_xlsx(doc: &DocumentModel) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (header, width)) in TASK_HEADER.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, width)?;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
    }

    for (idx, row) in doc.tasks.iter().enumerate() {
        let excel_row = (idx + 1) as u32;
        for (col, cell) in row.cells().into_iter().enumerate() {
            worksheet.write_string(excel_row, col as u16, cell)?;
        }
    }

    let last_col = (TASK_HEADER.len() - 1) as u16;
    worksheet.autofilter(0, 0, 0, last_col)?;

    let bytes = workbook.save_to_buffer()?;
    tracing::debug!(bytes = bytes.len(), "rendered xlsx");
    Ok(bytes)
}
