use jiff::Timestamp;

use rod_core::models::format::OutputFormat;
use rod_core::models::request::DocumentRequest;
use rod_core::template::build_document;

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// A finished file, ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Build the document for `request` and serialize it as `format`.
///
/// Either the whole file is produced or an error is returned; there is no
/// partial output.
pub fn render_document(
    request: &DocumentRequest,
    format: OutputFormat,
    styles: &DocumentStyles,
    generated_at: Timestamp,
) -> Result<RenderedDocument, ExportError> {
    let doc = build_document(request);

    let bytes = match format {
        OutputFormat::Pdf => crate::pdf::generate_pdf(&doc, styles, generated_at)?,
        OutputFormat::Xlsx => crate::xlsx::generate_xlsx(&doc)?,
        OutputFormat::Csv => crate::csv::generate_csv(&doc)?.into_bytes(),
    };

    Ok(RenderedDocument {
        bytes,
        content_type: format.content_type(),
        filename: format!("{}.{}", request.filename_stem(), format.extension()),
    })
}
