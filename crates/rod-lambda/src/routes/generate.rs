use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use jiff::Timestamp;

use rod_core::models::request::DocumentRequest;
use rod_export::render::render_document;

use crate::error::ApiError;
use crate::state::AppState;

/// Generate a document from query parameters and return it as a download.
///
/// `formato` picks PDF (default), XLSX or CSV; anything else is a 400.
/// Parameters are taken as raw pairs so a repeated key is joined rather
/// than rejected.
pub async fn generate_document(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = DocumentRequest::from_pairs(pairs);
    let format = request.output_format()?;

    let rendered = render_document(&request, format, &state.styles, Timestamp::now())?;

    tracing::info!(
        format = %format,
        filename = %rendered.filename,
        bytes = rendered.bytes.len(),
        "document generated"
    );

    let disposition = format!("attachment; filename=\"{}\"", rendered.filename);
    Ok((
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.bytes,
    ))
}
