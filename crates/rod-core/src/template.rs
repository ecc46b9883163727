//! The fixed production template.
//!
//! All user-facing text is Spanish and lives here so every renderer emits
//! the same words.

use crate::models::document::{DocumentModel, TaskRow};
use crate::models::request::DocumentRequest;

pub const DEFAULT_TITLE: &str = "Documento";
pub const DEFAULT_ARTIST: &str = "Artista";
pub const MISSING_FIELD: &str = "-";

pub const DISCLAIMER: &str =
    "Documento operativo generado por el agente Rod. No constituye asesoría legal o fiscal.";
pub const BODY_PLACEHOLDER: &str = "Contenido personalizable vía parámetro ?extra=...";

pub const BODY_HEADING: &str = "Contenido";
pub const PLAN_HEADING: &str = "Plan base";
pub const FOOTER_PREFIX: &str = "Generado automáticamente · Rod";

pub const TASK_HEADER: [&str; 3] = ["Tarea", "Responsable", "Hora"];

/// Who is responsible for a row of the plan.
#[derive(Debug, Clone, Copy)]
enum Responsible {
    Fixed(&'static str),
    Artist,
}

const TASK_PLAN: [(&str, Responsible, &str); 3] = [
    ("Montaje sonido", Responsible::Fixed("Técnico 1"), "10:00"),
    ("Prueba sonido", Responsible::Fixed("Banda"), "12:00"),
    ("Actuación", Responsible::Artist, "20:00"),
];

/// Assemble the logical document for a request. Never fails.
pub fn build_document(request: &DocumentRequest) -> DocumentModel {
    let title = non_empty(&request.doc_type).unwrap_or(DEFAULT_TITLE).to_uppercase();
    let body = non_empty(request.extra.trim())
        .unwrap_or(BODY_PLACEHOLDER)
        .to_string();

    DocumentModel {
        title,
        artist: non_empty(&request.artist).unwrap_or(MISSING_FIELD).to_string(),
        city: non_empty(&request.city).unwrap_or(MISSING_FIELD).to_string(),
        date: non_empty(&request.date).unwrap_or(MISSING_FIELD).to_string(),
        disclaimer: DISCLAIMER,
        body,
        tasks: task_rows(&request.artist),
    }
}

/// The three plan rows, with `artist` (or [`DEFAULT_ARTIST`]) in the last one.
pub fn task_rows(artist: &str) -> Vec<TaskRow> {
    let artist = non_empty(artist).unwrap_or(DEFAULT_ARTIST);
    TASK_PLAN
        .iter()
        .map(|(task, responsible, time)| TaskRow {
            task: task.to_string(),
            responsible: match responsible {
                Responsible::Fixed(name) => name.to_string(),
                Responsible::Artist => artist.to_string(),
            },
            time: time.to_string(),
        })
        .collect()
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}
