/// Maximum number of characters of free text shown in the document body.
pub const BODY_MAX_CHARS: usize = 500;

/// The logical document every renderer works from.
///
/// Built by [`crate::template::build_document`]; renderers only choose how
/// to lay it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentModel {
    pub title: String,
    pub artist: String,
    pub city: String,
    pub date: String,
    pub disclaimer: &'static str,
    pub body: String,
    pub tasks: Vec<TaskRow>,
}

/// One row of the production plan table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub task: String,
    pub responsible: String,
    pub time: String,
}

impl TaskRow {
    pub fn cells(&self) -> [&str; 3] {
        [&self.task, &self.responsible, &self.time]
    }
}

impl DocumentModel {
    /// `Artista: X · Ciudad: Y · Fecha: Z`
    pub fn metadata_line(&self) -> String {
        format!(
            "Artista: {} · Ciudad: {} · Fecha: {}",
            self.artist, self.city, self.date
        )
    }

    /// Body text cut to [`BODY_MAX_CHARS`] characters.
    pub fn body_excerpt(&self) -> &str {
        match self.body.char_indices().nth(BODY_MAX_CHARS) {
            Some((idx, _)) => &self.body[..idx],
            None => &self.body,
        }
    }
}
