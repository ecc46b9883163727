use crate::error::CoreError;
use crate::filename;
use crate::models::format::OutputFormat;

/// Parameters describing which document to generate.
///
/// Defaults only apply when a parameter is absent: a parameter sent with an
/// empty value stays empty, and the template builder decides how to display
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    pub doc_type: String,
    pub artist: String,
    pub city: String,
    pub date: String,
    pub extra: String,
    /// Raw `formato` value; see [`DocumentRequest::output_format`].
    pub format: String,
}

impl Default for DocumentRequest {
    fn default() -> Self {
        Self {
            doc_type: "contrato".to_string(),
            artist: "Artista".to_string(),
            city: "Ciudad".to_string(),
            date: "2025-01-01".to_string(),
            extra: String::new(),
            format: "pdf".to_string(),
        }
    }
}

impl DocumentRequest {
    /// Build a request from decoded query pairs, keyed by the Spanish
    /// parameter names (`tipo`, `artista`, `ciudad`, `fecha`, `extra`,
    /// `formato`).
    ///
    /// A key given more than once keeps every value, joined with `,`.
    /// Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        let mut seen: Vec<&'static str> = Vec::new();

        for (key, value) in pairs {
            let Some((name, field)) = request.field_mut(key.as_ref()) else {
                continue;
            };
            if seen.contains(&name) {
                field.push(',');
                field.push_str(value.as_ref());
            } else {
                *field = value.as_ref().to_string();
                seen.push(name);
            }
        }

        request
    }

    fn field_mut(&mut self, key: &str) -> Option<(&'static str, &mut String)> {
        match key {
            "tipo" => Some(("tipo", &mut self.doc_type)),
            "artista" => Some(("artista", &mut self.artist)),
            "ciudad" => Some(("ciudad", &mut self.city)),
            "fecha" => Some(("fecha", &mut self.date)),
            "extra" => Some(("extra", &mut self.extra)),
            "formato" => Some(("formato", &mut self.format)),
            _ => None,
        }
    }

    /// Parse the requested format (case-insensitive).
    pub fn output_format(&self) -> Result<OutputFormat, CoreError> {
        self.format.parse()
    }

    /// Sanitized file name without extension, built from the four
    /// identifying fields.
    pub fn filename_stem(&self) -> String {
        filename::sanitize(&format!(
            "{}_{}_{}_{}",
            self.doc_type, self.artist, self.city, self.date
        ))
    }
}
