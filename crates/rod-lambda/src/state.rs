use std::path::Path;
use std::sync::Arc;

use rod_export::fonts::FontSource;
use rod_export::styles::DocumentStyles;

/// Read-only configuration shared by all handlers via Axum state.
#[derive(Clone, Default)]
pub struct AppState {
    pub styles: Arc<DocumentStyles>,
}

impl AppState {
    /// Load from the environment.
    ///
    /// `ROD_PDF_STYLES` may hold a JSON object overriding any subset of the
    /// PDF layout; unset means built-in defaults. `ROD_PDF_FONT` (and
    /// optionally `ROD_PDF_BOLD_FONT`) point at TrueType files used instead
    /// of the built-in Helvetica.
    pub fn from_env() -> eyre::Result<Self> {
        let mut styles: DocumentStyles = match non_empty_var("ROD_PDF_STYLES") {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| eyre::eyre!("invalid ROD_PDF_STYLES: {e}"))?,
            None => DocumentStyles::default(),
        };

        if let Some(regular) = non_empty_var("ROD_PDF_FONT") {
            let bold = non_empty_var("ROD_PDF_BOLD_FONT");
            styles.fonts = FontSource::load(Path::new(&regular), bold.as_deref().map(Path::new))
                .map_err(|e| eyre::eyre!("invalid ROD_PDF_FONT: {e}"))?;
            tracing::info!(font = %regular, "using external PDF font");
        }

        Ok(Self {
            styles: Arc::new(styles),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
