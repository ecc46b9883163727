use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unsupported output format: {0:?}")]
    UnsupportedFormat(String),
}
