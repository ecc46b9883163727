//! rod-export
//!
//! CSV, XLSX and PDF renderers for the production document, plus the single
//! dispatch point that picks one by [`rod_core::models::format::OutputFormat`].

pub mod csv;
pub mod error;
pub mod fonts;
pub mod pdf;
pub mod render;
pub mod styles;
pub mod xlsx;
