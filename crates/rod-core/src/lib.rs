//! rod-core
//!
//! Pure domain types for the document generator: the request, the output
//! formats, filename sanitising and the fixed production template.
//! No I/O and no rendering libraries live here.

pub mod error;
pub mod filename;
pub mod models;
pub mod template;
