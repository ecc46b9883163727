use serde::{Deserialize, Serialize};

use crate::fonts::FontSource;

/// Page layout for the PDF renderer. All lengths are millimetres, font
/// sizes are points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyles {
    pub page_width_mm: f32,
    pub page_height_mm: f32,

    pub margin_top_mm: f32,
    pub margin_right_mm: f32,
    pub margin_bottom_mm: f32,
    pub margin_left_mm: f32,

    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub table_size: f32,
    pub footer_size: f32,

    /// Widths of the Tarea, Responsable and Hora columns.
    pub column_widths_mm: [f32; 3],
    /// Minimum table row height; rows grow to fit wrapped cells.
    pub row_height_mm: f32,

    /// Loaded from files at start-up, never from JSON.
    #[serde(skip)]
    pub fonts: FontSource,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            // A4
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_top_mm: 14.0,
            margin_right_mm: 12.0,
            margin_bottom_mm: 16.0,
            margin_left_mm: 12.0,
            title_size: 18.0,
            heading_size: 13.0,
            body_size: 10.0,
            table_size: 10.0,
            footer_size: 8.0,
            column_widths_mm: [80.0, 70.0, 36.0],
            row_height_mm: 8.0,
            fonts: FontSource::Builtin,
        }
    }
}

impl DocumentStyles {
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_left_mm - self.margin_right_mm
    }
}
