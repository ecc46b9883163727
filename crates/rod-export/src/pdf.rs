//! Direct-draw PDF renderer.
//!
//! Lays the document out top-down with absolute coordinates on A4 pages.
//! Every text element is word-wrapped to its box; nothing is truncated
//! except the body, which is capped upstream. Content that does not fit on
//! a page continues on the next one, repeating the table header.

use std::borrow::Cow;
use std::io::BufWriter;
use std::ops::Range;

use jiff::{Timestamp, Unit};
use printpdf::path::PaintMode;
use printpdf::*;

use rod_core::models::document::{DocumentModel, TaskRow};
use rod_core::template::{BODY_HEADING, FOOTER_PREFIX, PLAN_HEADING, TASK_HEADER};

use crate::error::ExportError;
use crate::fonts::{winansi_text, FontSource};
use crate::styles::DocumentStyles;

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.45;

/// Average Helvetica glyph width relative to the font size.
const AVG_CHAR_WIDTH: f32 = 0.52;

/// Horizontal padding of the disclaimer box and table cells.
const PADDING_MM: f32 = 3.0;

/// Vertical padding inside table cells.
const CELL_PADDING_MM: f32 = 1.5;

const INK: (u8, u8, u8) = (0x11, 0x18, 0x27);
const HEADING_INK: (u8, u8, u8) = (0x37, 0x41, 0x51);
const MUTED_INK: (u8, u8, u8) = (0x6B, 0x72, 0x80);
const BORDER: (u8, u8, u8) = (0xE5, 0xE7, 0xEB);
const HEADER_FILL: (u8, u8, u8) = (0xF3, 0xF4, 0xF6);

/// Render the document as a PDF.
///
/// `generated_at` is printed in the footer of the last page.
pub fn generate_pdf(
    doc: &DocumentModel,
    styles: &DocumentStyles,
    generated_at: Timestamp,
) -> Result<Vec<u8>, ExportError> {
    let mut page = PageWriter::new(&format!("{} - {}", doc.title, doc.artist), styles)?;

    page.paragraph(&doc.title, Face::Bold, styles.title_size, INK);
    page.space(1.0);
    page.paragraph(&doc.metadata_line(), Face::Regular, styles.body_size, MUTED_INK);
    page.space(3.0);
    page.boxed_paragraph(doc.disclaimer);
    page.space(4.0);

    page.paragraph(BODY_HEADING, Face::Bold, styles.heading_size, HEADING_INK);
    page.space(1.0);
    page.paragraph(doc.body_excerpt(), Face::Regular, styles.body_size, INK);
    page.space(4.0);

    page.paragraph(PLAN_HEADING, Face::Bold, styles.heading_size, HEADING_INK);
    page.space(1.0);
    page.table(&doc.tasks);

    let generated_at = generated_at.round(Unit::Second).unwrap_or(generated_at);
    page.footer(&format!("{FOOTER_PREFIX} · {generated_at}"));

    let pages = page.pages;
    let bytes = page.finish()?;
    tracing::debug!(bytes = bytes.len(), pages, "rendered pdf");
    Ok(bytes)
}

#[derive(Clone, Copy)]
enum Face {
    Regular,
    Bold,
}

/// Page writer with a top-down cursor.
struct PageWriter<'a> {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    styles: &'a DocumentStyles,
    /// Top of the next element, measured from the bottom edge.
    cursor_mm: f32,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn new(title: &str, styles: &'a DocumentStyles) -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(styles.page_width_mm),
            Mm(styles.page_height_mm),
            "Layer 1",
        );

        let (regular, bold) = match &styles.fonts {
            FontSource::Builtin => {
                let regular = doc
                    .add_builtin_font(BuiltinFont::Helvetica)
                    .map_err(|e| ExportError::Pdf(format!("failed to add regular font: {e}")))?;
                let bold = doc
                    .add_builtin_font(BuiltinFont::HelveticaBold)
                    .map_err(|e| ExportError::Pdf(format!("failed to add bold font: {e}")))?;
                (regular, bold)
            }
            FontSource::External { regular, bold } => {
                let regular = doc
                    .add_external_font(&regular[..])
                    .map_err(|e| ExportError::Pdf(format!("failed to embed regular font: {e}")))?;
                let bold = match bold {
                    Some(bytes) => doc
                        .add_external_font(&bytes[..])
                        .map_err(|e| ExportError::Pdf(format!("failed to embed bold font: {e}")))?,
                    None => regular.clone(),
                };
                (regular, bold)
            }
        };

        let layer = doc.get_page(page).get_layer(layer);
        let writer = Self {
            doc,
            layer,
            regular,
            bold,
            styles,
            cursor_mm: styles.page_height_mm - styles.margin_top_mm,
            pages: 1,
        };
        writer.init_layer();
        Ok(writer)
    }

    fn init_layer(&self) {
        self.layer.set_outline_color(color(BORDER));
        self.layer.set_outline_thickness(0.75);
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(
            Mm(self.styles.page_width_mm),
            Mm(self.styles.page_height_mm),
            "Layer 1",
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.init_layer();
        self.cursor_mm = self.styles.page_height_mm - self.styles.margin_top_mm;
        self.pages += 1;
        tracing::debug!(page = self.pages, "pdf page break");
    }

    /// Lowest y content may reach; the footer lives below it.
    fn floor_mm(&self) -> f32 {
        self.styles.margin_bottom_mm + pt_to_mm(self.styles.footer_size) * LINE_HEIGHT + 2.0
    }

    fn page_top_mm(&self) -> f32 {
        self.styles.page_height_mm - self.styles.margin_top_mm
    }

    fn ensure_space(&mut self, needed_mm: f32) {
        let at_top = self.cursor_mm >= self.page_top_mm();
        if !at_top && self.cursor_mm - needed_mm < self.floor_mm() {
            self.new_page();
        }
    }

    fn font(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
        }
    }

    /// Text as it can be drawn with the active fonts.
    fn drawable<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.styles.fonts.is_builtin() {
            winansi_text(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    fn space(&mut self, mm: f32) {
        self.cursor_mm -= mm;
    }

    /// Word-wrapped text spanning the content width.
    fn paragraph(&mut self, text: &str, face: Face, size_pt: f32, ink: (u8, u8, u8)) {
        let size_mm = pt_to_mm(size_pt);
        let line_mm = size_mm * LINE_HEIGHT;
        let max_chars = chars_per_line(self.styles.content_width_mm(), size_pt);
        let lines = wrap_text(&self.drawable(text), max_chars);

        for line in lines {
            self.ensure_space(line_mm);
            self.layer.set_fill_color(color(ink));
            self.layer.use_text(
                line,
                size_pt,
                Mm(self.styles.margin_left_mm),
                Mm(self.cursor_mm - size_mm),
                self.font(face),
            );
            self.cursor_mm -= line_mm;
        }
    }

    /// Paragraph inside a bordered box spanning the content width.
    fn boxed_paragraph(&mut self, text: &str) {
        let size_pt = self.styles.body_size;
        let line_mm = pt_to_mm(size_pt) * LINE_HEIGHT;
        let width = self.styles.content_width_mm();
        let lines = wrap_text(
            &self.drawable(text),
            chars_per_line(width - 2.0 * PADDING_MM, size_pt),
        );

        let height = 2.0 * PADDING_MM + line_mm * lines.len() as f32;
        self.ensure_space(height);

        let left = self.styles.margin_left_mm;
        let top = self.cursor_mm;
        self.layer.add_rect(
            Rect::new(Mm(left), Mm(top - height), Mm(left + width), Mm(top))
                .with_mode(PaintMode::Stroke),
        );

        let mut baseline = top - PADDING_MM;
        self.layer.set_fill_color(color(INK));
        for line in lines {
            baseline -= pt_to_mm(size_pt);
            self.layer
                .use_text(line, size_pt, Mm(left + PADDING_MM), Mm(baseline), &self.regular);
            baseline -= line_mm - pt_to_mm(size_pt);
        }

        self.cursor_mm = top - height;
    }

    /// Header row plus one row per task, every cell bordered.
    fn table(&mut self, rows: &[TaskRow]) {
        self.table_row(TASK_HEADER, true);
        for row in rows {
            self.table_row(row.cells(), false);
        }
    }

    /// One logical row. Cells wrap inside their column and the row grows to
    /// the tallest cell; a row taller than the space left is continued on
    /// the next page under a repeated header.
    fn table_row(&mut self, cells: [&str; 3], header: bool) {
        let size_pt = self.styles.table_size;
        let line_mm = pt_to_mm(size_pt) * LINE_HEIGHT;

        let columns: Vec<Vec<String>> = cells
            .into_iter()
            .zip(self.styles.column_widths_mm)
            .map(|(text, width)| {
                wrap_text(
                    &self.drawable(text),
                    chars_per_line(width - 2.0 * PADDING_MM, size_pt),
                )
            })
            .collect();
        let total = columns.iter().map(Vec::len).max().unwrap_or(1);

        let lines_fitting = |space_mm: f32| {
            ((space_mm - 2.0 * CELL_PADDING_MM) / line_mm).max(0.0) as usize
        };
        let fresh_page = lines_fitting(self.page_top_mm() - self.floor_mm()).max(1);

        let mut start = 0;
        while start < total {
            let remaining = total - start;
            let here = lines_fitting(self.cursor_mm - self.floor_mm());
            let at_top = self.cursor_mm >= self.page_top_mm();

            // Move the whole row when it would fit on a fresh page.
            if !at_top && (here == 0 || (here < remaining && remaining <= fresh_page)) {
                self.new_page();
                if !header {
                    self.table_row(TASK_HEADER, true);
                }
                continue;
            }

            let end = start + remaining.min(here.max(1));
            self.draw_row_slice(&columns, start..end, header);
            start = end;
        }
    }

    fn draw_row_slice(&mut self, columns: &[Vec<String>], lines: Range<usize>, header: bool) {
        let size_pt = self.styles.table_size;
        let size_mm = pt_to_mm(size_pt);
        let line_mm = size_mm * LINE_HEIGHT;
        let count = lines.len();

        let row_h = self
            .styles
            .row_height_mm
            .max(count as f32 * line_mm + 2.0 * CELL_PADDING_MM);
        let top = self.cursor_mm;
        let bottom = top - row_h;
        // Centre the text block vertically; cap height is ~0.7 em.
        let first_baseline =
            top - (row_h - count as f32 * line_mm) / 2.0 - (line_mm + size_mm * 0.7) / 2.0;

        let (mode, face) = if header {
            (PaintMode::FillStroke, Face::Bold)
        } else {
            (PaintMode::Stroke, Face::Regular)
        };

        let mut x = self.styles.margin_left_mm;
        for (column, width) in columns.iter().zip(self.styles.column_widths_mm) {
            if header {
                self.layer.set_fill_color(color(HEADER_FILL));
            }
            self.layer
                .add_rect(Rect::new(Mm(x), Mm(bottom), Mm(x + width), Mm(top)).with_mode(mode));

            self.layer.set_fill_color(color(INK));
            let from = lines.start.min(column.len());
            let to = lines.end.min(column.len());
            for (i, line) in column[from..to].iter().enumerate() {
                self.layer.use_text(
                    line.as_str(),
                    size_pt,
                    Mm(x + PADDING_MM),
                    Mm(first_baseline - i as f32 * line_mm),
                    self.font(face),
                );
            }
            x += width;
        }

        self.cursor_mm = bottom;
    }

    fn footer(&mut self, text: &str) {
        let text = self.drawable(text).into_owned();
        self.layer.set_fill_color(color(MUTED_INK));
        self.layer.use_text(
            text,
            self.styles.footer_size,
            Mm(self.styles.margin_left_mm),
            Mm(self.styles.margin_bottom_mm),
            &self.regular,
        );
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        let mut writer = BufWriter::new(Vec::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| ExportError::Pdf(format!("failed to save PDF: {e}")))?;
        writer
            .into_inner()
            .map_err(|e| ExportError::Pdf(format!("failed to flush PDF buffer: {e}")))
    }
}

fn color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

/// How many average-width characters fit in `width_mm` at `size_pt`.
fn chars_per_line(width_mm: f32, size_pt: f32) -> usize {
    let char_mm = pt_to_mm(size_pt) * AVG_CHAR_WIDTH;
    ((width_mm / char_mm) as usize).max(1)
}

/// Greedy word wrap on character counts. Words longer than a line are split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.push(word.drain(..max_chars).collect());
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
