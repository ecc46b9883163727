//! Font selection for the PDF renderer.
//!
//! The built-in Helvetica faces only cover WinAnsi (ASCII + Latin-1), so
//! text drawn with them goes through [`winansi_text`] first. An external
//! TrueType font lifts that limit.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::error::ExportError;

#[derive(Clone, Default, PartialEq)]
pub enum FontSource {
    /// Helvetica / Helvetica-Bold, no font files needed.
    #[default]
    Builtin,
    /// TrueType font bytes. `bold` falls back to `regular` when absent.
    External {
        regular: Arc<[u8]>,
        bold: Option<Arc<[u8]>>,
    },
}

impl FontSource {
    /// Read TrueType files from disk.
    pub fn load(regular: &Path, bold: Option<&Path>) -> Result<Self, ExportError> {
        let read = |path: &Path| {
            std::fs::read(path)
                .map(Arc::<[u8]>::from)
                .map_err(|e| ExportError::Pdf(format!("cannot read font {}: {e}", path.display())))
        };

        Ok(FontSource::External {
            regular: read(regular)?,
            bold: bold.map(read).transpose()?,
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontSource::Builtin)
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::Builtin => f.write_str("Builtin"),
            FontSource::External { regular, bold } => f
                .debug_struct("External")
                .field("regular_bytes", &regular.len())
                .field("bold_bytes", &bold.as_ref().map(|b| b.len()))
                .finish(),
        }
    }
}

/// Make `text` drawable with the built-in fonts.
///
/// Characters outside WinAnsi are replaced by their accent-stripped form,
/// a close ASCII punctuation mark, or `?`, so nothing silently disappears.
pub fn winansi_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_winansi) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_winansi(c) {
            out.push(c);
            continue;
        }
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{20AC}' => out.push_str("EUR"),
            _ => {
                let base: String = c.nfkd().filter(|d| is_winansi(*d)).collect();
                if base.is_empty() {
                    out.push('?');
                } else {
                    out.push_str(&base);
                }
            }
        }
    }
    Cow::Owned(out)
}

fn is_winansi(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E | 0xA0..=0xFF) || c.is_whitespace()
}
