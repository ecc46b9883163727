//! Download file name conventions.
//!
//! Pure string functions. The output is always non-empty, ASCII only and
//! safe to place inside a quoted `Content-Disposition` filename.

use unicode_normalization::UnicodeNormalization;

pub const MAX_LEN: usize = 120;
pub const FALLBACK: &str = "archivo";

/// Reduce an arbitrary label to `[A-Za-z0-9_.-]`.
///
/// Accents are removed via NFKD decomposition, whitespace runs become a
/// single `_`, and the result is capped at [`MAX_LEN`] characters.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len().min(MAX_LEN));
    let mut in_space = false;

    for c in raw.nfkd() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
                in_space = true;
            }
            continue;
        }
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            out.push(c);
            in_space = false;
        }
    }

    // Everything kept is ASCII, so byte length equals char count.
    out.truncate(MAX_LEN);

    if out.is_empty() {
        FALLBACK.to_string()
    } else {
        out
    }
}
