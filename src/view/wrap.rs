//! Display-width aware line wrapping for mixed CJK/Latin text.
//!
//! CJK text has no spaces, so wrapping breaks between any two characters. Latin
//! words are kept together when they fit on a line.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// One wrapped line and where it starts in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    /// Char offset of the line's first character in the source text.
    pub start: usize,
    /// Line text. Break-point spaces are not included.
    pub text: String,
}

/// Break `text` into lines no wider than `width` columns.
///
/// Returns at least one line (possibly empty). A single character wider than
/// `width` is placed on its own line.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    wrap_lines(text, width)
        .into_iter()
        .map(|line| line.text)
        .collect()
}

/// Like [`wrap_text`], keeping each line's char offset into `text`.
///
/// A space dropped at a break still counts towards the next line's offset.
pub fn wrap_lines(text: &str, width: u16) -> Vec<WrappedLine> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;
    let mut start = 0;
    let mut offset = 0;

    for token in tokens(text) {
        let token_width = token.width();
        let token_chars = token.chars().count();

        if line_width + token_width <= width {
            line.push_str(token);
            line_width += token_width;
            offset += token_chars;
            continue;
        }

        if token.chars().all(char::is_whitespace) {
            // drop the break-point space
            flush(&mut lines, &mut line, start);
            line_width = 0;
            offset += token_chars;
            start = offset;
            continue;
        }

        if token_width <= width && line_width > 0 {
            flush(&mut lines, &mut line, start);
            start = offset;
            line.push_str(token);
            line_width = token_width;
            offset += token_chars;
            continue;
        }

        // token longer than a line: split by character
        for c in token.chars() {
            let w = char_width(c);
            if line_width + w > width && line_width > 0 {
                flush(&mut lines, &mut line, start);
                start = offset;
                line_width = 0;
            }
            line.push(c);
            line_width += w;
            offset += 1;
        }
    }

    if !line.is_empty() || lines.is_empty() {
        flush(&mut lines, &mut line, start);
    }
    lines
}

fn flush(lines: &mut Vec<WrappedLine>, line: &mut String, start: usize) {
    lines.push(WrappedLine {
        start,
        text: std::mem::take(line),
    });
}

/// Split into runs of ASCII word characters, single spaces, and single
/// non-ASCII characters.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let end = if first.is_ascii() && !first.is_ascii_whitespace() {
            rest.find(|c: char| !c.is_ascii() || c.is_ascii_whitespace())
                .unwrap_or(rest.len())
        } else {
            first.len_utf8()
        };
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}
