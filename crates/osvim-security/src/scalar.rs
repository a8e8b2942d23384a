//! Raw YAML scalar text split into the pieces that produce its parsed value
//!
//! Lets a position in the parsed string be traced back to the bytes of the
//! template that encode it, for literal, folded, plain and quoted scalars.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Byte range in the raw text
    pub range: Range<usize>,
    pub kind: UnitKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Encodes exactly this character (a literal char or an escape sequence)
    Char(char),
    /// A raw line break; parses to `\n`, to a folding space, or to nothing
    Break,
    /// Encodes nothing (line continuation, invalid escape)
    Skip,
}

impl Unit {
    fn new(range: Range<usize>, kind: UnitKind) -> Self {
        Self { range, kind }
    }

    pub fn produces(&self, c: char) -> bool {
        match self.kind {
            UnitKind::Char(own) => own == c,
            UnitKind::Break => c == '\n' || c == ' ',
            UnitKind::Skip => false,
        }
    }

    /// Whether the bytes can be overwritten without changing the structure
    pub fn is_maskable(&self) -> bool {
        matches!(self.kind, UnitKind::Char(_))
    }
}

/// Split the raw value text that follows a `key:` into units
pub fn units(raw: &str) -> Vec<Unit> {
    let start = skip_properties(raw);

    match raw[start..].chars().next() {
        Some('|' | '>') => {
            // Header line (indicators, trailing comment) carries no content
            let body = raw[start..].find('\n').map_or(raw.len(), |i| start + i + 1);
            plain_units(raw, body)
        }
        Some('"') => double_quoted_units(raw, start + 1),
        Some('\'') => single_quoted_units(raw, start + 1),
        _ => plain_units(raw, start),
    }
}

/// Skip leading whitespace, anchors (`&a`) and tags (`!!str`)
fn skip_properties(raw: &str) -> usize {
    let mut pos = 0;

    loop {
        pos += raw[pos..].len() - raw[pos..].trim_start_matches([' ', '\t']).len();
        if !raw[pos..].starts_with(['&', '!']) {
            return pos;
        }
        pos += raw[pos..]
            .find(char::is_whitespace)
            .unwrap_or(raw.len() - pos);
    }
}

fn plain_units(raw: &str, start: usize) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut chars = raw[start..].char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let at = start + offset;
        match c {
            '\r' if chars.peek().is_some_and(|&(_, next)| next == '\n') => {
                chars.next();
                units.push(Unit::new(at..at + 2, UnitKind::Break));
            }
            '\r' | '\n' => units.push(Unit::new(at..at + 1, UnitKind::Break)),
            _ => units.push(Unit::new(at..at + c.len_utf8(), UnitKind::Char(c))),
        }
    }

    units
}

fn single_quoted_units(raw: &str, start: usize) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut chars = raw[start..].char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let at = start + offset;
        match c {
            '\'' if chars.peek().is_some_and(|&(_, next)| next == '\'') => {
                chars.next();
                units.push(Unit::new(at..at + 2, UnitKind::Char('\'')));
            }
            '\'' => break,
            '\r' | '\n' => units.push(Unit::new(at..at + 1, UnitKind::Break)),
            _ => units.push(Unit::new(at..at + c.len_utf8(), UnitKind::Char(c))),
        }
    }

    units
}

fn double_quoted_units(raw: &str, start: usize) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut pos = start;

    while let Some(c) = raw[pos..].chars().next() {
        match c {
            '"' => break,
            '\\' => {
                let (len, kind) = escape(&raw[pos + 1..]);
                units.push(Unit::new(pos..pos + 1 + len, kind));
                pos += 1 + len;
            }
            '\r' | '\n' => {
                units.push(Unit::new(pos..pos + 1, UnitKind::Break));
                pos += 1;
            }
            _ => {
                units.push(Unit::new(pos..pos + c.len_utf8(), UnitKind::Char(c)));
                pos += c.len_utf8();
            }
        }
    }

    units
}

/// Decode the escape following a backslash: (bytes consumed, unit kind)
fn escape(rest: &str) -> (usize, UnitKind) {
    let Some(c) = rest.chars().next() else {
        return (0, UnitKind::Skip);
    };

    let decoded = match c {
        '0' => '\0',
        'a' => '\x07',
        'b' => '\x08',
        't' | '\t' => '\t',
        'n' => '\n',
        'v' => '\x0b',
        'f' => '\x0c',
        'r' => '\r',
        'e' => '\x1b',
        ' ' => ' ',
        '"' => '"',
        '/' => '/',
        '\\' => '\\',
        'N' => '\u{85}',
        '_' => '\u{a0}',
        'L' => '\u{2028}',
        'P' => '\u{2029}',
        'x' => return hex_escape(rest, 2),
        'u' => return hex_escape(rest, 4),
        'U' => return hex_escape(rest, 8),
        '\r' if rest[1..].starts_with('\n') => return (2, UnitKind::Skip),
        '\r' | '\n' => return (1, UnitKind::Skip),
        _ => return (c.len_utf8(), UnitKind::Skip),
    };

    (1, UnitKind::Char(decoded))
}

fn hex_escape(rest: &str, digits: usize) -> (usize, UnitKind) {
    let decoded = rest
        .get(1..1 + digits)
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .and_then(char::from_u32);

    match decoded {
        Some(c) => (1 + digits, UnitKind::Char(c)),
        None => (1, UnitKind::Skip),
    }
}
