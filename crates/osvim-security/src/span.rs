//! Raw byte span of a value nested in YAML block mappings

use std::ops::Range;

/// Locate the raw text of the value at `path` (e.g. `resources`,
/// `apache_server`, `properties`, `user_data`).
///
/// Only block mappings are followed. The span starts right after the last
/// key's colon and runs to the first later line indented no deeper than that
/// key. Returns `None` when the path is not laid out as block mappings.
pub fn value_span(text: &str, path: &[&str]) -> Option<Range<usize>> {
    let mut pos = 0;
    let mut parent_indent = None;
    let mut value_start = None;

    for key in path {
        let found = find_key(text, pos, parent_indent, key)?;
        parent_indent = Some(found.indent);
        value_start = Some(found.value_start);
        pos = found.next_line;
    }

    let end = block_end(text, pos, parent_indent?);
    Some(value_start?..end)
}

struct KeyLine {
    indent: usize,
    value_start: usize,
    next_line: usize,
}

fn find_key(text: &str, from: usize, parent_indent: Option<usize>, key: &str) -> Option<KeyLine> {
    let mut child_indent = None;
    let mut pos = from;

    while pos < text.len() {
        let (line, next_line) = line_at(text, pos);
        let content = line.trim_start_matches(' ');
        let indent = line.len() - content.len();

        if is_blank(content) || (parent_indent.is_none() && is_directive(content)) {
            pos = next_line;
            continue;
        }
        if parent_indent.is_some_and(|parent| indent <= parent) {
            return None;
        }

        if indent == *child_indent.get_or_insert(indent)
            && let Some(rest) = strip_key(content, key)
        {
            return Some(KeyLine {
                indent,
                value_start: pos + line.len() - rest.len(),
                next_line,
            });
        }
        pos = next_line;
    }

    None
}

fn block_end(text: &str, from: usize, key_indent: usize) -> usize {
    let mut pos = from;

    while pos < text.len() {
        let (line, next_line) = line_at(text, pos);
        let content = line.trim_start_matches(' ');
        let indent = line.len() - content.len();

        if !content.trim_end_matches('\r').is_empty() && indent <= key_indent {
            return pos;
        }
        pos = next_line;
    }

    text.len()
}

/// Line starting at `pos` (without its `\n`) and the start of the next line
fn line_at(text: &str, pos: usize) -> (&str, usize) {
    match text[pos..].find('\n') {
        Some(len) => (&text[pos..pos + len], pos + len + 1),
        None => (&text[pos..], text.len()),
    }
}

fn is_blank(content: &str) -> bool {
    let content = content.trim_end_matches('\r');
    content.is_empty() || content.starts_with('#')
}

fn is_directive(content: &str) -> bool {
    content.starts_with("---") || content.starts_with("...") || content.starts_with('%')
}

/// Text after `key:` when the line declares `key` (plain or quoted)
fn strip_key<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    let rest = content
        .strip_prefix(key)
        .or_else(|| quoted_key(content, key, '"'))
        .or_else(|| quoted_key(content, key, '\''))?;
    let rest = rest.strip_prefix(':')?;

    match rest.chars().next() {
        None | Some(' ' | '\t' | '\r') => Some(rest),
        _ => None,
    }
}

fn quoted_key<'a>(content: &'a str, key: &str, quote: char) -> Option<&'a str> {
    content
        .strip_prefix(quote)?
        .strip_prefix(key)?
        .strip_prefix(quote)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: [&str; 4] = ["resources", "apache_server", "properties", "user_data"];

    #[test]
    fn test_block_scalar_span() {
        let text = "resources:\n  apache_server:\n    properties:\n      user_data: |\n        password:abc\n      name: web\n";
        let span = value_span(text, &PATH).unwrap();
        assert_eq!(&text[span], " |\n        password:abc\n");
    }

    #[test]
    fn test_inline_scalar_span() {
        let text = "resources:\n  apache_server:\n    properties:\n      user_data: \"password:abc\\n\"\n";
        let span = value_span(text, &PATH).unwrap();
        assert_eq!(&text[span], " \"password:abc\\n\"\n");
    }

    #[test]
    fn test_indented_root_and_comments() {
        let text = "\n        # stack\n        resources:\n          apache_server:\n            # server\n            properties:\n              user_data: |\n                password:abc\n";
        let span = value_span(text, &PATH).unwrap();
        assert_eq!(&text[span], " |\n                password:abc\n");
    }

    #[test]
    fn test_skips_other_resources() {
        let text = "resources:\n  other:\n    properties:\n      user_data: |\n        password:abc\n  apache_server:\n    properties:\n      user_data: |\n        password:xyz\n";
        let span = value_span(text, &PATH).unwrap();
        assert_eq!(&text[span], " |\n        password:xyz\n");
    }

    #[test]
    fn test_key_prefix_is_not_a_match() {
        let text = "resources:\n  apache_server_2:\n    properties:\n      user_data: x\n";
        assert!(value_span(text, &PATH).is_none());
    }

    #[test]
    fn test_key_outside_parent_block() {
        // `properties` belongs to the next resource, not apache_server
        let text = "resources:\n  apache_server:\n    type: OS::Nova::Server\n  other:\n    properties:\n      user_data: x\n";
        assert!(value_span(text, &PATH).is_none());
    }

    #[test]
    fn test_flow_mapping_not_followed() {
        let text = "resources:\n  apache_server: {properties: {user_data: x}}\n";
        assert!(value_span(text, &PATH).is_none());
    }

    #[test]
    fn test_quoted_key() {
        let text = "resources:\n  \"apache_server\":\n    properties:\n      'user_data': x\n";
        let span = value_span(text, &PATH).unwrap();
        assert_eq!(&text[span], " x\n");
    }
}
