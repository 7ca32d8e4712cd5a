//! Parsing of keystroke lines read from stdin
//!
//! Each line is the full current text of an input. Lines starting with
//! `:kind ` or `:status ` set those filter fields; anything else is the
//! search term.

use search::FilterField;

/// Map one stdin line to the filter input it belongs to
pub fn parse_filter_line(line: &str) -> (FilterField, String) {
    if let Some(value) = directive(line, ":kind") {
        return (FilterField::Kind, value);
    }
    if let Some(value) = directive(line, ":status") {
        return (FilterField::Status, value);
    }
    (FilterField::Term, line.to_string())
}

fn directive(line: &str, name: &str) -> Option<String> {
    let rest = line.strip_prefix(name)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim().to_string())
    } else {
        None
    }
}
