//! Text presentation of views, filter controls and tool details.
//!
//! Everything here is a pure function from pipeline output to `String`; the
//! CLI decides where the text goes.

mod controls;
mod detail;
mod table;

pub use controls::{filter_controls, FilterControl, FilterOption};
pub use detail::{render_detail, DetailSelection};
pub use table::{render_csv, render_table, TableColumn};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Split `text` on `delimiter`, capitalize the first character of every
/// word, and join the words with `separator`.
///
/// `convert_to_title_case("code-generator", "-", " ") == "Code Generator"`
#[must_use]
pub fn convert_to_title_case(text: &str, delimiter: &str, separator: &str) -> String {
    text.split(delimiter)
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(separator)
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Left-align `s` in `width` terminal columns.
pub(crate) fn pad(s: &str, width: usize) -> String {
    let used = s.width();
    if used >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - used))
    }
}

/// Truncate to at most `max` terminal columns, marking the cut with `...`.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let budget = if max > 3 { max - 3 } else { max };
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    if max > 3 {
        out.push_str("...");
    }
    out
}

/// Escape a CSV field value (quote if contains comma, quote, or newline).
pub(crate) fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_to_title_case() {
        assert_eq!(convert_to_title_case("code-generator", "-", " "), "Code Generator");
        assert_eq!(convert_to_title_case("validator", "-", " "), "Validator");
        assert_eq!(convert_to_title_case("data to schema", " ", " "), "Data To Schema");
        assert_eq!(convert_to_title_case("already Title", " ", "_"), "Already_Title");
        assert_eq!(convert_to_title_case("", "-", " "), "");
        assert_eq!(convert_to_title_case("a--b", "-", " "), "A  B");
    }

    #[test]
    fn test_title_case_non_ascii() {
        assert_eq!(convert_to_title_case("éditeur-json", "-", " "), "Éditeur Json");
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("simple"), "simple");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long name", 10), "a very ...");
        assert_eq!(truncate("abcdef", 3), "abc");
        // Wide characters count double
        assert_eq!(truncate("日本語のツール", 7), "日本...");
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("日本", 6), "日本  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
