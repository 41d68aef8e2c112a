//! HTML text helpers.

use crate::catalog::{Segment, highlight};
use std::fmt::Write;

/// Escape text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escaped `text` with every match of `term` wrapped in `<mark>`.
pub fn highlighted(text: &str, term: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for Segment { text, highlighted } in highlight(text, term) {
        if highlighted {
            let _ = write!(out, "<mark>{}</mark>", escape(&text));
        } else {
            out.push_str(&escape(&text));
        }
    }
    out
}

/// Replace `{key}` placeholders in an embedded template.
///
/// Values are inserted as-is; escape them first where needed.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_owned(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

/// Space-separated class list of the non-empty names.
pub fn classes(names: &[&str]) -> String {
    names
        .iter()
        .filter(|name| !name.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("<b>A & B</b>"), "&lt;b&gt;A &amp; B&lt;/b&gt;");
        assert_eq!(escape(r#"say "hi" it's"#), "say &quot;hi&quot; it&#39;s");
    }

    #[test]
    fn test_highlighted() {
        assert_eq!(
            highlighted("Is Nearly Equal (Float)", "float"),
            "Is Nearly Equal (<mark>Float</mark>)"
        );
        // too short to search
        assert_eq!(highlighted("Float", "f"), "Float");
        // markup in the text never leaks through
        assert_eq!(
            highlighted("<Float>", "float"),
            "&lt;<mark>Float</mark>&gt;"
        );
    }

    #[test]
    fn test_fill() {
        let out = fill("<title>{title}</title>{title}{missing}", &[("title", "Docs")]);
        assert_eq!(out, "<title>Docs</title>Docs{missing}");
    }

    #[test]
    fn test_classes() {
        assert_eq!(classes(&["node-item", "", "selected"]), "node-item selected");
        assert_eq!(classes(&["", ""]), "");
    }
}
