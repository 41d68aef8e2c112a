//! Terminal output of the `search`, `show` and `check` commands.

use crate::catalog::{Catalog, MIN_SEARCH_LEN, NodeRecord, PinSpec, Segment, highlight, is_active_term};
use colored::Colorize;
use std::fmt::Write;

/// `text` with the matches of `term` in bold yellow.
fn highlighted(text: &str, term: &str) -> String {
    highlight(text, term)
        .into_iter()
        .map(|Segment { text, highlighted }| {
            if highlighted {
                text.bold().yellow().to_string()
            } else {
                text
            }
        })
        .collect()
}

/// Search results, one node per line.
pub fn search_report(catalog: &Catalog, term: &str) -> String {
    if !is_active_term(term) {
        return format!("search terms need at least {MIN_SEARCH_LEN} non-blank characters\n");
    }

    let results = catalog.search(term);
    if results.is_empty() {
        return format!("No nodes found matching \"{term}\"\n");
    }

    let mut out = String::new();
    for node in &results {
        let _ = writeln!(
            out,
            "{}  {}\n    {}",
            highlighted(&node.name, term),
            format!("[{}]", node.category).dimmed(),
            highlighted(&node.short_description, term),
        );
    }
    let _ = writeln!(out, "{} result(s)", results.len());
    out
}

/// Full documentation of one node.
pub fn node_report(catalog: &Catalog, node: &NodeRecord) -> String {
    let category = catalog
        .category(&node.category)
        .map_or_else(|| node.category.clone(), |c| c.name.clone());

    let mut out = String::new();
    let _ = writeln!(out, "{}", node.name.bold());
    let _ = writeln!(out, "{} · complexity: {}", category, node.complexity);
    let _ = writeln!(out, "{}", node.url_path().dimmed());
    let _ = writeln!(out, "\n{}", node.short_description);
    if !node.long_description.is_empty() {
        let _ = writeln!(out, "\n{}", node.long_description);
    }

    pins(&mut out, "Inputs", &node.inputs);
    pins(&mut out, "Outputs", &node.outputs);

    for (heading, text) in [
        ("Performance", &node.performance_notes),
        ("Error handling", &node.error_handling),
    ] {
        if let Some(text) = text {
            let _ = writeln!(out, "\n{}\n  {text}", heading.bold());
        }
    }

    if !node.examples.is_empty() {
        let _ = writeln!(out, "\n{}", "Examples".bold());
        for example in &node.examples {
            let _ = writeln!(out, "  {}: {}", example.title, example.description);
            if let Some(code) = &example.code {
                for line in code.lines() {
                    let _ = writeln!(out, "    {line}");
                }
            }
        }
    }

    if !node.search_keywords.is_empty() {
        let _ = writeln!(out, "\nkeywords: {}", node.search_keywords.join(", "));
    }
    out
}

fn pins(out: &mut String, heading: &str, pins: &[PinSpec]) {
    if pins.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", heading.bold());
    for pin in pins {
        let _ = write!(out, "  {} ({})", pin.name, pin.kind);
        if let Some(default) = &pin.default_value {
            let _ = write!(out, " = {default}");
        }
        let _ = writeln!(out, "\n    {}", pin.description);
    }
}

/// Node count per category.
pub fn check_report(catalog: &Catalog) -> String {
    let mut out = String::new();
    for category in catalog.categories() {
        let _ = writeln!(
            out,
            "{:<24} {:>3} nodes",
            category.name,
            catalog.node_count(&category.id)
        );
    }
    let _ = writeln!(
        out,
        "{} nodes in {} categories",
        catalog.nodes().len(),
        catalog.categories().len()
    );
    out
}
