//! Page bodies: home, documentation views and 404.
//!
//! Everything coming from the catalog or the search box goes through
//! [`escape`] or [`highlighted`] before it lands in the markup.

use super::html::{classes, escape, highlighted};
use crate::{
    browser::{BrowserState, ViewMode},
    catalog::{Catalog, Category, ExampleSpec, MIN_SEARCH_LEN, NodeRecord, PinSpec, is_active_term},
    config::SiteConfig,
    environment::Theme,
};
use std::sync::Arc;

// ============================================================================
// Colors
// ============================================================================

/// Color of a pin type badge, keyed on the first word of the type.
pub fn pin_color(kind: &str) -> &'static str {
    let head = kind
        .split(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match head.as_str() {
        "exec" => "#D83B3B",
        "boolean" | "bool" => "#FF5252",
        "integer" | "int" | "float" | "double" | "number" | "vector" | "vector2d" | "vector4"
        | "transform" => "#4FC3F7",
        "string" | "name" | "text" => "#81C784",
        "object" | "actor" | "component" => "#CE93D8",
        "struct" => "#FFB74D",
        "enum" => "#FFF176",
        "array" | "set" | "map" => "#7986CB",
        _ => "#B0BEC5",
    }
}

/// Header color of a category, slightly darker on the light theme.
pub fn category_color(category: &str, theme: Theme) -> &'static str {
    let dark = theme == Theme::Dark;
    match category {
        "debug" => if dark { "#F56565" } else { "#E53E3E" },
        "math" => if dark { "#4299E1" } else { "#3182CE" },
        "string" => if dark { "#48BB78" } else { "#38A169" },
        "utility" => if dark { "#ECC94B" } else { "#D69E2E" },
        "array" => if dark { "#9F7AEA" } else { "#805AD5" },
        _ => if dark { "#6E8EAF" } else { "#4A5568" },
    }
}

fn count_label(count: usize) -> String {
    if count == 1 { "1 node".into() } else { format!("{count} nodes") }
}

/// `?q=term` to keep an active search across links, empty otherwise.
fn search_query(term: &str) -> String {
    if term.is_empty() {
        String::new()
    } else {
        format!("?q={}", urlencoding::encode(term))
    }
}

// ============================================================================
// Home
// ============================================================================

const FEATURES: [(&str, &str); 3] = [
    (
        "Enhanced Error Handling",
        "Comprehensive validation with detailed feedback to help you catch and fix issues quickly.",
    ),
    (
        "Better Documentation",
        "Detailed tooltips, usage examples, and performance considerations for every node.",
    ),
    (
        "Improved Discoverability",
        "Category-based organization and metadata-driven search for easily finding the right node.",
    ),
];

/// Standard Blueprint graph against the NodesPlus equivalent.
struct Metric {
    label: &'static str,
    standard: f64,
    nodesplus: f64,
    unit: &'static str,
    description: &'static str,
}

impl Metric {
    /// Reduction in percent, rounded. All metrics are lower-is-better.
    fn improvement(&self) -> u32 {
        ((self.standard - self.nodesplus) / self.standard * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

const METRICS: [Metric; 3] = [
    Metric {
        label: "Code Complexity",
        standard: 28.0,
        nodesplus: 12.0,
        unit: "nodes",
        description: "Average number of nodes needed for typical string processing operations.",
    },
    Metric {
        label: "Memory Usage",
        standard: 14.5,
        nodesplus: 10.2,
        unit: "MB",
        description: "Average memory footprint for equivalent Blueprint graphs in our tests.",
    },
    Metric {
        label: "Development Speed",
        standard: 35.0,
        nodesplus: 18.0,
        unit: "min",
        description: "Average time to implement common functionality in our testing scenarios.",
    },
];

/// Title, standard time, NodesPlus time, description.
const CASE_STUDIES: [(&str, &str, &str, &str); 2] = [
    (
        "Game Save System",
        "2.5 hours",
        "1 hour",
        "A complete game save system with validation, error handling, and data transformation.",
    ),
    (
        "Inventory Management",
        "5 hours",
        "2 hours",
        "Inventory system with item categorization, searching, and persistence.",
    ),
];

/// The node the showcase puts next to its hand-built equivalent.
const SHOWCASE_NODE: &str = "string-fuzzy-search";

/// Icon and name of the stock nodes a fuzzy search takes without NodesPlus.
const SHOWCASE_STANDARD_NODES: [(&str, &str); 12] = [
    ("☍", "For Each Loop"),
    ("Aa", "String Contains"),
    ("Aa", "To Lower Case"),
    ("№", "Get String Length"),
    ("⊟", "Split String"),
    ("⑂", "Branch"),
    ("[]", "Get Element"),
    ("+", "Append Array"),
    ("≈", "String Distance"),
    ("↹", "Float to String"),
    ("⇅", "Sort Array by Property"),
    ("[]", "Make Array"),
];

const GETTING_STARTED: [(&str, &str); 5] = [
    ("Purchase", "Visit the Fab marketplace and purchase the plugin."),
    (
        "Access Library",
        "Open the Epic Games Launcher, go to the Library tab and find the Fab Library section.",
    ),
    ("Install Plugin", "Click 'Install to Engine' or 'Add to Project'."),
    (
        "Enable Plugin",
        "In Unreal Engine open Edit > Plugins, enable the plugin and restart the editor.",
    ),
    (
        "Start Creating",
        "Search for the nodes in the Blueprint editor's node palette and add them to your graphs.",
    ),
];

pub fn home(config: &SiteConfig, catalog: &Catalog) -> String {
    let site = escape(&config.base.title);
    let store = escape(&config.base.store_url);
    let discord = escape(&config.base.discord_url);

    let mut out = String::from(r#"<main class="main-content">"#);
    out.push_str(&format!(
        r#"<section class="hero-section">
<h1 class="hero-title">Extended Blueprint Nodes for Unreal Engine</h1>
<p class="hero-description">A collection of custom Blueprint nodes that extend Unreal Engine's functionality, providing simplified solutions for complex operations in Blueprint scripting.</p>
<div class="hero-buttons"><a class="hero-button primary-button" href="{store}" target="_blank" rel="noopener noreferrer">Get {site}</a><a class="hero-button secondary-button" href="{discord}" target="_blank" rel="noopener noreferrer">Join Discord</a></div>
</section>"#
    ));

    out.push_str(r#"<section class="section features-section"><h2>Features</h2><div class="card-grid">"#);
    for (title, text) in FEATURES {
        out.push_str(&format!(r#"<div class="card feature-card"><h3>{title}</h3><p>{text}</p></div>"#));
    }
    out.push_str("</div></section>");

    out.push_str(&performance_section(&site));
    if let Some(node) = catalog.node_by_id(SHOWCASE_NODE) {
        out.push_str(&showcase_section(&site, &node, config.docs.theme));
    }

    out.push_str(&format!(
        r#"<section class="section catalog-section"><h2>What's Inside</h2><p>{} across {} categories.</p>"#,
        count_label(catalog.nodes().len()),
        catalog.categories().len()
    ));
    out.push_str(&category_cards(catalog, config.docs.theme));
    out.push_str(r#"<p><a href="/documentation">Browse the documentation →</a></p></section>"#);

    out.push_str(&format!(
        r#"<section class="section getting-started"><h2>Getting Started</h2><p>Getting started with {site} is quick. Follow these steps to begin enhancing your Unreal Engine blueprints.</p><ol class="steps">"#
    ));
    for (title, text) in GETTING_STARTED {
        out.push_str(&format!(r#"<li><h3 class="step-card-title">{title}</h3><p>{}</p></li>"#, escape(text)));
    }
    out.push_str("</ol></section>");

    out.push_str(&format!(
        r#"<section class="section community-section"><h2>Community</h2><p>Questions, feature requests or something you built with {site}? Share it with the community.</p><a class="hero-button secondary-button" href="{discord}" target="_blank" rel="noopener noreferrer">Join Discord</a></section>"#
    ));
    out.push_str("</main>");
    out
}

fn performance_section(site: &str) -> String {
    let mut out = format!(
        r#"<section class="section performance-section"><h2>Performance Benefits</h2><p class="performance-subtitle">{site} aims to help you achieve these improvements while streamlining your workflow.</p><div class="card-grid metrics-grid">"#
    );
    for metric in &METRICS {
        let improvement = metric.improvement();
        out.push_str(&format!(
            r#"<div class="card metric-card"><h3>{label}</h3><div class="metric-values"><div class="metric-value standard"><span class="value-label">Standard Blueprints</span><span class="value-number">{standard} {unit}</span></div><div class="metric-value enhanced"><span class="value-label">{site}</span><span class="value-number">{nodesplus} {unit}</span></div></div><div class="improvement-bar"><div class="improvement-fill" style="width: {improvement}%"></div></div><p class="improvement-percentage">{improvement}% Reduction</p><p class="metric-description">{description}</p></div>"#,
            label = metric.label,
            standard = metric.standard,
            nodesplus = metric.nodesplus,
            unit = metric.unit,
            description = metric.description,
        ));
    }
    out.push_str(r#"</div><div class="card-grid case-studies">"#);
    for (title, standard, nodesplus, description) in CASE_STUDIES {
        out.push_str(&format!(
            r#"<div class="card case-study"><h3>{title}</h3><p>{description}</p><p class="case-study-times"><span class="standard">Standard: {standard}</span> <span class="enhanced">{site}: {nodesplus}</span></p></div>"#
        ));
    }
    out.push_str("</div></section>");
    out
}

/// One NodesPlus node against the stock nodes it replaces.
fn showcase_section(site: &str, node: &NodeRecord, theme: Theme) -> String {
    let mut out = format!(
        r#"<section class="section showcase-section"><h2>Showcase</h2><p class="showcase-subtitle">{site} simplifies complex blueprint operations with single nodes that replace multiple standard nodes.</p><div class="showcase-comparison"><div class="showcase-column"><div class="showcase-header"><h3>Standard Blueprint</h3><span class="node-count">{}+ Nodes</span></div><ul class="standard-nodes">"#,
        SHOWCASE_STANDARD_NODES.len()
    );
    for (icon, name) in SHOWCASE_STANDARD_NODES {
        out.push_str(&format!(
            r#"<li class="standard-node"><span class="standard-node-icon">{}</span>{name}</li>"#,
            escape(icon)
        ));
    }
    out.push_str(&format!(
        r#"</ul></div><div class="showcase-divider"><span class="vs-badge">VS</span></div><div class="showcase-column"><div class="showcase-header"><h3>{site}</h3><span class="node-count highlight">1 Node</span></div><a class="showcase-node" href="{}">{}</a></div></div></section>"#,
        escape(&node.url_path()),
        blueprint_node(node, theme),
    ));
    out
}

fn category_cards(catalog: &Catalog, theme: Theme) -> String {
    let mut out = String::from(r#"<div class="card-grid">"#);
    for category in catalog.categories() {
        out.push_str(&format!(
            r#"<a class="card category-card" href="{}" style="border-top: 4px solid {}"><h3>{}</h3><p>{}</p><span class="category-count">{}</span></a>"#,
            escape(&category.url_path()),
            category_color(&category.id, theme),
            escape(&category.name),
            escape(&category.description),
            count_label(catalog.node_count(&category.id)),
        ));
    }
    out.push_str("</div>");
    out
}

// ============================================================================
// Documentation
// ============================================================================

/// Documentation page body for `state`.
pub fn docs(config: &SiteConfig, catalog: &Catalog, state: &BrowserState, theme: Theme) -> String {
    // Highlighting and link queries only while a search is actually running
    let term = if is_active_term(state.search_term()) { state.search_term() } else { "" };
    let query = search_query(term);

    // Only the mobile media query reacts to `sidebar-hidden`
    let layout_class = classes(&[
        "docs-layout",
        if state.sidebar_hidden_on_mobile(catalog) { "sidebar-hidden" } else { "" },
    ]);

    let mut out = format!(r#"<div class="{layout_class}">"#);
    out.push_str(r#"<button class="sidebar-toggle" type="button" aria-label="Toggle sidebar">☰ Nodes</button>"#);
    out.push_str(&sidebar(catalog, state, term, &query));
    out.push_str(r#"<main class="docs-main">"#);
    match state.view_mode(catalog) {
        ViewMode::Landing => out.push_str(&landing_panel(config, catalog, theme)),
        ViewMode::CategoryDetail(category) => {
            out.push_str(&category_panel(catalog, &category, term, &query));
        }
        ViewMode::NodeDetail(node) => out.push_str(&node_panel(catalog, &node, term, &query, theme)),
    }
    out.push_str("</main></div>");
    out
}

fn sidebar(catalog: &Catalog, state: &BrowserState, term: &str, query: &str) -> String {
    let selected_node = state.selected_node().map(|n| n.id.as_str());

    let mut out = format!(
        r#"<aside class="docs-sidebar" aria-hidden="{}">"#,
        !state.is_sidebar_visible()
    );
    out.push_str(&format!(
        r#"<form class="search-box" action="{}" method="get" role="search"><input id="node-search" type="search" name="q" value="{}" placeholder="Search nodes..." autocomplete="off" aria-label="Search nodes"></form>"#,
        escape(&state.route().to_string()),
        escape(state.search_term()),
    ));

    if term.is_empty() {
        if state.is_searching() {
            out.push_str(&format!(
                r#"<p class="search-hint">Type at least {MIN_SEARCH_LEN} characters to search.</p>"#
            ));
        }
        out.push_str(&category_list(catalog, state.selected_category(), selected_node));
    } else if state.filtered_nodes().is_empty() {
        out.push_str(&format!(
            r#"<p class="no-results">No nodes found matching "{}"</p>"#,
            escape(term)
        ));
    } else {
        out.push_str(&format!(
            r#"<div class="search-results"><h3>Search Results ({})</h3><ul>"#,
            state.filtered_nodes().len()
        ));
        for node in state.filtered_nodes() {
            let class = classes(&["node-item", if selected_node == Some(node.id.as_str()) { "selected" } else { "" }]);
            out.push_str(&format!(
                r#"<li><a class="{class}" href="{}{query}"><span class="node-name">{}</span><span class="node-category">{}</span></a></li>"#,
                escape(&node.url_path()),
                highlighted(&node.name, term),
                escape(&node.category),
            ));
        }
        out.push_str("</ul></div>");
    }

    out.push_str(&recently_viewed(state.recently_viewed(), selected_node));
    out.push_str("</aside>");
    out
}

/// Categories with node counts; the selected one is expanded.
fn category_list(catalog: &Catalog, selected_category: Option<&str>, selected_node: Option<&str>) -> String {
    let mut out = String::from(r#"<nav class="category-list">"#);
    for category in catalog.categories() {
        let is_selected = selected_category == Some(category.id.as_str());
        out.push_str(&format!(
            r#"<div class="{}"><a class="category-header" href="{}"><span class="category-name">{}</span><span class="category-count">{}</span></a>"#,
            classes(&["category-item", if is_selected { "selected" } else { "" }]),
            escape(&category.url_path()),
            escape(&category.name),
            catalog.node_count(&category.id),
        ));
        if is_selected {
            out.push_str(r#"<ul class="category-nodes">"#);
            for node in catalog.nodes_by_category(&category.id) {
                let class = classes(&["node-item", if selected_node == Some(node.id.as_str()) { "selected" } else { "" }]);
                out.push_str(&format!(
                    r#"<li><a class="{class}" href="{}"><span class="node-name">{}</span></a></li>"#,
                    escape(&node.url_path()),
                    escape(&node.name),
                ));
            }
            out.push_str("</ul>");
        }
        out.push_str("</div>");
    }
    out.push_str("</nav>");
    out
}

/// Recently viewed nodes other than the one on screen.
fn recently_viewed(nodes: &[Arc<NodeRecord>], current: Option<&str>) -> String {
    let items: Vec<String> = nodes
        .iter()
        .filter(|node| Some(node.id.as_str()) != current)
        .map(|node| {
            format!(
                r#"<li><a class="node-item" href="{}">{}</a></li>"#,
                escape(&node.url_path()),
                escape(&node.name)
            )
        })
        .collect();

    if items.is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="recently-viewed"><h3>Recently Viewed</h3><ul>{}</ul></div>"#,
        items.concat()
    )
}

fn landing_panel(config: &SiteConfig, catalog: &Catalog, theme: Theme) -> String {
    let mut out = format!(
        r#"<section class="docs-landing"><h1>{} Blueprint Library</h1><p>Browse {} in {} categories. Pick a category to get started, or search by name, description or keyword.</p>"#,
        escape(&config.base.title),
        count_label(catalog.nodes().len()),
        catalog.categories().len(),
    );
    out.push_str(
        r#"<div class="documentation-guide"><h2>Documentation Guide</h2><ol class="steps"><li><h3>Select a Category</h3><p>Choose a category from the sidebar or the grid below.</p></li><li><h3>Explore Nodes</h3><p>Browse the nodes of a category, or search across all of them.</p></li><li><h3>View Details</h3><p>Open a node to see its pins, examples and usage notes.</p></li></ol></div>"#,
    );
    out.push_str(r#"<h2 class="categories-heading">Node Categories</h2>"#);
    out.push_str(&category_cards(catalog, theme));
    out.push_str("</section>");
    out
}

fn category_panel(catalog: &Catalog, category: &Category, term: &str, query: &str) -> String {
    let nodes = catalog.nodes_by_category(&category.id);

    let mut out = format!(
        r#"<section class="category-details-panel"><a class="back-button" href="/documentation{query}">← All categories</a><h2>{}</h2><p>{}</p>"#,
        escape(&category.name),
        escape(&category.description),
    );
    if nodes.is_empty() {
        out.push_str(r#"<p class="no-results">No nodes in this category yet.</p>"#);
    } else {
        out.push_str(r#"<div class="card-grid">"#);
        for node in &nodes {
            out.push_str(&format!(
                r#"<a class="card node-card" href="{}{query}"><h3>{}</h3><p>{}</p><span class="badge complexity-{}">{}</span></a>"#,
                escape(&node.url_path()),
                highlighted(&node.name, term),
                highlighted(&node.short_description, term),
                node.complexity,
                node.complexity,
            ));
        }
        out.push_str("</div>");
    }
    out.push_str("</section>");
    out
}

fn node_panel(catalog: &Catalog, node: &NodeRecord, term: &str, query: &str, theme: Theme) -> String {
    let category_name = catalog
        .category(&node.category)
        .map_or_else(|| node.category.clone(), |c| c.name.clone());

    let mut out = format!(
        r#"<article class="node-details-panel"><a class="back-button" href="/documentation/{}{query}">← Back</a>"#,
        escape(&node.category)
    );
    out.push_str(&format!(
        r#"<header class="node-details-header"><h2 class="node-title">{}</h2><div class="node-badges"><span class="badge node-category-badge" style="background-color: {}">{}</span><span class="badge complexity-{}">Complexity: {}</span></div></header>"#,
        highlighted(&node.name, term),
        category_color(&node.category, theme),
        escape(&category_name),
        node.complexity,
        node.complexity,
    ));

    out.push_str(r#"<div class="node-top-section"><div class="node-graph-section"><h3>Node Visualization</h3>"#);
    out.push_str(&blueprint_node(node, theme));
    out.push_str("</div>");
    out.push_str(&overview(node, term));
    out.push_str("</div>");

    if !node.inputs.is_empty() || !node.outputs.is_empty() {
        out.push_str(r#"<section class="node-pins-wrapper"><h3>Connection Points</h3><div class="node-pins-container">"#);
        out.push_str(&pin_list("Inputs", &node.inputs));
        out.push_str(&pin_list("Outputs", &node.outputs));
        out.push_str("</div></section>");
    }

    out.push_str(&examples(&node.examples));
    out.push_str("</article>");
    out
}

fn overview(node: &NodeRecord, term: &str) -> String {
    let mut out = format!(
        r#"<div class="node-overview"><div class="node-description"><h3>Overview</h3><p class="short-description">{}</p>"#,
        highlighted(&node.short_description, term)
    );
    if !node.long_description.is_empty() {
        out.push_str(&format!(
            r#"<p class="long-description">{}</p>"#,
            highlighted(&node.long_description, term)
        ));
    }
    out.push_str("</div>");

    if !node.search_keywords.is_empty() {
        out.push_str(r#"<div class="node-keywords"><h3>Keywords</h3><div class="keyword-tags">"#);
        for keyword in &node.search_keywords {
            out.push_str(&format!(r#"<span class="keyword-tag">{}</span>"#, escape(keyword)));
        }
        out.push_str("</div></div>");
    }
    if let Some(notes) = &node.performance_notes {
        out.push_str(&format!(
            r#"<div class="node-performance"><h3>Performance</h3><p>{}</p></div>"#,
            escape(notes)
        ));
    }
    if let Some(errors) = &node.error_handling {
        out.push_str(&format!(
            r#"<div class="node-error-handling"><h3>Error Handling</h3><p>{}</p></div>"#,
            escape(errors)
        ));
    }
    out.push_str("</div>");
    out
}

/// Static picture of the node as it looks in the Blueprint editor:
/// inputs on the left, outputs on the right, one row per pin pair.
fn blueprint_node(node: &NodeRecord, theme: Theme) -> String {
    let mut out = format!(
        r#"<div class="blueprint-node detailed"><div class="blueprint-node-header" style="background-color: {}"><span class="blueprint-node-title">{}</span><span class="blueprint-node-category">{}</span></div><div class="blueprint-node-pins">"#,
        category_color(&node.category, theme),
        escape(&node.name),
        escape(&node.category),
    );

    let rows = node.inputs.len().max(node.outputs.len());
    for row in 0..rows {
        out.push_str(r#"<div class="inline-pins-row">"#);
        match node.inputs.get(row) {
            Some(pin) => out.push_str(&format!(
                r#"<div class="blueprint-node-pin input-pin" title="{}">{}<span class="pin-name">{}</span></div>"#,
                escape(&pin.description),
                pin_dot(pin),
                escape(&pin.name),
            )),
            None => out.push_str(r#"<div class="blueprint-node-pin empty-input"></div>"#),
        }
        if let Some(pin) = node.outputs.get(row) {
            out.push_str(&format!(
                r#"<div class="blueprint-node-pin output-pin" title="{}"><span class="pin-name">{}</span>{}</div>"#,
                escape(&pin.description),
                escape(&pin.name),
                pin_dot(pin),
            ));
        }
        out.push_str("</div>");
    }
    out.push_str("</div></div>");
    out
}

fn pin_dot(pin: &PinSpec) -> String {
    if pin.is_exec {
        r#"<span class="pin-dot exec" style="background: #FFFFFF"></span>"#.into()
    } else {
        format!(r#"<span class="pin-dot" style="background: {}"></span>"#, pin_color(&pin.kind))
    }
}

fn pin_list(heading: &str, pins: &[PinSpec]) -> String {
    if pins.is_empty() {
        return String::new();
    }
    let mut out = format!(r#"<div class="node-pins-section"><h4>{heading}</h4><div class="pins-list">"#);
    for pin in pins {
        out.push_str(&format!(
            r#"<div class="pin-item"><div class="pin-header"><span class="pin-name">{}</span><span class="pin-type" style="background-color: {}">{}</span>"#,
            escape(&pin.name),
            pin_color(&pin.kind),
            escape(&pin.kind),
        ));
        if let Some(default) = &pin.default_value {
            out.push_str(&format!(r#"<span class="pin-default">Default: {}</span>"#, escape(default)));
        }
        out.push_str(&format!(
            r#"</div><p class="pin-description">{}</p></div>"#,
            escape(&pin.description)
        ));
    }
    out.push_str("</div></div>");
    out
}

fn examples(examples: &[ExampleSpec]) -> String {
    if examples.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<section class="node-examples-section"><h3>Usage Examples</h3><div class="examples-list">"#);
    for example in examples {
        out.push_str(&format!(
            r#"<div class="example-item"><h4>{}</h4><p class="example-description">{}</p>"#,
            escape(&example.title),
            escape(&example.description),
        ));
        if let Some(code) = &example.code {
            out.push_str(&format!(r#"<pre class="code-example"><code>{}</code></pre>"#, escape(code)));
        }
        if let Some(image) = &example.image {
            out.push_str(&format!(
                r#"<div class="example-image"><img src="{}" alt="Example: {}" loading="lazy"></div>"#,
                escape(image),
                escape(&example.title),
            ));
        }
        out.push_str("</div>");
    }
    out.push_str("</div></section>");
    out
}

// ============================================================================
// 404
// ============================================================================

pub fn not_found(path: Option<&str>) -> String {
    let detail = path.map_or_else(
        || "This page does not exist.".to_owned(),
        |path| format!("The page <code>{}</code> does not exist.", escape(path)),
    );
    format!(
        r#"<main class="section not-found"><h1>404</h1><h2>Page not found</h2><p>{detail}</p><p><a href="/">Home</a> · <a href="/documentation">Documentation</a></p></main>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        browser::{BrowserSettings, DocsRoute, Event},
        catalog::tests::small_catalog,
    };

    fn state_at(route: DocsRoute, catalog: &Catalog) -> BrowserState {
        BrowserState::at_route(&route, catalog, BrowserSettings::default())
    }

    #[test]
    fn test_pin_color() {
        assert_eq!(pin_color("Float"), "#4FC3F7");
        assert_eq!(pin_color("Array of Integers"), "#7986CB");
        assert_eq!(pin_color("Enum (Skip, Overwrite, Error)"), "#FFF176");
        assert_eq!(pin_color("Exec"), "#D83B3B");
        assert_eq!(pin_color("Wildcard"), "#B0BEC5");
    }

    #[test]
    fn test_category_color_follows_theme() {
        assert_eq!(category_color("math", Theme::Dark), "#4299E1");
        assert_eq!(category_color("math", Theme::Light), "#3182CE");
        assert_eq!(category_color("custom", Theme::Light), "#4A5568");
    }

    #[test]
    fn test_home_links() {
        let catalog = small_catalog();
        let html = home(&SiteConfig::default(), &catalog);
        assert!(html.contains("Get NodesPlus"));
        assert!(html.contains("2 nodes across 3 categories"));
        assert!(html.contains(r#"href="/documentation/math""#));
    }

    #[test]
    fn test_home_performance_and_showcase() {
        assert_eq!(METRICS.map(|m| m.improvement()), [57, 30, 49]);

        let html = home(&SiteConfig::default(), &Catalog::embedded().unwrap());
        assert!(html.contains("Performance Benefits"));
        assert!(html.contains(r#"style="width: 57%""#));
        assert!(html.contains("14.5 MB"));
        assert!(html.contains("Game Save System"));
        assert!(html.contains("12+ Nodes"));
        assert!(html.contains(r#"<a class="showcase-node" href="/documentation/string/string-fuzzy-search">"#));

        // the showcase needs its node
        let html = home(&SiteConfig::default(), &small_catalog());
        assert!(html.contains("Performance Benefits"));
        assert!(!html.contains("showcase-section"));
    }

    #[test]
    fn test_node_page_hides_sidebar_on_mobile() {
        let catalog = small_catalog();
        let config = SiteConfig::default();

        let state = state_at(DocsRoute::node("debug", "hello-world"), &catalog);
        let html = docs(&config, &catalog, &state, Theme::Dark);
        assert!(html.starts_with(r#"<div class="docs-layout sidebar-hidden">"#));
        // still shown at desktop width
        assert!(html.contains(r#"<aside class="docs-sidebar" aria-hidden="false">"#));

        for route in [DocsRoute::landing(), DocsRoute::category("math")] {
            let state = state_at(route, &catalog);
            let html = docs(&config, &catalog, &state, Theme::Dark);
            assert!(html.starts_with(r#"<div class="docs-layout">"#));
        }

        // the mobile toggle reopens it
        let mut state = BrowserState::new(BrowserSettings::default(), 400);
        state.apply(Event::Load(DocsRoute::node("debug", "hello-world")), &catalog);
        state.apply(Event::ToggleSidebar, &catalog);
        let html = docs(&config, &catalog, &state, Theme::Dark);
        assert!(html.starts_with(r#"<div class="docs-layout">"#));
    }

    #[test]
    fn test_landing_lists_categories_with_counts() {
        let catalog = small_catalog();
        let state = state_at(DocsRoute::landing(), &catalog);
        let html = docs(&SiteConfig::default(), &catalog, &state, Theme::Dark);

        assert!(html.contains("NodesPlus Blueprint Library"));
        assert!(html.contains("Debug &amp; Utilities"));
        assert!(html.contains(r#"<span class="category-count">1</span>"#));
        assert!(html.contains(r#"<span class="category-count">0</span>"#));
    }

    #[test]
    fn test_category_view_expands_selected() {
        let catalog = small_catalog();
        let state = state_at(DocsRoute::category("math"), &catalog);
        let html = docs(&SiteConfig::default(), &catalog, &state, Theme::Dark);

        assert!(html.contains(r#"class="category-item selected""#));
        assert!(html.contains(r#"class="category-details-panel""#));
        assert!(html.contains("Is Nearly Equal (Float)"));
        assert!(!html.contains("node-details-panel"));
    }

    #[test]
    fn test_empty_category_message() {
        let catalog = small_catalog();
        let state = state_at(DocsRoute::category("string"), &catalog);
        let html = docs(&SiteConfig::default(), &catalog, &state, Theme::Dark);
        assert!(html.contains("No nodes in this category yet."));
    }

    #[test]
    fn test_node_view() {
        let catalog = small_catalog();
        let state = state_at(DocsRoute::node("math", "is-nearly-equal"), &catalog);
        let html = docs(&SiteConfig::default(), &catalog, &state, Theme::Dark);

        assert!(html.contains(r#"class="node-details-panel""#));
        assert!(html.contains(r#"class="node-item selected""#));
        assert!(html.contains("Default: 0.0000001"));
        assert!(html.contains("Complexity: simple"));
        assert!(html.contains(r#"href="/documentation/math">← Back"#));
        // no examples in the record
        assert!(!html.contains("Usage Examples"));
    }

    #[test]
    fn test_search_results_highlighted() {
        let catalog = small_catalog();
        let mut state = state_at(DocsRoute::landing(), &catalog);
        state.handle_search("float", &catalog);
        let html = docs(&SiteConfig::default(), &catalog, &state, Theme::Dark);

        assert!(html.contains("Search Results (1)"));
        assert!(html.contains("Is Nearly Equal (<mark>Float</mark>)"));
        assert!(html.contains(r#"href="/documentation/math/is-nearly-equal?q=float""#));
        assert!(!html.contains(r#"class="category-list""#));
    }

    #[test]
    fn test_search_without_results() {
        let catalog = small_catalog();
        let mut state = state_at(DocsRoute::landing(), &catalog);
        state.handle_search("<zzz>", &catalog);
        let html = docs(&SiteConfig::default(), &catalog, &state, Theme::Dark);
        assert!(html.contains(r#"No nodes found matching "&lt;zzz&gt;""#));
        assert!(!html.contains("<zzz>"));
    }

    #[test]
    fn test_short_search_shows_hint() {
        let catalog = small_catalog();
        let mut state = state_at(DocsRoute::landing(), &catalog);
        state.handle_search("f", &catalog);
        let html = docs(&SiteConfig::default(), &catalog, &state, Theme::Dark);
        assert!(html.contains("Type at least 2 characters"));
        assert!(html.contains(r#"class="category-list""#));
    }

    #[test]
    fn test_recently_viewed_skips_current() {
        let catalog = small_catalog();
        let mut state = state_at(DocsRoute::landing(), &catalog);
        state.apply(Event::Load(DocsRoute::node("debug", "hello-world")), &catalog);
        let html = docs(&SiteConfig::default(), &catalog, &state, Theme::Dark);
        assert!(!html.contains("Recently Viewed"));

        state.apply(Event::Load(DocsRoute::node("math", "is-nearly-equal")), &catalog);
        let html = docs(&SiteConfig::default(), &catalog, &state, Theme::Dark);
        assert!(html.contains("Recently Viewed"));
        assert!(html.contains(r#"<li><a class="node-item" href="/documentation/debug/hello-world">Hello World</a></li>"#));
    }

    #[test]
    fn test_blueprint_node_rows() {
        let catalog = small_catalog();
        let node = catalog.node_by_id("is-nearly-equal").unwrap();
        let html = blueprint_node(&node, Theme::Dark);
        // two inputs, one output: two rows, one without an output pin
        assert_eq!(html.matches(r#"class="inline-pins-row""#).count(), 2);
        assert_eq!(html.matches("output-pin").count(), 1);

        let node = catalog.node_by_id("hello-world").unwrap();
        let html = blueprint_node(&node, Theme::Dark);
        assert!(html.contains("pin-dot exec"));
    }

    #[test]
    fn test_not_found_escapes_path() {
        let html = not_found(Some("/<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
