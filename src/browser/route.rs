//! Documentation URL paths.
//!
//! ```text
//! /documentation                        → landing
//! /documentation/{categoryId}           → category
//! /documentation/{categoryId}/{nodeId}  → node
//! ```
//!
//! Parsing only checks the shape of the path. Whether the ids exist is up
//! to the browser state, which falls back to the landing view. Catalog ids
//! are slugs, so displaying a route needs no encoding.

use std::fmt;

/// Path prefix shared by all documentation routes.
const DOCS_PREFIX: &str = "/documentation";

/// Path segments of a documentation URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocsRoute {
    pub category: Option<String>,
    pub node: Option<String>,
}

impl DocsRoute {
    pub const fn landing() -> Self {
        Self { category: None, node: None }
    }

    pub fn category(category: &str) -> Self {
        Self { category: Some(category.to_owned()), node: None }
    }

    pub fn node(category: &str, node: &str) -> Self {
        Self {
            category: Some(category.to_owned()),
            node: Some(node.to_owned()),
        }
    }

    /// Parse a request URL or path.
    ///
    /// Accepts trailing slashes, a trailing `index.html`, query strings,
    /// fragments and percent-encoded segments. Returns `None` for anything
    /// outside `/documentation` or with too many segments.
    pub fn parse(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let decoded = urlencoding::decode(path).ok()?;

        let mut segments = decoded
            .split('/')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        if segments.last() == Some(&"index.html") {
            segments.pop();
        }

        match segments.as_slice() {
            ["documentation"] => Some(Self::landing()),
            ["documentation", category] => Some(Self::category(category)),
            ["documentation", category, node] => Some(Self::node(category, node)),
            _ => None,
        }
    }

    /// Output file for this route relative to the site root,
    /// e.g. `documentation/math/variance/index.html`.
    pub fn output_file(&self) -> String {
        format!("{}/index.html", self.to_string().trim_start_matches('/'))
    }
}

impl fmt::Display for DocsRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(DOCS_PREFIX)?;
        if let Some(category) = &self.category {
            write!(f, "/{category}")?;
            if let Some(node) = &self.node {
                write!(f, "/{node}")?;
            }
        }
        Ok(())
    }
}
