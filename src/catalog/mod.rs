//! The NodesPlus node catalog.
//!
//! An immutable list of documented blueprint nodes and their categories,
//! loaded from JSON and validated once. Queries never fail: a missing id or
//! a search without matches gives an empty result.
//!
//! # Sources
//!
//! | Source   | When                                         |
//! |----------|----------------------------------------------|
//! | Embedded | default, `catalog/nodes.json` compiled in    |
//! | File     | `[build] catalog = "path"` in nodesplus.toml |

mod error;
mod search;
pub mod store;
mod types;

pub use error::CatalogError;
pub use search::{MIN_SEARCH_LEN, Segment, highlight, is_active_term};
pub use types::{Category, Complexity, ExampleSpec, NodeRecord, PinSpec};

use rustc_hash::{FxHashMap, FxHashSet};
use std::{fs, path::Path, sync::Arc};
use types::CatalogFile;

/// Catalog shipped with the binary.
const EMBEDDED_CATALOG: &str = include_str!("../../catalog/nodes.json");

/// Validated, read-only node catalog.
///
/// Records are held behind `Arc` so query results can be kept around
/// (e.g. by the browser state) without borrowing the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Arc<Category>>,
    nodes: Vec<Arc<NodeRecord>>,
    /// node id -> index into `nodes`
    by_id: FxHashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Raw JSON of the embedded catalog (used by `init`).
    pub const fn embedded_source() -> &'static str {
        EMBEDDED_CATALOG
    }

    /// Load a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content =
            fs::read_to_string(path).map_err(|err| CatalogError::Io(path.to_path_buf(), err))?;
        Self::from_json(&content)
    }

    /// Load from the configured path, or the embedded catalog when unset.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    /// Parse and validate catalog JSON.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::new(file.categories, file.nodes)
    }

    /// Build a catalog, rejecting empty, malformed or duplicate ids and
    /// nodes whose category does not exist.
    pub fn new(categories: Vec<Category>, nodes: Vec<NodeRecord>) -> Result<Self, CatalogError> {
        let mut category_ids = FxHashSet::default();
        for (index, category) in categories.iter().enumerate() {
            check_id("category", index, &category.id)?;
            if !category_ids.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut by_id = FxHashMap::default();
        for (index, node) in nodes.iter().enumerate() {
            check_id("node", index, &node.id)?;
            if !category_ids.contains(node.category.as_str()) {
                return Err(CatalogError::DanglingCategory {
                    node: node.id.clone(),
                    category: node.category.clone(),
                });
            }
            if by_id.insert(node.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateNode(node.id.clone()));
            }
        }

        Ok(Self {
            categories: categories.into_iter().map(Arc::new).collect(),
            nodes: nodes.into_iter().map(Arc::new).collect(),
            by_id,
        })
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// All nodes of a category in catalog order. Unknown ids give nothing.
    pub fn nodes_by_category(&self, category_id: &str) -> Vec<Arc<NodeRecord>> {
        self.nodes
            .iter()
            .filter(|node| node.category == category_id)
            .cloned()
            .collect()
    }

    /// Look up a node. Empty ids are never found.
    pub fn node_by_id(&self, id: &str) -> Option<Arc<NodeRecord>> {
        if id.is_empty() {
            return None;
        }
        self.by_id.get(id).map(|&index| Arc::clone(&self.nodes[index]))
    }

    /// Case-insensitive search over name, short description and keywords.
    ///
    /// Terms shorter than [`MIN_SEARCH_LEN`] or made of whitespace only give
    /// an empty result. Results keep catalog order.
    pub fn search(&self, term: &str) -> Vec<Arc<NodeRecord>> {
        if !is_active_term(term) {
            return Vec::new();
        }
        let term_lower = term.to_lowercase();
        self.nodes
            .iter()
            .filter(|node| search::node_matches(node, &term_lower))
            .cloned()
            .collect()
    }

    pub fn category(&self, id: &str) -> Option<Arc<Category>> {
        self.categories.iter().find(|c| c.id == id).cloned()
    }

    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    pub fn nodes(&self) -> &[Arc<NodeRecord>] {
        &self.nodes
    }

    pub fn node_count(&self, category_id: &str) -> usize {
        self.nodes.iter().filter(|n| n.category == category_id).count()
    }
}

/// Ids end up as URL path segments and output directories, so they are
/// restricted to `[A-Za-z0-9_-]`.
fn is_slug(id: &str) -> bool {
    id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

fn check_id(kind: &'static str, index: usize, id: &str) -> Result<(), CatalogError> {
    if id.is_empty() {
        return Err(CatalogError::EmptyId { kind, index });
    }
    if !is_slug(id) {
        return Err(CatalogError::InvalidId { kind, id: id.to_owned() });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
