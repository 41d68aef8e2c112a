//! `search-index.json`: the catalog in a flat form for client-side search.

use crate::catalog::Catalog;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IndexEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub short_description: &'a str,
    pub keywords: &'a [String],
    pub url: String,
}

/// One entry per node, in catalog order.
pub fn entries(catalog: &Catalog) -> Vec<IndexEntry<'_>> {
    catalog
        .nodes()
        .iter()
        .map(|node| IndexEntry {
            id: &node.id,
            name: &node.name,
            category: &node.category,
            short_description: &node.short_description,
            keywords: &node.search_keywords,
            url: node.url_path(),
        })
        .collect()
}

pub fn to_json(catalog: &Catalog) -> serde_json::Result<String> {
    serde_json::to_string(&entries(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::small_catalog;

    #[test]
    fn test_index_json() {
        let catalog = small_catalog();
        let json = to_json(&catalog).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["id"], "hello-world");
        assert_eq!(entries[0]["url"], "/documentation/debug/hello-world");
        assert_eq!(entries[1]["keywords"], serde_json::json!(["float", "compare"]));
    }
}
