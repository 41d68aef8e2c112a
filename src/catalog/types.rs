//! Record types stored in the node catalog.
//!
//! These mirror the on-disk JSON layout one to one (snake_case keys).
//! Optional collections default to empty so that short entries such as
//! `hello-world` can omit `examples` entirely.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How involved a node is to use, shown as a badge on the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An input or output connection point on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinSpec {
    pub name: String,

    /// Free-text type tag, e.g. `Float`, `Array<Vector>`, `Exec`
    #[serde(rename = "type")]
    pub kind: String,

    pub description: String,

    /// Execution-flow pin rather than a data pin
    #[serde(default)]
    pub is_exec: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// A usage example attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExampleSpec {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One documented blueprint node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    /// Id of the owning [`Category`]
    pub category: String,
    pub short_description: String,
    pub long_description: String,
    pub complexity: Complexity,
    #[serde(default)]
    pub inputs: Vec<PinSpec>,
    #[serde(default)]
    pub outputs: Vec<PinSpec>,
    #[serde(default)]
    pub examples: Vec<ExampleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_handling: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_notes: Option<String>,
    #[serde(default)]
    pub search_keywords: Vec<String>,
}

impl NodeRecord {
    /// Documentation URL path of this node.
    pub fn url_path(&self) -> String {
        format!("/documentation/{}/{}", self.category, self.id)
    }
}

/// A named grouping of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn url_path(&self) -> String {
        format!("/documentation/{}", self.id)
    }
}

/// Raw file layout before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct CatalogFile {
    pub categories: Vec<Category>,
    pub nodes: Vec<NodeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_defaults() {
        let pin: PinSpec =
            serde_json::from_str(r#"{"name":"A","type":"Float","description":"first"}"#).unwrap();
        assert_eq!(pin.kind, "Float");
        assert!(!pin.is_exec);
        assert_eq!(pin.default_value, None);
    }

    #[test]
    fn test_pin_rejects_unknown_field() {
        let result = serde_json::from_str::<PinSpec>(
            r#"{"name":"A","type":"Float","description":"first","color":"red"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_complexity_parsing() {
        let values = [
            ("\"simple\"", Complexity::Simple),
            ("\"moderate\"", Complexity::Moderate),
            ("\"complex\"", Complexity::Complex),
        ];
        for (raw, expected) in values {
            let parsed: Complexity = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(format!("\"{parsed}\""), raw);
        }
        assert!(serde_json::from_str::<Complexity>("\"trivial\"").is_err());
    }

    #[test]
    fn test_url_paths() {
        let category = Category {
            id: "math".into(),
            name: "Math & Calculations".into(),
            description: String::new(),
        };
        assert_eq!(category.url_path(), "/documentation/math");

        let node: NodeRecord = serde_json::from_str(
            r#"{"id":"variance","name":"Variance","category":"math",
                "short_description":"s","long_description":"l","complexity":"simple"}"#,
        )
        .unwrap();
        assert_eq!(node.url_path(), "/documentation/math/variance");
        assert!(node.inputs.is_empty());
        assert!(node.search_keywords.is_empty());
    }
}
