//! Catalog loading errors.
//!
//! Every variant is a configuration defect in the catalog file. None of the
//! catalog queries produce errors; these only come out of loading.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error when reading catalog `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("catalog parsing error")]
    Parse(#[from] serde_json::Error),

    #[error("{kind} entry #{index} has an empty id")]
    EmptyId { kind: &'static str, index: usize },

    #[error("{kind} id `{id}` may only contain ASCII letters, digits, `-` and `_`")]
    InvalidId { kind: &'static str, id: String },

    #[error("duplicate category id `{0}`")]
    DuplicateCategory(String),

    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),

    #[error("node `{node}` references unknown category `{category}`")]
    DanglingCategory { node: String, category: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::DanglingCategory {
            node: "timer-n".into(),
            category: "timers".into(),
        };
        let display = format!("{err}");
        assert!(display.contains("timer-n"));
        assert!(display.contains("timers"));

        let err = CatalogError::EmptyId { kind: "node", index: 3 };
        assert_eq!(format!("{err}"), "node entry #3 has an empty id");

        let err = CatalogError::InvalidId { kind: "category", id: "a/b".into() };
        assert!(format!("{err}").starts_with("category id `a/b` may only contain"));
    }
}
