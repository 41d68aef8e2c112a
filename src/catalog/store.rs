//! Process-wide catalog snapshot.
//!
//! The catalog is built once at startup and shared read-only. In watch mode
//! a freshly loaded catalog replaces the snapshot as a whole; readers that
//! already hold an `Arc` keep their old, still consistent copy.

use super::{Catalog, CatalogError};
use arc_swap::ArcSwap;
use std::{
    path::Path,
    sync::{Arc, LazyLock},
};

/// Starts out empty; `main` installs the validated catalog before any
/// command runs.
static CATALOG: LazyLock<ArcSwap<Catalog>> =
    LazyLock::new(|| ArcSwap::from_pointee(Catalog::default()));

/// Current catalog snapshot. Lock-free.
#[inline]
pub fn catalog() -> Arc<Catalog> {
    CATALOG.load_full()
}

/// Install the startup catalog.
pub fn init_catalog(catalog: Catalog) {
    CATALOG.store(Arc::new(catalog));
}

/// Load a catalog and swap it in. On error the current snapshot stays.
pub fn reload_catalog(path: Option<&Path>) -> Result<Arc<Catalog>, CatalogError> {
    let catalog = Arc::new(Catalog::load(path)?);
    CATALOG.store(Arc::clone(&catalog));
    Ok(catalog)
}
