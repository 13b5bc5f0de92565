use crate::error::{Result, SnipcatError};
use crate::models::{Category, Snippet};
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// The catalog shipped with the binary.
pub fn builtin_catalog() -> Result<Vec<Category>> {
    serde_json::from_str(BUILTIN_CATALOG).map_err(|e| e.into())
}

/// Load a catalog from a user-supplied JSON file.
pub fn load_catalog(path: &Path) -> Result<Vec<Category>> {
    if !path.exists() {
        return Err(SnipcatError::CatalogNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = fs::read_to_string(path)?;

    // Tolerate an empty file the way the database loader does
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    serde_json::from_str(&content).map_err(|e| e.into())
}

/// Resolve gesture ids against the catalog, in the order given.
/// Ids that match nothing are skipped.
pub fn resolve_ids(catalog: &[Category], ids: &[String]) -> Vec<Snippet> {
    ids.iter()
        .filter_map(|id| find_snippet(catalog, id).cloned())
        .collect()
}

/// Find a snippet anywhere in the catalog by id.
pub fn find_snippet<'a>(catalog: &'a [Category], id: &str) -> Option<&'a Snippet> {
    catalog
        .iter()
        .flat_map(|category| &category.snippets)
        .find(|snippet| snippet.id == id)
}
