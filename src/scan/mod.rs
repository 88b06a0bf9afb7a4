pub mod discover;
pub mod resolve;
pub mod size;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::catalog::RecordSource;
use crate::error::Result;
use discover::DirLister;
use resolve::ResolvedEntry;

/// The resolved apps of one data location.
#[derive(Debug, Clone)]
pub struct LocationResult {
    pub path: PathBuf,
    pub entries: Vec<ResolvedEntry>,
}

/// Lists and resolves the app ids of one location. Entries come back in listing order.
pub fn resolve_location(
    location: &Path,
    lister: &dyn DirLister,
    overrides: &dyn RecordSource,
    catalog: &dyn RecordSource,
) -> Result<LocationResult> {
    let ids = discover::list_ids(location, lister)?;
    let mut entries = resolve::resolve(ids.iter().map(String::as_str), overrides, catalog)?;

    let position: HashMap<&str, usize> = ids.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
    entries.sort_by_key(|e| position.get(e.id.as_str()).copied().unwrap_or(usize::MAX));

    for entry in &entries {
        log::debug!("{}: {} -> {} ({})", location.display(), entry.id, entry.name, entry.classification);
    }

    Ok(LocationResult {
        path: location.to_path_buf(),
        entries,
    })
}

/// Resolves every location in order, stopping at the first failure.
pub fn run(
    locations: &[PathBuf],
    lister: &dyn DirLister,
    overrides: &dyn RecordSource,
    catalog: &dyn RecordSource,
) -> Result<Vec<LocationResult>> {
    locations
        .iter()
        .map(|location| resolve_location(location, lister, overrides, catalog))
        .collect()
}
