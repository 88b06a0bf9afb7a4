//! Tiered app id resolution.
//!
//! Ten-digit ids are Steam shortcut ids for non-Steam games and never reach a
//! catalog. Everything else is looked up in the override catalog, then the
//! synced catalog. Each scan stops the moment nothing is left to find, and the
//! synced catalog is not opened at all when the overrides already covered every id.

use std::collections::HashSet;
use std::fmt;

use crate::catalog::{AppRecord, RecordSource};
use crate::error::Result;

pub const UNKNOWN_NAME: &str = "UNKNOWN";
pub const NON_STEAM_NAME: &str = "Non-Steam shortcut";

const SHORTCUT_ID_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Override,
    Catalog,
    Unknown,
    NonSteam,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Override => "override",
            Classification::Catalog => "catalog",
            Classification::Unknown => "unknown",
            Classification::NonSteam => "non_steam",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub id: String,
    pub name: String,
    pub classification: Classification,
}

impl ResolvedEntry {
    fn from_record(record: AppRecord, classification: Classification) -> Self {
        ResolvedEntry {
            id: record.id,
            name: record.name,
            classification,
        }
    }
}

pub fn is_shortcut_id(id: &str) -> bool {
    id.len() == SHORTCUT_ID_LEN && id.bytes().all(|b| b.is_ascii_digit())
}

/// Resolves every distinct id in `ids` to exactly one entry.
///
/// Output order is: non-Steam shortcuts, override hits, catalog hits, then
/// unknowns. Fails only if the synced catalog has to be scanned and cannot be opened.
pub fn resolve<'a, I>(
    ids: I,
    overrides: &dyn RecordSource,
    catalog: &dyn RecordSource,
) -> Result<Vec<ResolvedEntry>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut resolved = Vec::new();
    let mut shortcuts: HashSet<&'a str> = HashSet::new();
    let mut lookup: HashSet<&'a str> = HashSet::new();
    // remember input order so unknowns come out deterministically
    let mut order: Vec<&'a str> = Vec::new();

    for id in ids {
        if is_shortcut_id(id) {
            if shortcuts.insert(id) {
                resolved.push(ResolvedEntry {
                    id: id.to_string(),
                    name: NON_STEAM_NAME.to_string(),
                    classification: Classification::NonSteam,
                });
            }
        } else if lookup.insert(id) {
            order.push(id);
        }
    }

    for (source, classification) in [
        (overrides, Classification::Override),
        (catalog, Classification::Catalog),
    ] {
        if lookup.is_empty() {
            return Ok(resolved);
        }
        scan(source, classification, &mut lookup, &mut resolved)?;
    }

    resolved.extend(order.into_iter().filter(|id| lookup.contains(id)).map(|id| ResolvedEntry {
        id: id.to_string(),
        name: UNKNOWN_NAME.to_string(),
        classification: Classification::Unknown,
    }));

    Ok(resolved)
}

fn scan(
    source: &dyn RecordSource,
    classification: Classification,
    lookup: &mut HashSet<&str>,
    resolved: &mut Vec<ResolvedEntry>,
) -> Result<()> {
    for record in source.records()? {
        if lookup.remove(record.id.as_str()) {
            resolved.push(ResolvedEntry::from_record(record, classification));
            if lookup.is_empty() {
                break;
            }
        }
    }
    Ok(())
}
