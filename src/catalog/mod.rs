//! App catalogs: the app list synced from the registry and the hand-maintained overrides.
//!
//! Both share one line format, `<numeric id> <name>`. The synced catalog adds a
//! leading line holding the unix time of its last refresh.

pub mod freshness;
pub mod store;
pub mod update;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRecord {
    pub id: String,
    pub name: String,
}

impl AppRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        AppRecord {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFile {
    pub last_update: i64,
    pub records: Vec<AppRecord>,
}

/// Something the resolver can scan for app records, in file order.
pub trait RecordSource {
    fn records(&self) -> Result<Box<dyn Iterator<Item = AppRecord> + '_>>;
}

impl RecordSource for CatalogFile {
    fn records(&self) -> Result<Box<dyn Iterator<Item = AppRecord> + '_>> {
        Ok(Box::new(self.records.iter().cloned()))
    }
}

pub fn is_numeric_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses one `<id> <name>` line. Returns None for anything malformed.
pub fn parse_record(line: &str) -> Option<AppRecord> {
    let line = line.trim_start_matches('\u{feff}').trim_end_matches(['\r', '\n']);
    let (id, name) = line.split_once(' ')?;
    let id = id.trim();
    let name = name.trim();

    if !is_numeric_id(id) || name.is_empty() {
        return None;
    }

    Some(AppRecord::new(id, name))
}

pub fn format_record(record: &AppRecord) -> String {
    format!("{} {}", record.id, record.name)
}
