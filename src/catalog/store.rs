//! On-disk catalog files.
//!
//! A missing or unreadable catalog is reported as absent, never as an error.
//! Writes go through a temp file in the same directory that is then persisted
//! over the target, so a reader sees either the old or the new catalog.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{format_record, parse_record, AppRecord, CatalogFile, RecordSource};
use crate::error::{Error, Result};

pub fn load(path: &Path) -> Option<CatalogFile> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            log::debug!("catalog {} not loaded: {e}", path.display());
            return None;
        }
    };

    let mut reader = BufReader::new(file);
    let mut header = Vec::new();
    reader.read_until(b'\n', &mut header).ok()?;
    let last_update = parse_timestamp(std::str::from_utf8(&header).ok()?)?;
    let records = record_lines(reader, path.to_path_buf(), 0).collect();

    Some(CatalogFile { last_update, records })
}

pub fn save(path: &Path, catalog: &CatalogFile) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    {
        let mut out = io::BufWriter::new(tmp.as_file_mut());
        writeln!(out, "{}", catalog.last_update)?;
        for record in &catalog.records {
            writeln!(out, "{}", format_record(record))?;
        }
        out.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    Ok(())
}

/// Reads only the header line. The record set is never touched, so this stays
/// cheap no matter how large the catalog is.
pub fn read_last_update(path: &Path) -> Option<i64> {
    let file = File::open(path).ok()?;
    let mut header = String::new();
    BufReader::new(file).read_line(&mut header).ok()?;
    parse_timestamp(&header)
}

fn parse_timestamp(line: &str) -> Option<i64> {
    line.trim().parse().ok()
}

/// Records from a catalog body, one per line.
///
/// Lines are split on raw bytes so an undecodable line is skipped on its own;
/// only a read error ends the stream.
fn record_lines<R: BufRead>(reader: R, path: PathBuf, skip: usize) -> impl Iterator<Item = AppRecord> {
    reader
        .split(b'\n')
        .skip(skip)
        .map_while(move |line| match line {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("stopped reading {}: {e}", path.display());
                None
            }
        })
        .filter_map(|bytes| match String::from_utf8(bytes) {
            Ok(line) => keep_record(&line),
            Err(e) => {
                log::debug!("skipping catalog line that is not utf-8: {:?}", String::from_utf8_lossy(e.as_bytes()));
                None
            }
        })
}

fn keep_record(line: &str) -> Option<AppRecord> {
    if line.trim().is_empty() {
        return None;
    }
    let record = parse_record(line);
    if record.is_none() {
        log::debug!("skipping malformed catalog line: {line:?}");
    }
    record
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderKind {
    Synced,
    Overrides,
}

/// Streams records straight from a catalog file.
///
/// Nothing is opened until `records` is called, and the file is read lazily,
/// so a scan that stops early never reads the rest of the file.
#[derive(Debug, Clone)]
pub struct CatalogReader {
    path: PathBuf,
    kind: ReaderKind,
}

impl CatalogReader {
    /// The synced app list. The header line is skipped; failing to open is fatal.
    pub fn synced(path: impl Into<PathBuf>) -> Self {
        CatalogReader {
            path: path.into(),
            kind: ReaderKind::Synced,
        }
    }

    /// The override list. No header; a missing file reads as empty.
    pub fn overrides(path: impl Into<PathBuf>) -> Self {
        CatalogReader {
            path: path.into(),
            kind: ReaderKind::Overrides,
        }
    }
}

impl RecordSource for CatalogReader {
    fn records(&self) -> Result<Box<dyn Iterator<Item = AppRecord> + '_>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                return match self.kind {
                    ReaderKind::Synced => Err(Error::catalog_unavailable(format!(
                        "{}: {e}",
                        self.path.display()
                    ))),
                    ReaderKind::Overrides => {
                        log::debug!("no override catalog at {} ({e}), using none", self.path.display());
                        Ok(Box::new(std::iter::empty()))
                    }
                };
            }
        };

        let skip = match self.kind {
            ReaderKind::Synced => 1,
            ReaderKind::Overrides => 0,
        };

        Ok(Box::new(record_lines(BufReader::new(file), self.path.clone(), skip)))
    }
}
