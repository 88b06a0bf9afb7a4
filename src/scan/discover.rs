//! Finds the directories that hold per-app subfolders.
//!
//! Checks the internal library first, then every volume under the mount root
//! that carries its own library folder.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::catalog::is_numeric_id;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform;

/// Library subdirectories keyed by app id, in reporting order.
pub const CANDIDATES: [&str; 3] = ["shadercache", "compatdata", "downloading"];

/// Read-only view of the filesystem used by discovery.
pub trait DirLister {
    /// Names of the entries directly inside `dir`, sorted.
    fn list(&self, dir: &Path) -> io::Result<Vec<String>>;

    fn is_dir(&self, path: &Path) -> bool;
}

pub struct FsLister;

impl DirLister for FsLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => log::debug!("skipping non-utf8 entry {raw:?} in {}", dir.display()),
            }
        }
        names.sort();
        Ok(names)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Where to look for libraries.
#[derive(Debug, Clone)]
pub struct Layout {
    pub library_root: PathBuf,
    pub mount_root: PathBuf,
    pub reserved_mounts: Vec<String>,
}

impl Layout {
    pub fn from_config(config: &Config) -> Self {
        Layout {
            library_root: config.library_root(),
            mount_root: config.mount_root.clone(),
            reserved_mounts: config.reserved_mounts.clone(),
        }
    }
}

pub fn discover(layout: &Layout, lister: &dyn DirLister) -> Result<Vec<PathBuf>> {
    let mut locations = Vec::new();
    push_candidates(&layout.library_root, lister, &mut locations);

    let mounts = match lister.list(&layout.mount_root) {
        Ok(names) => names,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no mount root at {}, internal storage only", layout.mount_root.display());
            return Ok(locations);
        }
        Err(e) => {
            return Err(Error::discovery(format!("{}: {e}", layout.mount_root.display())));
        }
    };

    for mount in mounts {
        if layout.reserved_mounts.iter().any(|r| *r == mount) {
            continue;
        }

        let library = layout.mount_root.join(&mount).join(platform::VOLUME_LIBRARY);
        if !lister.is_dir(&library) {
            log::debug!("{} has no steam library", layout.mount_root.join(&mount).display());
            continue;
        }

        push_candidates(&library, lister, &mut locations);
    }

    Ok(locations)
}

fn push_candidates(library: &Path, lister: &dyn DirLister, out: &mut Vec<PathBuf>) {
    for name in CANDIDATES {
        let dir = library.join(name);
        if lister.is_dir(&dir) {
            out.push(dir);
        }
    }
}

/// App ids found in one data location, in listing order, without repeats.
pub fn list_ids(location: &Path, lister: &dyn DirLister) -> Result<Vec<String>> {
    let names = lister
        .list(location)
        .map_err(|e| Error::listing(format!("{}: {e}", location.display())))?;

    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        if !is_numeric_id(&name) {
            log::debug!("ignoring {name} in {}", location.display());
            continue;
        }
        if seen.insert(name.clone()) {
            ids.push(name);
        }
    }

    Ok(ids)
}
