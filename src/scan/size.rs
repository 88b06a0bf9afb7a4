//! Directory size probes.

use std::path::Path;
use std::process::Command;

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::util::format_bytes;

/// Reports a human-readable size for a directory.
pub trait SizeProbe {
    fn size(&self, path: &Path) -> Result<String>;
}

/// Runs `du -sh` and reports its first column.
pub struct DuProbe;

impl SizeProbe for DuProbe {
    fn size(&self, path: &Path) -> Result<String> {
        let output = Command::new("du")
            .arg("-sh")
            .arg(path)
            .output()
            .map_err(|e| Error::probe(format!("failed to run du: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::probe(format!(
                "du failed for {} with status {}: {}",
                path.display(),
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        parse_du_output(&String::from_utf8_lossy(&output.stdout))
            .ok_or_else(|| Error::probe(format!("unexpected du output for {}", path.display())))
    }
}

// du prints "<size>\t<path>". only the first field of the first line matters;
// anything past that (extra lines, odd locales) is ignored.
fn parse_du_output(stdout: &str) -> Option<String> {
    let line = stdout.lines().next()?;
    let size = line.split(['\t', ' ']).next()?.trim();
    (!size.is_empty()).then(|| size.to_string())
}

/// Walks the tree in-process and sums file sizes.
pub struct WalkProbe;

impl SizeProbe for WalkProbe {
    fn size(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(Error::probe(format!("{} does not exist", path.display())));
        }

        Ok(format_bytes(tree_bytes(path)))
    }
}

// unreadable subtrees are left out of the total, so the result is a lower bound
fn tree_bytes(root: &Path) -> u64 {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                let at = e.path().unwrap_or(root).display().to_string();
                log::debug!("size of {} skips {at}: {e}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .fold(0u64, |total, metadata| total.saturating_add(metadata.len()))
}
