//! Plain-text rendering of per-location app usage.
//!
//! One block per data location:
//! - a header naming the directory
//! - one line per app: size, id, name
//! - or a single "no apps found" line

use std::path::Path;

use crate::scan::size::SizeProbe;
use crate::scan::LocationResult;

pub const SIZE_PLACEHOLDER: &str = "??";
pub const NO_APPS: &str = "no apps found";

const SIZE_WIDTH: usize = 8;
const ID_WIDTH: usize = 12;

pub fn render(result: &LocationResult, probe: &dyn SizeProbe) -> String {
    let mut output = format!("\n{}\n", result.path.display());

    if result.entries.is_empty() {
        output.push_str(&format!("  {NO_APPS}\n"));
        return output;
    }

    for entry in &result.entries {
        let size = probe_size(probe, &result.path.join(&entry.id));
        output.push_str(&format!(
            "{:>sw$} {:>iw$}  {}\n",
            size,
            entry.id,
            entry.name,
            sw = SIZE_WIDTH,
            iw = ID_WIDTH
        ));
    }

    output
}

fn probe_size(probe: &dyn SizeProbe, path: &Path) -> String {
    match probe.size(path) {
        Ok(size) => size,
        Err(e) => {
            log::debug!("{e}");
            SIZE_PLACEHOLDER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::scan::resolve::{Classification, ResolvedEntry};
    use std::path::PathBuf;

    struct FixedProbe;

    impl SizeProbe for FixedProbe {
        fn size(&self, path: &Path) -> Result<String> {
            match path.file_name().and_then(|n| n.to_str()) {
                Some("620") => Ok("1.2G".to_string()),
                _ => Err(Error::probe("no size")),
            }
        }
    }

    fn entry(id: &str, name: &str) -> ResolvedEntry {
        ResolvedEntry {
            id: id.to_string(),
            name: name.to_string(),
            classification: Classification::Catalog,
        }
    }

    #[test]
    fn renders_aligned_rows_with_placeholder() {
        let result = LocationResult {
            path: PathBuf::from("/run/media/sd/steamapps/compatdata"),
            entries: vec![entry("620", "Portal 2"), entry("999", "UNKNOWN")],
        };

        let rendered = render(&result, &FixedProbe);

        assert_eq!(
            rendered,
            "\n/run/media/sd/steamapps/compatdata\n\
             \x20   1.2G          620  Portal 2\n\
             \x20     ??          999  UNKNOWN\n"
        );
    }

    #[test]
    fn empty_location_says_so() {
        let result = LocationResult {
            path: PathBuf::from("/home/deck/.steam/steam/steamapps/downloading"),
            entries: vec![],
        };

        let rendered = render(&result, &FixedProbe);

        assert_eq!(rendered, "\n/home/deck/.steam/steam/steamapps/downloading\n  no apps found\n");
    }
}
