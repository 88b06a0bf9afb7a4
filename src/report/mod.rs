pub mod table;

use std::io::{self, Write};

use crate::scan::size::SizeProbe;
use crate::scan::LocationResult;

pub const NO_LOCATIONS: &str = "No Steam data locations found.";

/// Renders every location to `out`, in the order given.
pub fn write(out: &mut dyn Write, results: &[LocationResult], probe: &dyn SizeProbe) -> io::Result<()> {
    if results.is_empty() {
        writeln!(out, "{NO_LOCATIONS}")?;
        return Ok(());
    }

    for result in results {
        out.write_all(table::render(result, probe).as_bytes())?;
        out.flush()?;
    }

    Ok(())
}
