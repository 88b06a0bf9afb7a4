//! One full run: refresh the catalog if needed, find data locations, resolve, report.

use std::fs;
use std::io::Write;

use crate::catalog::store::CatalogReader;
use crate::catalog::update::{self, Fetcher, Refresh};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::report;
use crate::scan::{self, discover::{self, DirLister, Layout}, size::SizeProbe};

/// The outside-world capabilities a run needs.
pub struct Capabilities<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub lister: &'a dyn DirLister,
    pub probe: &'a dyn SizeProbe,
}

pub fn run(config: &Config, caps: &Capabilities<'_>, out: &mut dyn Write, now: i64) -> Result<()> {
    fs::create_dir_all(&config.cache_dir).map_err(|e| {
        Error::environment(format!("cannot create cache directory {}: {e}", config.cache_dir.display()))
    })?;

    match update::ensure_fresh(caps.fetcher, config, now)? {
        Refresh::Fresh { last_update } => {
            log::debug!("app list is fresh ({}s old)", now.saturating_sub(last_update));
        }
        Refresh::Refreshed { records } => {
            log::info!("app list refreshed with {records} apps");
        }
    }

    let locations = discover::discover(&Layout::from_config(config), caps.lister)?;
    log::debug!("found {} data locations", locations.len());

    let overrides = CatalogReader::overrides(&config.override_catalog);
    let catalog = CatalogReader::synced(config.catalog_path());
    let results = scan::run(&locations, caps.lister, &overrides, &catalog)?;

    report::write(out, &results, caps.probe)?;
    Ok(())
}
