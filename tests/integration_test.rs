use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use decksize::app::{self, Capabilities};
use decksize::catalog::store;
use decksize::catalog::update::Fetcher;
use decksize::config::Config;
use decksize::scan::discover::FsLister;
use decksize::scan::size::SizeProbe;
use decksize::{Error, Result};

const APP_LIST: &str = r#"{"applist":{"apps":[
    {"appid":620,"name":"Portal 2"},
    {"appid":1145360,"name":"Hades"}
]}}"#;

struct CannedFetcher {
    body: Option<&'static str>,
    calls: Cell<usize>,
}

impl Fetcher for CannedFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.set(self.calls.get() + 1);
        self.body
            .map(|b| b.as_bytes().to_vec())
            .ok_or_else(|| Error::fetch(format!("{url}: unreachable")))
    }
}

struct NameLengthProbe;

impl SizeProbe for NameLengthProbe {
    fn size(&self, path: &Path) -> Result<String> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        Ok(format!("{}K", name.len()))
    }
}

struct Fixture {
    _dir: TempDir,
    config: Config,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    let mut config = Config::defaults(root.join("home"), root.join("cache"), &root.join("config"));
    config.mount_root = root.join("media");

    for app in ["620", "1234567890"] {
        fs::create_dir_all(root.join("home/.steam/steam/steamapps/compatdata").join(app)).unwrap();
    }
    fs::create_dir_all(root.join("home/.steam/steam/steamapps/shadercache")).unwrap();
    fs::create_dir_all(root.join("media/deck/steamapps/compatdata/70")).unwrap();
    fs::create_dir_all(root.join("media/sdcard/steamapps/shadercache/1145360")).unwrap();
    fs::create_dir_all(root.join("media/sdcard/steamapps/shadercache/999")).unwrap();

    fs::create_dir_all(root.join("config")).unwrap();
    fs::write(root.join("config/overrides.txt"), "1145360 Hades (modded)\n").unwrap();

    Fixture { _dir: dir, config }
}

fn run(config: &Config, fetcher: &CannedFetcher, now: i64) -> (Result<()>, String) {
    let caps = Capabilities {
        fetcher,
        lister: &FsLister,
        probe: &NameLengthProbe,
    };
    let mut out = Vec::new();
    let result = app::run(config, &caps, &mut out, now);
    (result, String::from_utf8(out).unwrap())
}

fn rel(config: &Config, path: &str) -> PathBuf {
    config.home.parent().unwrap().join(path)
}

#[test]
fn first_run_downloads_catalog_and_reports_every_location() {
    let fx = fixture();
    let fetcher = CannedFetcher { body: Some(APP_LIST), calls: Cell::new(0) };

    let (result, output) = run(&fx.config, &fetcher, 1_700_000_000);

    result.unwrap();
    assert_eq!(fetcher.calls.get(), 1);
    assert_eq!(store::read_last_update(&fx.config.catalog_path()), Some(1_700_000_000));

    let compatdata = rel(&fx.config, "home/.steam/steam/steamapps/compatdata");
    let shadercache = rel(&fx.config, "home/.steam/steam/steamapps/shadercache");
    let sdcard = rel(&fx.config, "media/sdcard/steamapps/shadercache");

    let blocks: Vec<&str> = output.split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].trim_start(), format!("{}\n  no apps found", shadercache.display()));
    assert_eq!(
        blocks[1],
        format!(
            "{}\n{:>8} {:>12}  {}\n{:>8} {:>12}  {}",
            compatdata.display(),
            "10K", "1234567890", "Non-Steam shortcut",
            "3K", "620", "Portal 2",
        )
    );
    assert_eq!(
        blocks[2],
        format!(
            "{}\n{:>8} {:>12}  {}\n{:>8} {:>12}  {}\n",
            sdcard.display(),
            "7K", "1145360", "Hades (modded)",
            "3K", "999", "UNKNOWN",
        )
    );
    assert!(!output.contains("media/deck"));
}

#[test]
fn fresh_catalog_is_not_downloaded_again() {
    let fx = fixture();
    let fetcher = CannedFetcher { body: Some(APP_LIST), calls: Cell::new(0) };

    run(&fx.config, &fetcher, 1_700_000_000).0.unwrap();
    run(&fx.config, &fetcher, 1_700_000_000 + 3_600).0.unwrap();

    assert_eq!(fetcher.calls.get(), 1);
}

#[test]
fn refresh_failure_aborts_without_output() {
    let fx = fixture();
    let fetcher = CannedFetcher { body: None, calls: Cell::new(0) };

    let (result, output) = run(&fx.config, &fetcher, 1_700_000_000);

    assert!(matches!(result, Err(Error::Fetch(_))));
    assert!(output.is_empty());
}

#[test]
fn stale_catalog_is_not_used_when_refresh_fails() {
    let fx = fixture();
    let good = CannedFetcher { body: Some(APP_LIST), calls: Cell::new(0) };
    run(&fx.config, &good, 1_700_000_000).0.unwrap();

    let down = CannedFetcher { body: None, calls: Cell::new(0) };
    let ttl = fx.config.ttl.as_secs() as i64;
    let (result, _) = run(&fx.config, &down, 1_700_000_000 + ttl);

    assert!(matches!(result, Err(Error::Fetch(_))));
    assert_eq!(store::read_last_update(&fx.config.catalog_path()), Some(1_700_000_000));
}

#[test]
fn no_locations_is_still_success() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::defaults(
        dir.path().join("home"),
        dir.path().join("cache"),
        &dir.path().join("config"),
    );
    config.mount_root = dir.path().join("media");
    let fetcher = CannedFetcher { body: Some(APP_LIST), calls: Cell::new(0) };

    let (result, output) = run(&config, &fetcher, 1_700_000_000);

    result.unwrap();
    assert_eq!(output, "No Steam data locations found.\n");
}
