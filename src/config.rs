use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::platform;

pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_REGISTRY_URL: &str = "https://api.steampowered.com/ISteamApps/GetAppList/v2/";
pub const CATALOG_FILE: &str = "applist.txt";
pub const OVERRIDE_FILE: &str = "overrides.txt";
pub const CONFIG_FILE: &str = "config.toml";

/// How per-app directory sizes are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Shell out to `du -sh`.
    Du,
    /// Walk the tree in-process.
    Walk,
}

pub struct Config {
    pub home: PathBuf,
    pub ttl: Duration,
    pub registry_url: String,
    pub cache_dir: PathBuf,
    pub override_catalog: PathBuf,
    pub mount_root: PathBuf,
    pub reserved_mounts: Vec<String>,
    pub size_probe: ProbeKind,
}

/// Optional overrides read from config.toml. Every field falls back to the built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    ttl: Option<String>,
    registry_url: Option<String>,
    cache_dir: Option<PathBuf>,
    override_catalog: Option<PathBuf>,
    mount_root: Option<PathBuf>,
    reserved_mounts: Option<Vec<String>>,
    size_probe: Option<ProbeKind>,
}

impl Config {
    /// Built-in defaults for a given home directory and per-user tool directories.
    pub fn defaults(home: PathBuf, cache_dir: PathBuf, config_dir: &Path) -> Self {
        Config {
            home,
            ttl: DEFAULT_TTL,
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            cache_dir,
            override_catalog: config_dir.join(OVERRIDE_FILE),
            mount_root: PathBuf::from(platform::MOUNT_ROOT),
            reserved_mounts: platform::RESERVED_MOUNTS.iter().map(|s| s.to_string()).collect(),
            size_probe: ProbeKind::Du,
        }
    }

    /// Defaults for this user, overlaid with config.toml when one exists.
    pub fn load() -> Result<Self> {
        let home = platform::home_dir()
            .ok_or_else(|| Error::environment("HOME is not set"))?;

        let dirs = directories::ProjectDirs::from("", "", "decksize")
            .ok_or_else(|| Error::environment("could not determine cache and config directories"))?;

        let mut config = Config::defaults(home, dirs.cache_dir().to_path_buf(), dirs.config_dir());

        let config_path = dirs.config_dir().join(CONFIG_FILE);
        match fs::read_to_string(&config_path) {
            Ok(contents) => {
                log::debug!("loading config from {}", config_path.display());
                config.apply_toml(&contents)?;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::config(format!("cannot read {}: {e}", config_path.display())));
            }
        }

        Ok(config)
    }

    pub fn apply_toml(&mut self, contents: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(contents)
            .map_err(|e| Error::config(e.to_string()))?;

        if let Some(ttl) = file.ttl {
            self.ttl = humantime::parse_duration(&ttl)
                .map_err(|e| Error::config(format!("ttl '{ttl}': {e}")))?;
        }
        if let Some(url) = file.registry_url {
            self.registry_url = url;
        }
        if let Some(dir) = file.cache_dir {
            self.cache_dir = dir;
        }
        if let Some(path) = file.override_catalog {
            self.override_catalog = path;
        }
        if let Some(root) = file.mount_root {
            self.mount_root = root;
        }
        if let Some(reserved) = file.reserved_mounts {
            self.reserved_mounts = reserved;
        }
        if let Some(probe) = file.size_probe {
            self.size_probe = probe;
        }

        Ok(())
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.cache_dir.join(CATALOG_FILE)
    }

    pub fn library_root(&self) -> PathBuf {
        self.home.join(platform::STEAM_LIBRARY)
    }
}
