//! Refreshes the synced catalog from the registry.
//!
//! The registry answers with `{"applist": {"apps": [{"appid": 620, "name": "Portal 2"}, ...]}}`.
//! Everything is fetched and validated in memory before the store is touched,
//! so a failed refresh leaves the previous catalog exactly as it was.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;

use super::{freshness, is_numeric_id, store, AppRecord, CatalogFile};
use crate::config::Config;
use crate::error::{Error, Result};

/// Retrieves a URL's body.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Fetches over HTTPS with a blocking reqwest client.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("decksize/", env!("CARGO_PKG_VERSION")))
            // the full app list runs to tens of megabytes, so no overall timeout
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| Error::fetch(format!("could not build http client: {e}")))?;
        Ok(HttpFetcher { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::fetch(format!("{url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::fetch(format!("HTTP {} from {url}", response.status())));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::fetch(format!("failed to read response from {url}: {e}")))?;

        Ok(bytes.to_vec())
    }
}

/// What `ensure_fresh` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    Fresh { last_update: i64 },
    Refreshed { records: usize },
}

/// Refreshes the catalog only when it is absent or older than the configured ttl.
pub fn ensure_fresh(fetcher: &dyn Fetcher, config: &Config, now: i64) -> Result<Refresh> {
    let path = config.catalog_path();
    let last_update = store::read_last_update(&path);

    if freshness::is_fresh(last_update, config.ttl, now) {
        if let Some(last_update) = last_update {
            return Ok(Refresh::Fresh { last_update });
        }
    }

    match last_update {
        Some(ts) => log::info!("app list from {} is stale, refreshing", format_timestamp(ts)),
        None => log::info!("no app list cached at {}, downloading", path.display()),
    }

    let catalog = refresh(fetcher, &config.registry_url, &path, now)?;
    Ok(Refresh::Refreshed {
        records: catalog.records.len(),
    })
}

/// Downloads the registry, validates it and rewrites the catalog at `path`.
pub fn refresh(fetcher: &dyn Fetcher, url: &str, path: &Path, now: i64) -> Result<CatalogFile> {
    let body = fetcher.fetch(url)?;
    let records = decode_app_list(&body)?;

    let catalog = CatalogFile {
        last_update: now,
        records,
    };
    store::save(path, &catalog)?;

    log::info!("saved {} apps to {}", catalog.records.len(), path.display());
    Ok(catalog)
}

/// Turns a registry response into catalog records.
///
/// Records missing an id or a name, or with either blank, are skipped. Repeated
/// ids keep their first occurrence.
pub fn decode_app_list(body: &[u8]) -> Result<Vec<AppRecord>> {
    let root: Value = serde_json::from_slice(body)?;

    let apps = root
        .pointer("/applist/apps")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::schema("missing applist.apps"))?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(apps.len());

    for raw in apps {
        let Some(id) = raw.get("appid").and_then(app_id) else {
            log::debug!("skipping app without a usable id: {raw}");
            continue;
        };

        let Some(name) = raw.get("name").and_then(app_name) else {
            log::debug!("skipping app {id} without a name");
            continue;
        };

        if !seen.insert(id.clone()) {
            log::debug!("skipping duplicate app {id} ({name})");
            continue;
        }

        records.push(AppRecord { id, name });
    }

    Ok(records)
}

fn app_id(value: &Value) -> Option<String> {
    let id = match value {
        Value::Number(n) => n.as_u64()?.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    is_numeric_id(&id).then_some(id)
}

// names end up one per line on disk, so fold any embedded whitespace runs
fn app_name(value: &Value) -> Option<String> {
    let name = value.as_str()?.split_whitespace().collect::<Vec<_>>().join(" ");
    (!name.is_empty()).then_some(name)
}

fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
