//! Cache for a previous run's data source output.

use crate::record::Record;
use crate::source::DataSource;
use anyhow::Context;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Default freshness window: one day.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Stores and returns the raw record list between runs.
pub trait ResultCache {
    /// `Ok(None)` on a miss (absent, stale or refresh forced).
    fn load(&self) -> anyhow::Result<Option<Vec<Record>>>;
    fn store(&self, records: &[Record]) -> anyhow::Result<()>;
}

/// JSON file cache, fresh while its mtime is within `max_age`.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    pub path: PathBuf,
    pub max_age: Duration,
    /// Treat every lookup as a miss; the next store overwrites the file.
    pub refresh: bool,
}

impl JsonFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: DEFAULT_MAX_AGE,
            refresh: false,
        }
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    fn is_fresh(&self) -> anyhow::Result<bool> {
        let meta = match fs::metadata(&self.path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(e).with_context(|| format!("stat cache file {}", self.path.display()));
            }
        };
        let modified = meta
            .modified()
            .with_context(|| format!("mtime of cache file {}", self.path.display()))?;
        // A clock skewed into the future counts as fresh.
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        Ok(age <= self.max_age)
    }
}

impl ResultCache for JsonFileCache {
    fn load(&self) -> anyhow::Result<Option<Vec<Record>>> {
        if self.refresh {
            tracing::debug!("forcing refresh of cache {}", self.path.display());
            return Ok(None);
        }
        if !self.is_fresh()? {
            tracing::debug!("cache {} is missing or stale", self.path.display());
            return Ok(None);
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read cache file {}", self.path.display()))?;
        let records: Vec<Record> = serde_json::from_str(&text)
            .with_context(|| format!("decode cache file {}", self.path.display()))?;
        tracing::debug!(records = records.len(), "using cache {}", self.path.display());
        Ok(Some(records))
    }

    fn store(&self, records: &[Record]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)
            .with_context(|| format!("write cache file {}", self.path.display()))?;
        Ok(())
    }
}

/// Return the cached list on a hit, otherwise fetch from `source` and cache it.
pub fn fetch_with_cache(cache: &dyn ResultCache, source: &dyn DataSource) -> anyhow::Result<Vec<Record>> {
    if let Some(records) = cache.load()? {
        return Ok(records);
    }
    let records = source.fetch()?;
    cache.store(&records)?;
    Ok(records)
}
