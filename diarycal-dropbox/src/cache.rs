//! Local copies of downloaded diary files.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// A cached file and how long ago it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFile {
    pub content: String,
    pub age: Duration,
}

/// Files stored by name under one directory, trusted for `ttl`.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    ttl: Duration,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        FileCache {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Read a cached file regardless of its age.
    pub fn read(&self, name: &str) -> Result<Option<CachedFile>> {
        let path = self.path(name);

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cached file {}", path.display()))?;

        let age = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .map(|modified| SystemTime::now().duration_since(modified).unwrap_or_default())
            .with_context(|| format!("Failed to read modification time of {}", path.display()))?;

        Ok(Some(CachedFile { content, age }))
    }

    /// Read a cached file only if it is within the freshness window.
    pub fn read_fresh(&self, name: &str) -> Result<Option<String>> {
        let Some(cached) = self.read(name)? else {
            debug!(name, "not in cache");
            return Ok(None);
        };

        if !self.is_fresh(&cached) {
            debug!(
                name,
                age = %humantime::format_duration(cached.age),
                "cached copy has expired"
            );
            return Ok(None);
        }

        info!("Read {} from cache ({})", name, self.dir.display());
        Ok(Some(cached.content))
    }

    /// A zero TTL means nothing is ever fresh.
    pub fn is_fresh(&self, cached: &CachedFile) -> bool {
        !self.ttl.is_zero() && cached.age <= self.ttl
    }

    pub fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.path(name);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create cache directory {}", parent.display()))?;
        }

        info!("Write {} to cache ({})", name, self.dir.display());
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write cached file {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), Duration::from_secs(60));

        assert_eq!(cache.read("diary.txt").unwrap(), None);
        assert_eq!(cache.read_fresh("diary.txt").unwrap(), None);
    }

    #[test]
    fn test_write_then_read_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("nested"), Duration::from_secs(3600));

        cache.write("diary.txt", "20240101\tNew year").unwrap();

        assert_eq!(
            cache.read_fresh("diary.txt").unwrap().as_deref(),
            Some("20240101\tNew year")
        );
    }

    #[test]
    fn test_zero_ttl_never_fresh_but_still_readable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path(), Duration::ZERO);

        cache.write("diary.txt", "content").unwrap();

        assert_eq!(cache.read_fresh("diary.txt").unwrap(), None);
        let stale = cache.read("diary.txt").unwrap().unwrap();
        assert_eq!(stale.content, "content");
    }

    #[test]
    fn test_is_fresh_compares_age_to_ttl() {
        let cache = FileCache::new("/unused", Duration::from_secs(10));
        let file = |secs| CachedFile {
            content: String::new(),
            age: Duration::from_secs(secs),
        };

        assert!(cache.is_fresh(&file(10)));
        assert!(!cache.is_fresh(&file(11)));
    }
}
