//! Diary files from Dropbox, served from the local cache when fresh.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::api::{DropboxRemote, RemoteFiles};
use crate::cache::FileCache;
use crate::config::DropboxConfig;

/// How a read may be satisfied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Skip the cache and always download
    pub fresh: bool,
    /// Serve an expired cached copy if the download fails
    pub allow_stale: bool,
    /// Treat a file missing on the remote as empty
    pub missing_ok: bool,
}

pub struct DiaryStore<R> {
    cache: FileCache,
    remote: R,
}

impl DiaryStore<DropboxRemote> {
    pub fn dropbox(config: &DropboxConfig, cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache = FileCache::new(cache_dir, Duration::from_secs(config.cache_timeout));
        let remote = DropboxRemote::new(config.clone())?;
        Ok(DiaryStore::new(cache, remote))
    }
}

impl<R: RemoteFiles> DiaryStore<R> {
    pub fn new(cache: FileCache, remote: R) -> Self {
        DiaryStore { cache, remote }
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    pub async fn read(&self, name: &str, options: ReadOptions) -> Result<String> {
        if !options.fresh {
            if let Some(content) = self.cache.read_fresh(name)? {
                return Ok(content);
            }
        }

        match self.remote.download(name).await {
            Ok(Some(content)) => {
                self.cache.write(name, &content)?;
                Ok(content)
            }
            Ok(None) if options.missing_ok => {
                debug!(name, "missing on remote, using empty content");
                Ok(String::new())
            }
            Ok(None) => anyhow::bail!("{} does not exist in Dropbox", name),
            Err(err) if options.allow_stale => match self.cache.read(name)? {
                Some(stale) => {
                    warn!(
                        "Could not download {} ({:#}), using cached copy from {} ago",
                        name,
                        err,
                        humantime::format_duration(Duration::from_secs(stale.age.as_secs()))
                    );
                    Ok(stale.content)
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    pub async fn write(&self, name: &str, content: &str) -> Result<()> {
        self.remote
            .upload(name, content)
            .await
            .with_context(|| format!("Failed to write {}", name))?;
        self.cache.write(name, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeRemote {
        files: Mutex<HashMap<String, String>>,
        offline: bool,
        downloads: AtomicUsize,
    }

    impl FakeRemote {
        fn with_file(name: &str, content: &str) -> Self {
            let remote = FakeRemote::default();
            remote
                .files
                .lock()
                .unwrap()
                .insert(name.to_string(), content.to_string());
            remote
        }

        fn offline() -> Self {
            FakeRemote {
                offline: true,
                ..FakeRemote::default()
            }
        }
    }

    impl RemoteFiles for FakeRemote {
        async fn download(&self, name: &str) -> Result<Option<String>> {
            self.downloads.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                anyhow::bail!("network is down");
            }
            Ok(self.files.lock().unwrap().get(name).cloned())
        }

        async fn upload(&self, name: &str, content: &str) -> Result<()> {
            if self.offline {
                anyhow::bail!("network is down");
            }
            self.files
                .lock()
                .unwrap()
                .insert(name.to_string(), content.to_string());
            Ok(())
        }
    }

    fn store(dir: &tempfile::TempDir, ttl_secs: u64, remote: FakeRemote) -> DiaryStore<FakeRemote> {
        DiaryStore::new(FileCache::new(dir.path(), Duration::from_secs(ttl_secs)), remote)
    }

    #[tokio::test]
    async fn test_download_fills_cache_and_cache_serves_next_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 3600, FakeRemote::with_file("diary.txt", "20240101\tA"));

        let first = store.read("diary.txt", ReadOptions::default()).await.unwrap();
        let second = store.read("diary.txt", ReadOptions::default()).await.unwrap();

        assert_eq!(first, "20240101\tA");
        assert_eq!(second, first);
        assert_eq!(store.remote.downloads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fresh_read_bypasses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 3600, FakeRemote::with_file("diary.txt", "remote"));
        store.cache.write("diary.txt", "cached").unwrap();

        let options = ReadOptions {
            fresh: true,
            ..ReadOptions::default()
        };
        assert_eq!(store.read("diary.txt", options).await.unwrap(), "remote");
        assert_eq!(store.cache.read("diary.txt").unwrap().unwrap().content, "remote");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 3600, FakeRemote::default());

        assert!(store.read("diary.txt", ReadOptions::default()).await.is_err());

        let options = ReadOptions {
            missing_ok: true,
            ..ReadOptions::default()
        };
        assert_eq!(store.read("diary.txt", options).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_stale_copy_only_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        // A zero TTL makes every cached copy stale
        let store = store(&dir, 0, FakeRemote::offline());
        store.cache.write("diary.txt", "old").unwrap();

        assert!(store.read("diary.txt", ReadOptions::default()).await.is_err());

        let options = ReadOptions {
            allow_stale: true,
            ..ReadOptions::default()
        };
        assert_eq!(store.read("diary.txt", options).await.unwrap(), "old");
    }

    #[tokio::test]
    async fn test_stale_fallback_without_cache_reports_remote_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 0, FakeRemote::offline());

        let options = ReadOptions {
            allow_stale: true,
            ..ReadOptions::default()
        };
        let err = store.read("diary.txt", options).await.unwrap_err();
        assert!(err.to_string().contains("network is down"));
    }

    #[tokio::test]
    async fn test_write_updates_remote_and_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir, 3600, FakeRemote::default());

        store.write("diary.txt", "20240101\tNew").await.unwrap();

        assert_eq!(
            store.remote.files.lock().unwrap().get("diary.txt").map(String::as_str),
            Some("20240101\tNew")
        );
        assert_eq!(
            store.read("diary.txt", ReadOptions::default()).await.unwrap(),
            "20240101\tNew"
        );
    }
}
