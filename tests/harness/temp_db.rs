use std::path::{Path, PathBuf};

use sniperdb::adapter::outbound::sqlite::store::SqliteStore;
use sniperdb::infrastructure::config::database::DatabaseConfig;
use sniperdb::port::outbound::store::UserStore;
use tempfile::TempDir;

/// Temporary SQLite store for integration tests.
///
/// The backing file lives in its own temp directory, removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    store: SqliteStore,
}

impl TempDb {
    /// Create an initialized store.
    pub async fn create() -> Self {
        Self::create_with_pool(5).await
    }

    pub async fn create_with_pool(pool_size: u32) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("users.db");
        let config = DatabaseConfig {
            pool_size,
            ..DatabaseConfig::with_path(path.to_string_lossy())
        };

        let store = SqliteStore::open(&config).expect("open sqlite store");
        store.initialize().await.expect("initialize store");

        Self {
            _dir: dir,
            path,
            store,
        }
    }

    /// Directory-owned path for tests that prepare the file themselves.
    pub fn empty() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("users.db");
        (dir, path)
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
