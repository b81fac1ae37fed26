//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, schema setup, and per-connection
//! configuration for the SQLite store file.

use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Busy timeout applied when no explicit value is configured.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Longest wait for the pool to open or hand out a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Applies connection pragmas every time the pool opens a connection.
#[derive(Debug, Clone, Copy)]
pub struct SqliteCustomizer {
    busy_timeout: Duration,
}

impl SqliteCustomizer {
    #[must_use]
    pub fn new(busy_timeout: Duration) -> Self {
        Self { busy_timeout }
    }
}

impl Default for SqliteCustomizer {
    fn default() -> Self {
        Self::new(DEFAULT_BUSY_TIMEOUT)
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqliteCustomizer {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn, self.busy_timeout)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database path.
///
/// The store file is created if it does not exist yet. Building the pool
/// opens its connections up front, so an unreachable file fails here after
/// at most `connect_timeout`.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(
    database_url: &str,
    max_size: u32,
    busy_timeout: Duration,
    connect_timeout: Duration,
) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(connect_timeout)
        .connection_customizer(Box::new(SqliteCustomizer::new(busy_timeout)))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Ensure every table exists and put the file in WAL mode.
///
/// The migrations only contain `CREATE ... IF NOT EXISTS` statements, so a
/// file that already holds the tables is adopted as is.
///
/// # Errors
/// Returns [`Error::Initialization`] if the schema cannot be applied.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .map_err(|e| Error::Initialization(e.to_string()))?;

    // WAL is a property of the file, not the connection. It cannot be
    // changed inside a transaction, so set it before migrating.
    diesel::sql_query("PRAGMA journal_mode=WAL")
        .execute(&mut conn)
        .map_err(|e| Error::Initialization(e.to_string()))?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Initialization(e.to_string()))?;
    debug!(count = applied.len(), "Applied migrations");
    Ok(())
}

/// Configure SQLite connection pragmas.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
    busy_timeout: Duration,
) -> std::result::Result<(), diesel::result::Error> {
    diesel::sql_query(format!("PRAGMA busy_timeout={}", busy_timeout.as_millis()))
        .execute(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[derive(diesel::QueryableByName)]
    struct BusyTimeout {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        timeout: i64,
    }

    fn temp_pool(dir: &tempfile::TempDir) -> DbPool {
        let path = dir.path().join("store.db");
        create_pool(path.to_str().unwrap(), 2, DEFAULT_BUSY_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
            .unwrap()
    }

    #[test]
    fn create_pool_creates_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        assert!(!path.exists());

        let pool = create_pool(
            path.to_str().unwrap(),
            1,
            DEFAULT_BUSY_TIMEOUT,
            DEFAULT_CONNECT_TIMEOUT,
        )
        .unwrap();
        assert!(pool.get().is_ok());
        assert!(path.exists());
    }

    #[test]
    fn create_pool_gives_up_after_connect_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("sub").join("store.db");
        let started = std::time::Instant::now();

        let result = create_pool(
            path.to_str().unwrap(),
            1,
            DEFAULT_BUSY_TIMEOUT,
            Duration::from_millis(200),
        );

        assert!(matches!(result, Err(Error::Connection(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn run_migrations_creates_tables() {
        let dir = tempfile::tempdir().unwrap();
        let pool = temp_pool(&dir);
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let result: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert_eq!(result, vec!["referrals", "trades", "users"]);
    }

    #[test]
    fn run_migrations_creates_referrer_index() {
        let dir = tempfile::tempdir().unwrap();
        let pool = temp_pool(&dir);
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let indexes: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='referrals'",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert!(indexes.contains(&"idx_referrals_referrer_id".to_string()));
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let pool = temp_pool(&dir);

        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
    }

    #[test]
    fn pooled_connections_get_busy_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let pool = create_pool(
            path.to_str().unwrap(),
            1,
            Duration::from_millis(1234),
            DEFAULT_CONNECT_TIMEOUT,
        )
        .unwrap();

        let mut conn = pool.get().unwrap();
        let timeout = diesel::sql_query("PRAGMA busy_timeout")
            .get_result::<BusyTimeout>(&mut conn)
            .unwrap()
            .timeout;

        assert_eq!(timeout, 1234);
    }
}
