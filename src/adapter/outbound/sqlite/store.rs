//! SQLite user store implementation.
//!
//! Provides persistent storage for bot users, their trade log and the
//! referral graph using SQLite and Diesel ORM. Each operation checks out a
//! pooled connection, runs its statement and commits before returning.

use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use tracing::{debug, info, warn};

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::database::model::{
    NewReferralRow, NewTradeRow, NewUserRow, ReferralRow, TradeRow, UserChangeset, UserRow,
};
use crate::adapter::outbound::sqlite::database::schema::{referrals, trades, users};
use crate::domain::{
    dedup_referred, render_referred, NewTrade, NewUser, Referral, Trade, UpdateOutcome, User,
    UserPatch,
};
use crate::error::{Error, Result};
use crate::infrastructure::config::database::DatabaseConfig;
use crate::port::outbound::store::UserStore;

type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

/// SQLite-backed user store.
///
/// Implements the [`UserStore`] trait. Cloning is cheap and shares the
/// underlying connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (and create if needed) the store file described by `config`.
    ///
    /// The schema is not touched; call [`UserStore::initialize`] afterwards.
    ///
    /// # Errors
    /// Returns [`Error::Initialization`] if the file cannot be opened.
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let pool = create_pool(
            &config.path,
            config.pool_size,
            config.busy_timeout(),
            config.connect_timeout(),
        )
        .map_err(|e| Error::Initialization(e.to_string()))?;
        Ok(Self::new(pool))
    }

    fn conn(&self) -> Result<SqlitePooledConnection> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }

    /// All referral events recorded for `referrer_id`, oldest first.
    ///
    /// Rows without a referred id are skipped.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn list_referrals(&self, referrer_id: i64) -> Result<Vec<Referral>> {
        let mut conn = self.conn()?;

        let rows: Vec<ReferralRow> = referrals::table
            .filter(referrals::referrer_id.eq(referrer_id))
            .filter(referrals::referred_id.is_not_null())
            .order(referrals::id.asc())
            .select(ReferralRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows.into_iter().filter_map(ReferralRow::into_referral).collect())
    }
}

fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i32> {
    diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result::<LastInsertRowId>(conn)
        .map(|row| row.id)
}

impl UserStore for SqliteStore {
    async fn initialize(&self) -> Result<()> {
        run_migrations(&self.pool).map_err(|e| {
            warn!(error = %e, "Store initialization failed");
            e
        })?;
        info!("User store initialized");
        Ok(())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<()> {
        let row = NewUserRow::from(user);
        let mut conn = self.conn()?;

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    Error::DuplicateUser {
                        user_id: user.user_id.clone(),
                    }
                }
                other => {
                    warn!(user_id = %user.user_id, error = %other, "Failed to insert user");
                    Error::Database(other.to_string())
                }
            })?;

        debug!(user_id = %user.user_id, "Inserted user");
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = self.conn()?;

        let row: Option<UserRow> = users::table
            .filter(users::user_id.eq(user_id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.map(User::from))
    }

    async fn get_all_users(&self) -> Result<HashMap<String, User>> {
        let mut conn = self.conn()?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| (row.user_id.clone(), User::from(row)))
            .collect())
    }

    async fn update_user(&self, user_id: &str, patch: &UserPatch) -> Result<UpdateOutcome> {
        if patch.is_empty() {
            debug!(user_id = %user_id, "No updates specified");
            return Ok(UpdateOutcome::NoOp);
        }

        let changes = UserChangeset::from(patch);
        let mut conn = self.conn()?;

        let rows = diesel::update(users::table.filter(users::user_id.eq(user_id)))
            .set(&changes)
            .execute(&mut conn)
            .map_err(|e| {
                warn!(user_id = %user_id, error = %e, "Failed to update user");
                Error::Database(e.to_string())
            })?;

        let outcome = UpdateOutcome::from_rows_affected(rows);
        debug!(user_id = %user_id, columns = patch.len(), ?outcome, "Updated user");
        Ok(outcome)
    }

    async fn insert_trade(&self, trade: &NewTrade) -> Result<i32> {
        let row = NewTradeRow::new(trade, Utc::now().naive_utc());
        let mut conn = self.conn()?;

        let id = conn
            .transaction(|conn| {
                diesel::insert_into(trades::table)
                    .values(&row)
                    .execute(conn)?;
                last_insert_rowid(conn)
            })
            .map_err(|e| {
                warn!(user_id = %trade.user_id, error = %e, "Failed to log trade");
                Error::Database(e.to_string())
            })?;

        debug!(id, user_id = %trade.user_id, "Logged trade");
        Ok(id)
    }

    async fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>> {
        let mut conn = self.conn()?;

        let rows: Vec<TradeRow> = trades::table
            .filter(trades::user_id.eq(user_id))
            .order(trades::id.asc())
            .select(TradeRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Trade::from).collect())
    }

    async fn insert_referral(&self, referrer_id: i64, referred_id: i64) -> Result<i32> {
        if referrer_id == referred_id {
            return Err(Error::SelfReferral { id: referrer_id });
        }

        let row = NewReferralRow {
            referrer_id,
            referred_id,
            referral_date: Utc::now().naive_utc(),
        };
        let mut conn = self.conn()?;

        let id = conn
            .transaction(|conn| {
                diesel::insert_into(referrals::table)
                    .values(&row)
                    .execute(conn)?;
                last_insert_rowid(conn)
            })
            .map_err(|e| {
                warn!(referrer_id, referred_id, error = %e, "Failed to insert referral");
                Error::Database(e.to_string())
            })?;

        debug!(id, referrer_id, referred_id, "Inserted referral");
        Ok(id)
    }

    async fn referred_ids(&self, referrer_id: i64) -> Result<Vec<i64>> {
        let mut conn = self.conn()?;

        let ids: Vec<Option<i64>> = referrals::table
            .filter(referrals::referrer_id.eq(referrer_id))
            .filter(referrals::referred_id.is_not_null())
            .order(referrals::id.asc())
            .select(referrals::referred_id)
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(dedup_referred(ids.into_iter().flatten()))
    }

    async fn get_my_referrals(&self, referrer_id: i64) -> Result<Option<String>> {
        let ids = self.referred_ids(referrer_id).await?;
        Ok(render_referred(&ids))
    }
}
