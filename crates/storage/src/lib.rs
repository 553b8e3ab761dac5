use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{migrate::MigrateError, sqlite::SqlitePoolOptions, SqlitePool};
use thiserror::Error;

use fs_intake_core::types::Recruit;

/// Top-level database handle that owns the SQLite connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Establishes a new SQLite connection pool for the provided connection string.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(StorageError::Connect)?;

        apply_pragmas(&pool).await?;

        Ok(Self { pool })
    }

    /// Applies migrations located under `migrations/`.
    ///
    /// Safe to run on every process start: applied migrations are tracked
    /// and existing rows are never touched.
    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;
        Ok(())
    }

    /// Returns a handle to operate on recruit records.
    pub fn recruits(&self) -> RecruitRepository {
        RecruitRepository {
            pool: self.pool.clone(),
        }
    }

    /// Exposes the inner pool when lower level access is required.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// WAL journaling keeps `list_all_descending` readable while an insert is
/// in flight; busy_timeout bounds writer contention instead of failing
/// immediately.
async fn apply_pragmas(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query("PRAGMA journal_mode = WAL;")
        .fetch_one(pool)
        .await
        .map_err(StorageError::Pragma)?;

    sqlx::query("PRAGMA synchronous = NORMAL;")
        .execute(pool)
        .await
        .map_err(StorageError::Pragma)?;

    sqlx::query("PRAGMA busy_timeout = 5000;")
        .execute(pool)
        .await
        .map_err(StorageError::Pragma)?;

    Ok(())
}

/// General storage level errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to connect to sqlite: {0}")]
    Connect(sqlx::Error),
    #[error("failed to apply pragma: {0}")]
    Pragma(sqlx::Error),
    #[error("failed to run database migrations: {0}")]
    Migration(MigrateError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository responsible for the `recruits` table.
#[derive(Clone)]
pub struct RecruitRepository {
    pool: SqlitePool,
}

impl RecruitRepository {
    /// Appends one recruit record and returns the assigned id.
    ///
    /// Ids come from SQLite's AUTOINCREMENT rowid and are never reused.
    pub async fn insert(&self, record: NewRecruit<'_>) -> Result<i64, RecruitError> {
        let result = sqlx::query(
            "INSERT INTO recruits (name, phone, skills, submit_time, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.name)
        .bind(record.phone)
        .bind(record.skills)
        .bind(record.submit_time)
        .bind(to_rfc3339(record.created_at))
        .execute(&self.pool)
        .await
        .map_err(RecruitError::Database)?;

        Ok(result.last_insert_rowid())
    }

    /// Returns every recruit ordered newest first.
    ///
    /// Ties on `created_at` fall back to the id so records inserted within
    /// the same instant still list newest-inserted first.
    pub async fn list_all_descending(&self) -> Result<Vec<Recruit>, RecruitError> {
        let rows = sqlx::query_as::<_, RecruitRow>(
            "SELECT id, name, phone, skills, submit_time, created_at \
               FROM recruits \
              ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RecruitRow::into_domain).collect())
    }
}

/// Parameters required to insert a recruit record.
pub struct NewRecruit<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub skills: &'a str,
    pub submit_time: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Raw row shape read back from the `recruits` table.
#[derive(Debug, sqlx::FromRow)]
struct RecruitRow {
    id: i64,
    name: String,
    phone: String,
    skills: String,
    submit_time: String,
    created_at: DateTime<Utc>,
}

impl RecruitRow {
    fn into_domain(self) -> Recruit {
        Recruit {
            id: self.id,
            name: self.name,
            phone: self.phone,
            skills: self.skills,
            submit_time: self.submit_time,
            created_at: self.created_at,
        }
    }
}

/// Errors that can occur while reading or writing recruit records.
#[derive(Debug, Error)]
pub enum RecruitError {
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RecruitError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

fn to_rfc3339(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
