//! Persistence gateway
//!
//! Every resource is stored through the same small set of tenant-scoped
//! operations, described by the [`Gateway`] trait and driven by a table
//! [`Schema`]. Two implementations exist: PostgreSQL ([`postgres::PgGateway`])
//! and an in-process store ([`memory::MemoryGateway`]) used by tests and
//! local development.
//!
//! Rows travel as JSON objects keyed by column name. The lifecycle column is
//! always exposed under the `status` key, whatever its name in the table.

pub mod memory;
pub mod postgres;
pub mod schema;

use async_trait::async_trait;
use serde_json::{Map, Value};
use shared::{PageRequest, SortOrder};
use thiserror::Error;

pub use schema::{Column, ColumnKind, Owner, Schema};

/// One stored row: column name -> value
pub type Row = Map<String, Value>;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                RepoError::Decode(err.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for RepoError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// A single list filter on a data column
///
/// Column names always come from resource code, never from the request.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Exact match
    Eq(&'static str, Value),
    /// Case-insensitive substring match on a text column
    Contains(&'static str, String),
    /// Inclusive lower bound on a BIGINT column
    AtLeast(&'static str, i64),
    /// Inclusive upper bound on a BIGINT column
    AtMost(&'static str, i64),
}

/// Tenant-scoped list query
#[derive(Debug, Clone)]
pub struct ListQuery<'a> {
    pub merchant_id: i64,
    pub conditions: &'a [Condition],
    pub sort_column: &'static str,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

/// Tenant-scoped persistence operations
///
/// Reads that serve callers (`find_page`, `exists_unique`) never see
/// `DELETED` rows. `find_scoped` returns a row regardless of its lifecycle so
/// the service can tell "gone" from "already deleted".
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Short backend name for health reporting
    fn backend_name(&self) -> &'static str;

    async fn health_check(&self) -> RepoResult<()>;

    /// Live rows owned by the merchant, filtered, sorted and paged, plus the
    /// total number of matches
    async fn find_page(
        &self,
        schema: &'static Schema,
        query: &ListQuery<'_>,
    ) -> RepoResult<(Vec<Row>, u64)>;

    /// Row with `id` if it is owned by the merchant, whatever its lifecycle
    async fn find_scoped(
        &self,
        schema: &'static Schema,
        merchant_id: i64,
        id: i64,
    ) -> RepoResult<Option<Row>>;

    /// Whether a live row owned by the merchant matches every `(column, value)`
    /// pair, ignoring `exclude_id`
    async fn exists_unique(
        &self,
        schema: &'static Schema,
        merchant_id: i64,
        key: &[(&'static str, Value)],
        exclude_id: Option<i64>,
    ) -> RepoResult<bool>;

    /// Insert an `ACTIVE` row and return its id
    async fn insert(&self, schema: &'static Schema, values: Row) -> RepoResult<i64>;

    /// Write the given columns and bump `updated_at`
    async fn update(&self, schema: &'static Schema, id: i64, changes: Row) -> RepoResult<()>;

    /// Flip the lifecycle to `DELETED`; `false` if the row was already deleted
    async fn mark_deleted(&self, schema: &'static Schema, id: i64) -> RepoResult<bool>;
}
