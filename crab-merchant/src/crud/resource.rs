//! Per-resource configuration of the generic CRUD service

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{AppResult, ErrorCode};
use shared::models::RelatedSummary;

use super::record::Stored;
use super::related::{FormatError, Related};
use crate::db::{Condition, Row, Schema};

/// A foreign key that must point at a live row of the same merchant
#[derive(Debug, Clone)]
pub struct Reference {
    pub column: &'static str,
    pub schema: &'static Schema,
    pub id: i64,
    pub label: &'static str,
    pub not_found: ErrorCode,
}

/// Column values that must be unique among the merchant's live rows
#[derive(Debug, Clone)]
pub struct UniqueKey {
    pub columns: Vec<(&'static str, Value)>,
    pub code: ErrorCode,
    pub message: String,
}

impl UniqueKey {
    pub fn single(column: &'static str, value: impl Into<Value>, code: ErrorCode, message: String) -> Self {
        Self {
            columns: vec![(column, value.into())],
            code,
            message,
        }
    }

    pub fn touches(&self, touched: &Touched) -> bool {
        self.columns.iter().any(|(column, _)| touched.contains(column))
    }
}

/// Which column of a related row labels its summary
#[derive(Debug, Clone, Copy)]
pub enum SummaryField {
    Name(&'static str),
    Status(&'static str),
}

/// A related row to nest in the response as a summary
#[derive(Debug, Clone)]
pub struct Relation {
    pub key: &'static str,
    pub schema: &'static Schema,
    pub id: i64,
    pub field: SummaryField,
}

impl Relation {
    pub fn named(key: &'static str, schema: &'static Schema, id: i64, column: &'static str) -> Self {
        Self {
            key,
            schema,
            id,
            field: SummaryField::Name(column),
        }
    }

    pub fn stated(key: &'static str, schema: &'static Schema, id: i64, column: &'static str) -> Self {
        Self {
            key,
            schema,
            id,
            field: SummaryField::Status(column),
        }
    }

    pub fn summarize(&self, row: &Row) -> Option<RelatedSummary> {
        let (SummaryField::Name(column) | SummaryField::Status(column)) = self.field;
        let label = row.get(column)?.as_str()?.to_string();
        Some(match self.field {
            SummaryField::Name(_) => RelatedSummary::Named {
                id: self.id,
                name: label,
            },
            SummaryField::Status(_) => RelatedSummary::Stated {
                id: self.id,
                status: label,
            },
        })
    }
}

/// Columns changed by a partial update
#[derive(Debug, Default)]
pub struct Touched(Vec<&'static str>);

impl Touched {
    /// Overwrite `slot` when the patch carries a value
    pub fn set<T>(&mut self, slot: &mut T, value: Option<T>, column: &'static str) {
        if let Some(value) = value {
            *slot = value;
            self.mark(column);
        }
    }

    /// Same as [`Touched::set`] for nullable columns
    pub fn set_some<T>(&mut self, slot: &mut Option<T>, value: Option<T>, column: &'static str) {
        if let Some(value) = value {
            *slot = Some(value);
            self.mark(column);
        }
    }

    pub fn mark(&mut self, column: &'static str) {
        if !self.0.contains(&column) {
            self.0.push(column);
        }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.iter().any(|c| *c == column)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.0
    }
}

/// A tenant-scoped resource served by [`super::CrudService`]
///
/// `Data` mirrors the table's data columns; the service adds id, lifecycle and
/// timestamps around it. Hooks with default bodies are only needed by
/// resources that have foreign keys, unique columns or filters.
pub trait Resource: Send + Sync + 'static {
    /// Human name used in messages ("Kitchen device")
    const LABEL: &'static str;
    const SCHEMA: &'static Schema;
    const NOT_FOUND: ErrorCode;

    type Data: Serialize + DeserializeOwned + Clone + Send + Sync;
    type Create: DeserializeOwned + Send;
    type Update: DeserializeOwned + Send;
    type Filter: DeserializeOwned + Default + Send;
    type Response: Serialize + Send;

    /// Turn a create payload into columns (parses embedded JSON and dates)
    fn build(input: Self::Create, merchant_id: i64) -> AppResult<Self::Data>;

    /// Merge a partial update into the current columns
    fn apply(data: &mut Self::Data, patch: Self::Update) -> AppResult<Touched>;

    /// Field rules, checked after `build` and after `apply`
    fn validate(data: &Self::Data) -> AppResult<()>;

    fn conditions(_filter: Self::Filter) -> AppResult<Vec<Condition>> {
        Ok(Vec::new())
    }

    fn references(_data: &Self::Data) -> Vec<Reference> {
        Vec::new()
    }

    fn unique_keys(_data: &Self::Data) -> Vec<UniqueKey> {
        Vec::new()
    }

    fn relations(_data: &Self::Data) -> Vec<Relation> {
        Vec::new()
    }

    fn format(record: Stored<Self::Data>, related: &Related) -> Result<Self::Response, FormatError>;
}
