//! Stored records and the lifecycle gate

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::RecordStatus;

use crate::db::{RepoError, RepoResult, Row};

/// A row as loaded from the gateway: bookkeeping columns plus the resource's
/// own columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: i64,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(flatten)]
    pub data: T,
}

impl<T: DeserializeOwned> Stored<T> {
    pub fn from_row(row: Row) -> RepoResult<Self> {
        serde_json::from_value(Value::Object(row)).map_err(|e| RepoError::Decode(e.to_string()))
    }
}

impl<T> Stored<T> {
    /// Gate for mutations: only `ACTIVE` records may be updated or removed
    pub fn into_active(self) -> Result<Active<T>, Stored<T>> {
        if self.status.is_deleted() {
            Err(self)
        } else {
            Ok(Active(self))
        }
    }
}

/// A record known to be `ACTIVE`
#[derive(Debug, Clone)]
pub struct Active<T>(Stored<T>);

impl<T> Active<T> {
    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn into_inner(self) -> Stored<T> {
        self.0
    }
}

impl<T> Deref for Active<T> {
    type Target = Stored<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Serialize resource columns into a gateway row
pub fn to_row<T: Serialize>(data: &T) -> RepoResult<Row> {
    match serde_json::to_value(data) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(other) => Err(RepoError::Decode(format!(
            "expected columns object, got {other}"
        ))),
        Err(e) => Err(RepoError::Decode(e.to_string())),
    }
}
