//! Generic CRUD service
//!
//! Guards, in order, for every operation:
//! 1. the path id is a positive integer (get / update / remove),
//! 2. the caller carries a merchant,
//! 3. the record exists under that merchant.
//!
//! Lifecycle rules live here too: lists and gets never return `DELETED`
//! records, and only `ACTIVE` records may be updated or removed.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::request::QueryMap;
use shared::{ListParams, Paginated};

use super::record::{Active, Stored, to_row};
use super::related::Related;
use super::resource::{Reference, Resource, UniqueKey};
use crate::db::schema::STATUS;
use crate::db::{Gateway, ListQuery, RepoError, Row, Schema};
use crate::error::{ServiceError, ServiceResult};
use crate::resources::reference::MERCHANTS;

/// Related rows already fetched during one request
type RowCache = HashMap<(&'static str, i64), Option<Row>>;

pub struct CrudService<R: Resource> {
    gateway: Arc<dyn Gateway>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        Self::new(self.gateway.clone())
    }
}

fn require_merchant(merchant_id: Option<i64>) -> AppResult<i64> {
    merchant_id.ok_or_else(AppError::merchant_required)
}

fn require_id(id: i64) -> AppResult<i64> {
    if id > 0 {
        Ok(id)
    } else {
        Err(AppError::invalid_id(id.to_string()))
    }
}

/// A unique index rejected a write the pre-check let through (concurrent
/// writer). Answer with the code of the key being written.
fn store_conflict(err: RepoError, keys: &[UniqueKey]) -> ServiceError {
    match (err, keys.first()) {
        (RepoError::Duplicate(msg), Some(key)) => {
            tracing::warn!(error = %msg, code = %key.code, "Unique index rejected write");
            AppError::duplicate(key.code, key.message.clone()).into()
        }
        (err, _) => err.into(),
    }
}

fn is_active(row: &Row) -> bool {
    row.get(STATUS).and_then(Value::as_str) == Some("ACTIVE")
}

impl<R: Resource> CrudService<R> {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            _resource: PhantomData,
        }
    }

    pub async fn create(&self, merchant_id: Option<i64>, input: R::Create) -> ServiceResult<R::Response> {
        let merchant_id = require_merchant(merchant_id)?;
        self.ensure_merchant(merchant_id).await?;

        let data = R::build(input, merchant_id)?;
        R::validate(&data)?;
        self.check_references(merchant_id, R::references(&data)).await?;
        let keys = R::unique_keys(&data);
        self.check_unique(merchant_id, &keys, None).await?;

        let id = self
            .gateway
            .insert(R::SCHEMA, to_row(&data)?)
            .await
            .map_err(|err| store_conflict(err, &keys))?;
        tracing::info!(resource = R::LABEL, merchant_id, id, "Record created");

        let record = self.load(merchant_id, id).await?;
        self.render(merchant_id, record, &mut RowCache::new()).await
    }

    pub async fn find_all(&self, merchant_id: Option<i64>, query: QueryMap) -> ServiceResult<Paginated<R::Response>> {
        let merchant_id = require_merchant(merchant_id)?;
        let params = ListParams::from_query(query)?;
        let conditions = R::conditions(params.filter()?)?;

        let list = ListQuery {
            merchant_id,
            conditions: &conditions,
            sort_column: R::SCHEMA.sort_column(params.sort_by.as_deref()),
            sort_order: params.sort_order,
            page: params.page,
        };
        let (rows, total) = self.gateway.find_page(R::SCHEMA, &list).await?;

        let mut cache = RowCache::new();
        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            let record = Stored::from_row(row)?;
            data.push(self.render(merchant_id, record, &mut cache).await?);
        }
        Ok(Paginated::new(data, total, params.page))
    }

    pub async fn find_one(&self, merchant_id: Option<i64>, id: i64) -> ServiceResult<R::Response> {
        let id = require_id(id)?;
        let merchant_id = require_merchant(merchant_id)?;
        let record = self
            .load(merchant_id, id)
            .await?
            .into_active()
            .map_err(|_| self.not_found(id))?;
        self.render(merchant_id, record.into_inner(), &mut RowCache::new())
            .await
    }

    pub async fn update(&self, merchant_id: Option<i64>, id: i64, patch: R::Update) -> ServiceResult<R::Response> {
        let id = require_id(id)?;
        let merchant_id = require_merchant(merchant_id)?;
        let current = self.load_active(merchant_id, id).await?;

        let mut data = current.data.clone();
        let touched = R::apply(&mut data, patch)?;
        R::validate(&data)?;

        let references = R::references(&data)
            .into_iter()
            .filter(|r| touched.contains(r.column))
            .collect();
        self.check_references(merchant_id, references).await?;

        let keys: Vec<UniqueKey> = R::unique_keys(&data)
            .into_iter()
            .filter(|k| k.touches(&touched))
            .collect();
        self.check_unique(merchant_id, &keys, Some(current.id())).await?;

        if !touched.is_empty() {
            let row = to_row(&data)?;
            let changes: Row = touched
                .columns()
                .iter()
                .filter_map(|column| row.get(*column).map(|v| (column.to_string(), v.clone())))
                .collect();
            self.gateway
                .update(R::SCHEMA, current.id(), changes)
                .await
                .map_err(|err| store_conflict(err, &keys))?;
            tracing::info!(
                resource = R::LABEL,
                merchant_id,
                id,
                fields = ?touched.columns(),
                "Record updated"
            );
        }

        let record = self.load(merchant_id, id).await?;
        self.render(merchant_id, record, &mut RowCache::new()).await
    }

    pub async fn remove(&self, merchant_id: Option<i64>, id: i64) -> ServiceResult<R::Response> {
        let id = require_id(id)?;
        let merchant_id = require_merchant(merchant_id)?;
        let current = self.load_active(merchant_id, id).await?;

        // Conditional flip: a concurrent delete makes this return false
        if !self.gateway.mark_deleted(R::SCHEMA, current.id()).await? {
            return Err(AppError::already_deleted(R::LABEL).into());
        }
        tracing::info!(resource = R::LABEL, merchant_id, id, "Record deleted");

        let record = self.load(merchant_id, id).await?;
        self.render(merchant_id, record, &mut RowCache::new()).await
    }

    fn not_found(&self, id: i64) -> AppError {
        AppError::not_found_as(R::NOT_FOUND, R::LABEL).with_detail("id", id)
    }

    /// Tenant-owned record in any lifecycle
    async fn load(&self, merchant_id: i64, id: i64) -> ServiceResult<Stored<R::Data>> {
        let row = self
            .gateway
            .find_scoped(R::SCHEMA, merchant_id, id)
            .await?
            .ok_or_else(|| self.not_found(id))?;
        Ok(Stored::from_row(row)?)
    }

    /// Tenant-owned record that may still be mutated
    async fn load_active(&self, merchant_id: i64, id: i64) -> ServiceResult<Active<R::Data>> {
        let record = self.load(merchant_id, id).await?;
        Ok(record
            .into_active()
            .map_err(|_| AppError::already_deleted(R::LABEL).with_detail("id", id))?)
    }

    async fn ensure_merchant(&self, merchant_id: i64) -> ServiceResult<()> {
        match self.gateway.find_scoped(&MERCHANTS, merchant_id, merchant_id).await? {
            Some(row) if is_active(&row) => Ok(()),
            _ => Err(AppError::not_found_as(ErrorCode::MerchantNotFound, "Merchant")
                .with_detail("id", merchant_id)
                .into()),
        }
    }

    async fn check_references(&self, merchant_id: i64, references: Vec<Reference>) -> ServiceResult<()> {
        for reference in references {
            let live = self
                .gateway
                .find_scoped(reference.schema, merchant_id, reference.id)
                .await?
                .is_some_and(|row| is_active(&row));
            if !live {
                return Err(AppError::not_found_as(reference.not_found, reference.label)
                    .with_detail("id", reference.id)
                    .with_detail("field", reference.column)
                    .into());
            }
        }
        Ok(())
    }

    async fn check_unique(&self, merchant_id: i64, keys: &[UniqueKey], exclude_id: Option<i64>) -> ServiceResult<()> {
        for key in keys {
            if self
                .gateway
                .exists_unique(R::SCHEMA, merchant_id, &key.columns, exclude_id)
                .await?
            {
                return Err(AppError::duplicate(key.code, key.message.clone()).into());
            }
        }
        Ok(())
    }

    /// Load the summaries the formatter needs, then format
    async fn render(&self, merchant_id: i64, record: Stored<R::Data>, cache: &mut RowCache) -> ServiceResult<R::Response> {
        let mut related = Related::default();
        for relation in R::relations(&record.data) {
            let row = self.related_row(relation.schema, merchant_id, relation.id, cache).await?;
            if let Some(summary) = row.and_then(|row| relation.summarize(&row)) {
                related.insert(relation.key, summary);
            }
        }
        Ok(R::format(record, &related)?)
    }

    async fn related_row(
        &self,
        schema: &'static Schema,
        merchant_id: i64,
        id: i64,
        cache: &mut RowCache,
    ) -> ServiceResult<Option<Row>> {
        if let Some(row) = cache.get(&(schema.table, id)) {
            return Ok(row.clone());
        }
        let row = self.gateway.find_scoped(schema, merchant_id, id).await?;
        cache.insert((schema.table, id), row.clone());
        Ok(row)
    }
}
