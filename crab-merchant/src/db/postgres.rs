//! PostgreSQL gateway
//!
//! Queries are assembled with `sqlx::QueryBuilder`. Table and column names
//! only ever come from [`Schema`] constants; every value is bound. Tables that
//! reach the merchant through parents are joined as `t1`, `t2`, … with the
//! target table aliased `t0`.

use async_trait::async_trait;
use serde_json::{Number, Value};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row as _};

use shared::models::RecordStatus;
use shared::util::now_millis;

use super::schema::{CREATED_AT, ID, STATUS, UPDATED_AT};
use super::{
    ColumnKind, Condition, Gateway, ListQuery, RepoError, RepoResult, Row, Schema,
};

#[derive(Debug, Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and apply pending migrations
    pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}

// ── SQL assembly ────────────────────────────────────────────────────

/// `SELECT` list exposing the lifecycle column as `status`
fn select_list(schema: &Schema) -> String {
    let mut parts = vec![
        format!("t0.{ID}"),
        format!("t0.{} AS {STATUS}", schema.status_column),
        format!("t0.{CREATED_AT}"),
        format!("t0.{UPDATED_AT}"),
    ];
    parts.extend(schema.columns.iter().map(|c| format!("t0.{}", c.name)));
    parts.join(", ")
}

/// `FROM` clause with the joins up to the merchant-owning table
fn push_from(qb: &mut QueryBuilder<'_, Postgres>, schema: &'static Schema) {
    qb.push(format!(" FROM {} t0", schema.table));
    for (depth, (parent, column)) in schema.owner_chain().into_iter().enumerate() {
        let child = depth;
        let alias = depth + 1;
        qb.push(format!(
            " JOIN {table} t{alias} ON t{alias}.{ID} = t{child}.{column}",
            table = parent.table,
        ));
    }
}

/// `WHERE` clause restricting rows to the merchant
fn push_tenant_scope(qb: &mut QueryBuilder<'_, Postgres>, schema: &'static Schema, merchant_id: i64) {
    let depth = schema.owner_chain().len();
    let (_, column) = schema.tenant_column();
    qb.push(format!(" WHERE t{depth}.{column} = "));
    qb.push_bind(merchant_id);
}

fn push_live_only(qb: &mut QueryBuilder<'_, Postgres>, schema: &Schema) {
    qb.push(format!(" AND t0.{} <> ", schema.status_column));
    qb.push_bind(RecordStatus::Deleted.as_str());
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, kind: ColumnKind, value: &Value) {
    match kind {
        ColumnKind::BigInt => qb.push_bind(value.as_i64()),
        ColumnKind::Integer => qb.push_bind(value.as_i64().and_then(|v| i32::try_from(v).ok())),
        ColumnKind::Double => qb.push_bind(value.as_f64()),
        ColumnKind::Text => qb.push_bind(value.as_str().map(str::to_owned)),
        ColumnKind::Bool => qb.push_bind(value.as_bool()),
        ColumnKind::Json => qb.push_bind((!value.is_null()).then(|| value.clone())),
    };
}

fn column_kind(schema: &Schema, column: &str) -> ColumnKind {
    match column {
        ID | CREATED_AT | UPDATED_AT => ColumnKind::BigInt,
        _ => schema.column(column).map(|c| c.kind).unwrap_or(ColumnKind::Text),
    }
}

/// Escape `%`, `_` and `\` for a `LIKE` pattern
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, schema: &Schema, conditions: &[Condition]) {
    for condition in conditions {
        match condition {
            Condition::Eq(column, value) => {
                qb.push(format!(" AND t0.{column} = "));
                push_value(qb, column_kind(schema, column), value);
            }
            Condition::Contains(column, needle) => {
                qb.push(format!(" AND t0.{column} ILIKE "));
                qb.push_bind(format!("%{}%", escape_like(needle)));
            }
            Condition::AtLeast(column, bound) => {
                qb.push(format!(" AND t0.{column} >= "));
                qb.push_bind(*bound);
            }
            Condition::AtMost(column, bound) => {
                qb.push(format!(" AND t0.{column} <= "));
                qb.push_bind(*bound);
            }
        }
    }
}

fn count_query(schema: &'static Schema, query: &ListQuery<'_>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*)");
    push_from(&mut qb, schema);
    push_tenant_scope(&mut qb, schema, query.merchant_id);
    push_live_only(&mut qb, schema);
    push_conditions(&mut qb, schema, query.conditions);
    qb
}

fn page_query(schema: &'static Schema, query: &ListQuery<'_>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {}", select_list(schema)));
    push_from(&mut qb, schema);
    push_tenant_scope(&mut qb, schema, query.merchant_id);
    push_live_only(&mut qb, schema);
    push_conditions(&mut qb, schema, query.conditions);

    let direction = query.sort_order.as_sql();
    qb.push(format!(
        " ORDER BY t0.{column} {direction}, t0.{ID} {direction} LIMIT ",
        column = query.sort_column,
    ));
    qb.push_bind(i64::from(query.page.limit));
    qb.push(" OFFSET ");
    qb.push_bind(i64::try_from(query.page.offset()).unwrap_or(i64::MAX));
    qb
}

fn scoped_query(schema: &'static Schema, merchant_id: i64, id: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {}", select_list(schema)));
    push_from(&mut qb, schema);
    push_tenant_scope(&mut qb, schema, merchant_id);
    qb.push(format!(" AND t0.{ID} = "));
    qb.push_bind(id);
    qb
}

fn exists_query(
    schema: &'static Schema,
    merchant_id: i64,
    key: &[(&'static str, Value)],
    exclude_id: Option<i64>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT EXISTS (SELECT 1");
    push_from(&mut qb, schema);
    push_tenant_scope(&mut qb, schema, merchant_id);
    push_live_only(&mut qb, schema);
    for (column, value) in key {
        qb.push(format!(" AND t0.{column} = "));
        push_value(&mut qb, column_kind(schema, column), value);
    }
    if let Some(id) = exclude_id {
        qb.push(format!(" AND t0.{ID} <> "));
        qb.push_bind(id);
    }
    qb.push(")");
    qb
}

fn insert_query(schema: &Schema, values: &Row) -> QueryBuilder<'static, Postgres> {
    let names: Vec<&str> = schema.columns.iter().map(|c| c.name).collect();
    let mut qb = QueryBuilder::new(format!(
        "INSERT INTO {} ({}, {}, {CREATED_AT}, {UPDATED_AT}) VALUES (",
        schema.table,
        names.join(", "),
        schema.status_column,
    ));
    for column in schema.columns {
        push_value(&mut qb, column.kind, values.get(column.name).unwrap_or(&Value::Null));
        qb.push(", ");
    }
    let now = now_millis();
    qb.push_bind(RecordStatus::Active.as_str());
    qb.push(", ");
    qb.push_bind(now);
    qb.push(", ");
    qb.push_bind(now);
    qb.push(format!(") RETURNING {ID}"));
    qb
}

fn update_query(schema: &Schema, id: i64, changes: &Row) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", schema.table));
    for (name, value) in changes {
        if let Some(column) = schema.column(name) {
            qb.push(format!("{} = ", column.name));
            push_value(&mut qb, column.kind, value);
            qb.push(", ");
        }
    }
    qb.push(format!("{UPDATED_AT} = "));
    qb.push_bind(now_millis());
    qb.push(format!(" WHERE {ID} = "));
    qb.push_bind(id);
    qb
}

fn delete_query(schema: &Schema, id: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET {} = ", schema.table, schema.status_column));
    qb.push_bind(RecordStatus::Deleted.as_str());
    qb.push(format!(", {UPDATED_AT} = "));
    qb.push_bind(now_millis());
    qb.push(format!(" WHERE {ID} = "));
    qb.push_bind(id);
    qb.push(format!(" AND {} <> ", schema.status_column));
    qb.push_bind(RecordStatus::Deleted.as_str());
    qb
}

// ── Row decoding ────────────────────────────────────────────────────

fn decode_column(row: &PgRow, name: &str, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    let value = match kind {
        ColumnKind::BigInt => row.try_get::<Option<i64>, _>(name)?.map(Value::from),
        ColumnKind::Integer => row.try_get::<Option<i32>, _>(name)?.map(Value::from),
        ColumnKind::Double => row
            .try_get::<Option<f64>, _>(name)?
            .and_then(Number::from_f64)
            .map(Value::Number),
        ColumnKind::Text => row.try_get::<Option<String>, _>(name)?.map(Value::from),
        ColumnKind::Bool => row.try_get::<Option<bool>, _>(name)?.map(Value::from),
        ColumnKind::Json => row.try_get::<Option<Value>, _>(name)?,
    };
    Ok(value.unwrap_or(Value::Null))
}

fn decode_row(schema: &Schema, row: &PgRow) -> RepoResult<Row> {
    let mut out = Row::new();
    for name in [ID, CREATED_AT, UPDATED_AT] {
        out.insert(name.to_string(), decode_column(row, name, ColumnKind::BigInt)?);
    }
    out.insert(STATUS.to_string(), decode_column(row, STATUS, ColumnKind::Text)?);
    for column in schema.columns {
        out.insert(
            column.name.to_string(),
            decode_column(row, column.name, column.kind)?,
        );
    }
    Ok(out)
}

#[async_trait]
impl Gateway for PgGateway {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_page(
        &self,
        schema: &'static Schema,
        query: &ListQuery<'_>,
    ) -> RepoResult<(Vec<Row>, u64)> {
        let total: i64 = count_query(schema, query)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        let rows = page_query(schema, query)
            .build()
            .fetch_all(&self.pool)
            .await?;
        let rows = rows
            .iter()
            .map(|row| decode_row(schema, row))
            .collect::<RepoResult<Vec<_>>>()?;
        Ok((rows, u64::try_from(total).unwrap_or(0)))
    }

    async fn find_scoped(
        &self,
        schema: &'static Schema,
        merchant_id: i64,
        id: i64,
    ) -> RepoResult<Option<Row>> {
        let row = scoped_query(schema, merchant_id, id)
            .build()
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| decode_row(schema, &r)).transpose()
    }

    async fn exists_unique(
        &self,
        schema: &'static Schema,
        merchant_id: i64,
        key: &[(&'static str, Value)],
        exclude_id: Option<i64>,
    ) -> RepoResult<bool> {
        let exists: bool = exists_query(schema, merchant_id, key, exclude_id)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert(&self, schema: &'static Schema, values: Row) -> RepoResult<i64> {
        let id: i64 = insert_query(schema, &values)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update(&self, schema: &'static Schema, id: i64, changes: Row) -> RepoResult<()> {
        let result = update_query(schema, id, &changes)
            .build()
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("{} {id}", schema.table)));
        }
        Ok(())
    }

    async fn mark_deleted(&self, schema: &'static Schema, id: i64) -> RepoResult<bool> {
        let result = delete_query(schema, id)
            .build()
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
