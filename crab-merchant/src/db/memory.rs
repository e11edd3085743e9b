//! In-process gateway
//!
//! Keeps every table in a `BTreeMap` behind one `RwLock`. Tenant scoping walks
//! the owner chain through the parent tables exactly like the SQL joins do,
//! and sorting mirrors PostgreSQL (`NULLS LAST` ascending, ties broken by id).

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use shared::SortOrder;
use shared::models::RecordStatus;
use shared::util::now_millis;

use super::schema::{CREATED_AT, ID, STATUS, UPDATED_AT};
use super::{Condition, Gateway, ListQuery, Owner, RepoError, RepoResult, Row, Schema};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

#[derive(Debug, Default)]
pub struct MemoryGateway {
    tables: RwLock<HashMap<&'static str, Table>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row synchronously (reference data such as merchants and
    /// employees that this service never writes itself)
    pub fn seed(&self, schema: &'static Schema, values: Row) -> i64 {
        let mut tables = self.tables.write();
        insert_row(&mut tables, schema, values)
    }
}

fn insert_row(tables: &mut HashMap<&'static str, Table>, schema: &Schema, values: Row) -> i64 {
    let table = tables.entry(schema.table).or_default();
    table.next_id += 1;
    let id = table.next_id;
    let now = now_millis();

    let mut row = Row::new();
    for column in schema.columns {
        let value = values.get(column.name).cloned().unwrap_or(Value::Null);
        row.insert(column.name.to_string(), value);
    }
    row.insert(ID.to_string(), Value::from(id));
    row.insert(
        schema.status_column.to_string(),
        Value::from(RecordStatus::Active.as_str()),
    );
    row.insert(CREATED_AT.to_string(), Value::from(now));
    row.insert(UPDATED_AT.to_string(), Value::from(now));
    table.rows.insert(id, row);
    id
}

/// Merchant owning `row`, following parent links
fn owner_of(tables: &HashMap<&'static str, Table>, schema: &Schema, row: &Row) -> Option<i64> {
    match schema.owner {
        Owner::Root => row.get(ID)?.as_i64(),
        Owner::Merchant(column) => row.get(column)?.as_i64(),
        Owner::Parent { column, parent } => {
            let parent_id = row.get(column)?.as_i64()?;
            let parent_row = tables.get(parent.table)?.rows.get(&parent_id)?;
            owner_of(tables, parent, parent_row)
        }
    }
}

fn is_live(schema: &Schema, row: &Row) -> bool {
    row.get(schema.status_column).and_then(Value::as_str) != Some(RecordStatus::Deleted.as_str())
}

fn matches(row: &Row, condition: &Condition) -> bool {
    match condition {
        Condition::Eq(column, expected) => row.get(*column) == Some(expected),
        Condition::Contains(column, needle) => row
            .get(*column)
            .and_then(Value::as_str)
            .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
        Condition::AtLeast(column, bound) => row
            .get(*column)
            .and_then(Value::as_i64)
            .is_some_and(|v| v >= *bound),
        Condition::AtMost(column, bound) => row
            .get(*column)
            .and_then(Value::as_i64)
            .is_some_and(|v| v <= *bound),
    }
}

/// Ascending comparison with nulls sorting after every value
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => x
                    .as_f64()
                    .partial_cmp(&y.as_f64())
                    .unwrap_or(Ordering::Equal),
            },
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

/// Copy of a stored row with the lifecycle exposed as `status`
fn output_row(schema: &Schema, row: &Row) -> Row {
    let mut out = row.clone();
    if schema.status_column != STATUS
        && let Some(status) = out.remove(schema.status_column)
    {
        out.insert(STATUS.to_string(), status);
    }
    out
}

#[async_trait]
impl Gateway for MemoryGateway {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }

    async fn find_page(
        &self,
        schema: &'static Schema,
        query: &ListQuery<'_>,
    ) -> RepoResult<(Vec<Row>, u64)> {
        let tables = self.tables.read();
        let Some(table) = tables.get(schema.table) else {
            return Ok((Vec::new(), 0));
        };

        let mut hits: Vec<&Row> = table
            .rows
            .values()
            .filter(|row| is_live(schema, row))
            .filter(|row| owner_of(&tables, schema, row) == Some(query.merchant_id))
            .filter(|row| query.conditions.iter().all(|c| matches(row, c)))
            .collect();

        hits.sort_by(|a, b| {
            let ordering = compare_values(a.get(query.sort_column), b.get(query.sort_column))
                .then_with(|| compare_values(a.get(ID), b.get(ID)));
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = hits.len() as u64;
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let rows = hits
            .into_iter()
            .skip(offset)
            .take(query.page.limit as usize)
            .map(|row| output_row(schema, row))
            .collect();
        Ok((rows, total))
    }

    async fn find_scoped(
        &self,
        schema: &'static Schema,
        merchant_id: i64,
        id: i64,
    ) -> RepoResult<Option<Row>> {
        let tables = self.tables.read();
        let row = tables
            .get(schema.table)
            .and_then(|t| t.rows.get(&id))
            .filter(|row| owner_of(&tables, schema, row) == Some(merchant_id))
            .map(|row| output_row(schema, row));
        Ok(row)
    }

    async fn exists_unique(
        &self,
        schema: &'static Schema,
        merchant_id: i64,
        key: &[(&'static str, Value)],
        exclude_id: Option<i64>,
    ) -> RepoResult<bool> {
        let tables = self.tables.read();
        let Some(table) = tables.get(schema.table) else {
            return Ok(false);
        };
        let found = table
            .rows
            .iter()
            .filter(|(id, _)| Some(**id) != exclude_id)
            .filter(|(_, row)| is_live(schema, row))
            .filter(|(_, row)| owner_of(&tables, schema, row) == Some(merchant_id))
            .any(|(_, row)| key.iter().all(|(column, value)| row.get(*column) == Some(value)));
        Ok(found)
    }

    async fn insert(&self, schema: &'static Schema, values: Row) -> RepoResult<i64> {
        let mut tables = self.tables.write();
        Ok(insert_row(&mut tables, schema, values))
    }

    async fn update(&self, schema: &'static Schema, id: i64, changes: Row) -> RepoResult<()> {
        let mut tables = self.tables.write();
        let row = tables
            .get_mut(schema.table)
            .and_then(|t| t.rows.get_mut(&id))
            .ok_or_else(|| RepoError::NotFound(format!("{} {id}", schema.table)))?;

        for (column, value) in changes {
            if schema.column(&column).is_some() {
                row.insert(column, value);
            }
        }
        row.insert(UPDATED_AT.to_string(), Value::from(now_millis()));
        Ok(())
    }

    async fn mark_deleted(&self, schema: &'static Schema, id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.write();
        let row = tables
            .get_mut(schema.table)
            .and_then(|t| t.rows.get_mut(&id))
            .ok_or_else(|| RepoError::NotFound(format!("{} {id}", schema.table)))?;

        if !is_live(schema, row) {
            return Ok(false);
        }
        row.insert(
            schema.status_column.to_string(),
            Value::from(RecordStatus::Deleted.as_str()),
        );
        row.insert(UPDATED_AT.to_string(), Value::from(now_millis()));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::{Column, ColumnKind};
    use serde_json::json;
    use shared::PageRequest;

    static MERCHANTS: Schema = Schema {
        table: "merchants",
        status_column: "status",
        columns: &[Column::new("name", ColumnKind::Text)],
        owner: Owner::Root,
        sortable: &[],
    };

    static ORDERS: Schema = Schema {
        table: "orders",
        status_column: "status",
        columns: &[
            Column::new("merchant_id", ColumnKind::BigInt),
            Column::new("order_number", ColumnKind::Text),
            Column::new("total", ColumnKind::Double),
        ],
        owner: Owner::Merchant("merchant_id"),
        sortable: &[("orderNumber", "order_number"), ("total", "total")],
    };

    static PAYMENTS: Schema = Schema {
        table: "payments",
        status_column: "logical_status",
        columns: &[
            Column::new("order_id", ColumnKind::BigInt),
            Column::new("reference", ColumnKind::Text),
        ],
        owner: Owner::Parent {
            column: "order_id",
            parent: &ORDERS,
        },
        sortable: &[],
    };

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn list<'a>(merchant_id: i64, conditions: &'a [Condition]) -> ListQuery<'a> {
        ListQuery {
            merchant_id,
            conditions,
            sort_column: "created_at",
            sort_order: SortOrder::Desc,
            page: PageRequest { page: 1, limit: 10 },
        }
    }

    fn make_store() -> MemoryGateway {
        let gw = MemoryGateway::new();
        gw.seed(&MERCHANTS, row(json!({ "name": "Bistro" })));
        gw.seed(&MERCHANTS, row(json!({ "name": "Cafe" })));
        gw
    }

    #[tokio::test]
    async fn test_insert_sets_lifecycle_and_timestamps() {
        let gw = make_store();
        let id = gw
            .insert(&ORDERS, row(json!({ "merchant_id": 1, "order_number": "A-1" })))
            .await
            .unwrap();
        let stored = gw.find_scoped(&ORDERS, 1, id).await.unwrap().unwrap();
        assert_eq!(stored["status"], "ACTIVE");
        assert!(stored["created_at"].as_i64().unwrap() > 0);
        assert_eq!(stored["created_at"], stored["updated_at"]);
        assert_eq!(stored["total"], Value::Null);
    }

    #[tokio::test]
    async fn test_scoping_through_parent_chain() {
        let gw = make_store();
        let order_m1 = gw
            .insert(&ORDERS, row(json!({ "merchant_id": 1, "order_number": "A-1" })))
            .await
            .unwrap();
        let order_m2 = gw
            .insert(&ORDERS, row(json!({ "merchant_id": 2, "order_number": "B-1" })))
            .await
            .unwrap();
        let pay_m1 = gw
            .insert(&PAYMENTS, row(json!({ "order_id": order_m1, "reference": "tx-1" })))
            .await
            .unwrap();
        gw.insert(&PAYMENTS, row(json!({ "order_id": order_m2, "reference": "tx-2" })))
            .await
            .unwrap();

        let (rows, total) = gw.find_page(&PAYMENTS, &list(1, &[])).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0]["reference"], "tx-1");
        assert_eq!(rows[0]["status"], "ACTIVE");
        assert!(rows[0].get("logical_status").is_none());

        assert!(gw.find_scoped(&PAYMENTS, 2, pay_m1).await.unwrap().is_none());
        assert!(gw.find_scoped(&PAYMENTS, 1, pay_m1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_deleted_rows_hidden_from_lists_but_visible_to_find_scoped() {
        let gw = make_store();
        let id = gw
            .insert(&ORDERS, row(json!({ "merchant_id": 1, "order_number": "A-1" })))
            .await
            .unwrap();
        assert!(gw.mark_deleted(&ORDERS, id).await.unwrap());
        assert!(!gw.mark_deleted(&ORDERS, id).await.unwrap());

        let (rows, total) = gw.find_page(&ORDERS, &list(1, &[])).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(total, 0);

        let stored = gw.find_scoped(&ORDERS, 1, id).await.unwrap().unwrap();
        assert_eq!(stored["status"], "DELETED");
    }

    #[tokio::test]
    async fn test_exists_unique_ignores_deleted_and_excluded() {
        let gw = make_store();
        let key = [("order_number", json!("A-1"))];
        let id = gw
            .insert(&ORDERS, row(json!({ "merchant_id": 1, "order_number": "A-1" })))
            .await
            .unwrap();

        assert!(gw.exists_unique(&ORDERS, 1, &key, None).await.unwrap());
        assert!(!gw.exists_unique(&ORDERS, 2, &key, None).await.unwrap());
        assert!(!gw.exists_unique(&ORDERS, 1, &key, Some(id)).await.unwrap());

        gw.mark_deleted(&ORDERS, id).await.unwrap();
        assert!(!gw.exists_unique(&ORDERS, 1, &key, None).await.unwrap());
    }

    #[tokio::test]
    async fn test_conditions_sorting_and_paging() {
        let gw = make_store();
        for (number, total) in [("A-1", 30.0), ("A-2", 10.0), ("B-7", 20.0), ("a-9", 5.0)] {
            gw.insert(
                &ORDERS,
                row(json!({ "merchant_id": 1, "order_number": number, "total": total })),
            )
            .await
            .unwrap();
        }

        let conditions = [Condition::Contains("order_number", "a-".into())];
        let mut query = list(1, &conditions);
        query.sort_column = "total";
        query.sort_order = SortOrder::Asc;
        let (rows, total) = gw.find_page(&ORDERS, &query).await.unwrap();
        assert_eq!(total, 3);
        let numbers: Vec<_> = rows.iter().map(|r| r["order_number"].clone()).collect();
        assert_eq!(numbers, vec![json!("a-9"), json!("A-2"), json!("A-1")]);

        query.page = PageRequest { page: 2, limit: 2 };
        let (rows, total) = gw.find_page(&ORDERS, &query).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["order_number"], "A-1");
    }

    #[tokio::test]
    async fn test_update_only_touches_known_columns() {
        let gw = make_store();
        let id = gw
            .insert(&ORDERS, row(json!({ "merchant_id": 1, "order_number": "A-1" })))
            .await
            .unwrap();
        gw.update(
            &ORDERS,
            id,
            row(json!({ "order_number": "A-9", "status": "DELETED", "bogus": 1 })),
        )
        .await
        .unwrap();

        let stored = gw.find_scoped(&ORDERS, 1, id).await.unwrap().unwrap();
        assert_eq!(stored["order_number"], "A-9");
        assert_eq!(stored["status"], "ACTIVE");
        assert!(stored.get("bogus").is_none());

        let missing = gw.update(&ORDERS, 999, Row::new()).await;
        assert!(matches!(missing, Err(RepoError::NotFound(_))));
    }

    #[test]
    fn test_compare_values_nulls_last() {
        assert_eq!(
            compare_values(Some(&json!(1)), Some(&Value::Null)),
            Ordering::Less
        );
        assert_eq!(compare_values(None, Some(&json!("a"))), Ordering::Greater);
        assert_eq!(
            compare_values(Some(&json!(2.5)), Some(&json!(10))),
            Ordering::Less
        );
    }
}
