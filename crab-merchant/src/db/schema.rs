//! Table descriptors
//!
//! A [`Schema`] tells the gateways everything they need to run the generic
//! CRUD queries for one table: its columns and their SQL types, which column
//! carries the lifecycle, how to reach the owning merchant, and which fields
//! callers may sort by.

/// SQL type of a column, used to bind and decode values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    BigInt,
    Integer,
    Double,
    Text,
    Bool,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// How a table reaches its merchant
#[derive(Debug, Clone, Copy)]
pub enum Owner {
    /// The merchants table itself; the row id is the tenant id
    Root,
    /// A column holding the merchant id directly
    Merchant(&'static str),
    /// A foreign key to a parent table that is owned in turn
    Parent {
        column: &'static str,
        parent: &'static Schema,
    },
}

#[derive(Debug)]
pub struct Schema {
    pub table: &'static str,
    /// Lifecycle column (`ACTIVE` / `DELETED`); exposed as `status` in rows
    pub status_column: &'static str,
    /// Data columns, excluding id, lifecycle and timestamps
    pub columns: &'static [Column],
    pub owner: Owner,
    /// (API field, column) pairs callers may sort by
    pub sortable: &'static [(&'static str, &'static str)],
}

/// Columns every table carries besides its data columns
pub const ID: &str = "id";
pub const STATUS: &str = "status";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

/// Sort fields available on every table
const COMMON_SORTS: [(&str, &str); 3] = [
    ("createdAt", CREATED_AT),
    ("updatedAt", UPDATED_AT),
    ("id", ID),
];

impl Schema {
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Resolve a requested sort field to a column, defaulting to `created_at`
    pub fn sort_column(&self, requested: Option<&str>) -> &'static str {
        let Some(requested) = requested else {
            return CREATED_AT;
        };
        COMMON_SORTS
            .iter()
            .chain(self.sortable.iter())
            .find(|(api, _)| *api == requested)
            .map(|(_, column)| *column)
            .unwrap_or(CREATED_AT)
    }

    /// Tables walked from this one up to the merchant, nearest first
    pub fn owner_chain(&'static self) -> Vec<(&'static Schema, &'static str)> {
        let mut chain = Vec::new();
        let mut current = self;
        while let Owner::Parent { column, parent } = current.owner {
            chain.push((parent, column));
            current = parent;
        }
        chain
    }

    /// Column of the last table in the chain that holds the merchant id
    pub fn tenant_column(&'static self) -> (&'static Schema, &'static str) {
        let root = self.owner_chain().last().map(|(s, _)| *s).unwrap_or(self);
        match root.owner {
            Owner::Merchant(column) => (root, column),
            _ => (root, ID),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERCHANTS: Schema = Schema {
        table: "merchants",
        status_column: "status",
        columns: &[Column::new("name", ColumnKind::Text)],
        owner: Owner::Root,
        sortable: &[],
    };

    const ORDERS: Schema = Schema {
        table: "orders",
        status_column: "status",
        columns: &[
            Column::new("merchant_id", ColumnKind::BigInt),
            Column::new("order_number", ColumnKind::Text),
        ],
        owner: Owner::Merchant("merchant_id"),
        sortable: &[("orderNumber", "order_number")],
    };

    const PAYMENTS: Schema = Schema {
        table: "payments",
        status_column: "logical_status",
        columns: &[Column::new("order_id", ColumnKind::BigInt)],
        owner: Owner::Parent {
            column: "order_id",
            parent: &ORDERS,
        },
        sortable: &[],
    };

    static PAYMENTS_REF: &Schema = &PAYMENTS;
    static ORDERS_REF: &Schema = &ORDERS;
    static MERCHANTS_REF: &Schema = &MERCHANTS;

    #[test]
    fn test_sort_column_whitelist() {
        assert_eq!(ORDERS.sort_column(None), "created_at");
        assert_eq!(ORDERS.sort_column(Some("orderNumber")), "order_number");
        assert_eq!(ORDERS.sort_column(Some("updatedAt")), "updated_at");
        assert_eq!(ORDERS.sort_column(Some("merchant_id; DROP")), "created_at");
    }

    #[test]
    fn test_owner_chain() {
        let chain = PAYMENTS_REF.owner_chain();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].0.table, "orders");
        assert_eq!(chain[0].1, "order_id");
        assert!(ORDERS_REF.owner_chain().is_empty());
    }

    #[test]
    fn test_tenant_column() {
        let (table, column) = PAYMENTS_REF.tenant_column();
        assert_eq!((table.table, column), ("orders", "merchant_id"));

        let (table, column) = ORDERS_REF.tenant_column();
        assert_eq!((table.table, column), ("orders", "merchant_id"));

        let (table, column) = MERCHANTS_REF.tenant_column();
        assert_eq!((table.table, column), ("merchants", "id"));
    }
}
