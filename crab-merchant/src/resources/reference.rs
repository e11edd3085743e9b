//! Reference tables
//!
//! Merchants and employees are owned by the account service. This crate only
//! reads them: merchants to check the caller's tenant, employees for tip pool
//! membership.

use crate::db::{Column, ColumnKind, Owner, Schema};

/// Tenant root; the row id is the merchant id
pub const MERCHANTS: Schema = Schema {
    table: "merchants",
    status_column: "status",
    columns: &[Column::new("name", ColumnKind::Text)],
    owner: Owner::Root,
    sortable: &[],
};

pub const EMPLOYEES: Schema = Schema {
    table: "employees",
    status_column: "status",
    columns: &[
        Column::new("merchant_id", ColumnKind::BigInt),
        Column::new("name", ColumnKind::Text),
    ],
    owner: Owner::Merchant("merchant_id"),
    sortable: &[],
};
