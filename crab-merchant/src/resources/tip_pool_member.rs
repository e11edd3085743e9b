//! Tip pool members
//!
//! An employee may be enrolled in a pool once while the membership is live.
//! Both the pool and the employee must belong to the caller's merchant.

use serde_json::Value;
use shared::error::{AppResult, ErrorCode};
use shared::models::{
    TipPoolMember, TipPoolMemberCreate, TipPoolMemberFilter, TipPoolMemberResponse,
    TipPoolMemberUpdate,
};

use super::reference::EMPLOYEES;
use super::tip_pool::TIP_POOLS;
use crate::crud::{
    Conditions, FormatError, Reference, Related, Relation, Resource, Stored, Touched, UniqueKey,
};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::validate_non_negative_amount;

/// Weight given to a member when none is supplied
const DEFAULT_SHARE_WEIGHT: f64 = 1.0;

pub const TIP_POOL_MEMBERS: Schema = Schema {
    table: "tip_pool_members",
    status_column: "status",
    columns: &[
        Column::new("tip_pool_id", ColumnKind::BigInt),
        Column::new("employee_id", ColumnKind::BigInt),
        Column::new("share_weight", ColumnKind::Double),
    ],
    owner: Owner::Parent {
        column: "tip_pool_id",
        parent: &TIP_POOLS,
    },
    sortable: &[("shareWeight", "share_weight")],
};

pub struct TipPoolMembers;

impl Resource for TipPoolMembers {
    const LABEL: &'static str = "Tip pool member";
    const SCHEMA: &'static Schema = &TIP_POOL_MEMBERS;
    const NOT_FOUND: ErrorCode = ErrorCode::TipPoolMemberNotFound;

    type Data = TipPoolMember;
    type Create = TipPoolMemberCreate;
    type Update = TipPoolMemberUpdate;
    type Filter = TipPoolMemberFilter;
    type Response = TipPoolMemberResponse;

    fn build(input: TipPoolMemberCreate, _merchant_id: i64) -> AppResult<TipPoolMember> {
        Ok(TipPoolMember {
            tip_pool_id: input.tip_pool_id,
            employee_id: input.employee_id,
            share_weight: input.share_weight.unwrap_or(DEFAULT_SHARE_WEIGHT),
        })
    }

    fn apply(data: &mut TipPoolMember, patch: TipPoolMemberUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.tip_pool_id, patch.tip_pool_id, "tip_pool_id");
        touched.set(&mut data.employee_id, patch.employee_id, "employee_id");
        touched.set(&mut data.share_weight, patch.share_weight, "share_weight");
        Ok(touched)
    }

    fn validate(data: &TipPoolMember) -> AppResult<()> {
        validate_non_negative_amount(data.share_weight, "shareWeight")
    }

    fn conditions(filter: TipPoolMemberFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .id("tip_pool_id", filter.tip_pool_id, "tipPoolId")?
            .id("employee_id", filter.employee_id, "employeeId")?
            .build())
    }

    fn references(data: &TipPoolMember) -> Vec<Reference> {
        vec![
            Reference {
                column: "tip_pool_id",
                schema: &TIP_POOLS,
                id: data.tip_pool_id,
                label: "Tip pool",
                not_found: ErrorCode::TipPoolNotFound,
            },
            Reference {
                column: "employee_id",
                schema: &EMPLOYEES,
                id: data.employee_id,
                label: "Employee",
                not_found: ErrorCode::EmployeeNotFound,
            },
        ]
    }

    fn unique_keys(data: &TipPoolMember) -> Vec<UniqueKey> {
        vec![UniqueKey {
            columns: vec![
                ("tip_pool_id", Value::from(data.tip_pool_id)),
                ("employee_id", Value::from(data.employee_id)),
            ],
            code: ErrorCode::TipPoolMemberExists,
            message: format!(
                "Employee {} is already a member of tip pool {}",
                data.employee_id, data.tip_pool_id
            ),
        }]
    }

    fn relations(data: &TipPoolMember) -> Vec<Relation> {
        vec![
            Relation::named("tipPool", &TIP_POOLS, data.tip_pool_id, "name"),
            Relation::named("employee", &EMPLOYEES, data.employee_id, "name"),
        ]
    }

    fn format(record: Stored<TipPoolMember>, related: &Related) -> Result<TipPoolMemberResponse, FormatError> {
        Ok(TipPoolMemberResponse {
            id: record.id,
            tip_pool: related.require(Self::LABEL, "tipPool")?,
            employee: related.require(Self::LABEL, "employee")?,
            share_weight: record.data.share_weight,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
