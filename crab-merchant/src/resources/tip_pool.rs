//! Tip pools

use shared::error::{AppResult, ErrorCode};
use shared::models::{
    DistributionMethod, TipPool, TipPoolCreate, TipPoolFilter, TipPoolResponse, TipPoolUpdate,
};

use crate::crud::{Conditions, FormatError, Related, Resource, Stored, Touched, UniqueKey};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_range, validate_required_text,
};

pub const TIP_POOLS: Schema = Schema {
    table: "tip_pools",
    status_column: "status",
    columns: &[
        Column::new("merchant_id", ColumnKind::BigInt),
        Column::new("name", ColumnKind::Text),
        Column::new("description", ColumnKind::Text),
        Column::new("distribution_method", ColumnKind::Text),
        Column::new("percentage", ColumnKind::Double),
    ],
    owner: Owner::Merchant("merchant_id"),
    sortable: &[("name", "name"), ("percentage", "percentage")],
};

pub struct TipPools;

impl Resource for TipPools {
    const LABEL: &'static str = "Tip pool";
    const SCHEMA: &'static Schema = &TIP_POOLS;
    const NOT_FOUND: ErrorCode = ErrorCode::TipPoolNotFound;

    type Data = TipPool;
    type Create = TipPoolCreate;
    type Update = TipPoolUpdate;
    type Filter = TipPoolFilter;
    type Response = TipPoolResponse;

    fn build(input: TipPoolCreate, merchant_id: i64) -> AppResult<TipPool> {
        Ok(TipPool {
            merchant_id,
            name: input.name,
            description: input.description,
            distribution_method: input.distribution_method,
            percentage: input.percentage,
        })
    }

    fn apply(data: &mut TipPool, patch: TipPoolUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.name, patch.name, "name");
        touched.set_some(&mut data.description, patch.description, "description");
        touched.set(&mut data.distribution_method, patch.distribution_method, "distribution_method");
        touched.set(&mut data.percentage, patch.percentage, "percentage");
        Ok(touched)
    }

    fn validate(data: &TipPool) -> AppResult<()> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_range(data.percentage, "percentage", 0.0, 100.0)
    }

    fn conditions(filter: TipPoolFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .contains("name", filter.name)
            .variant::<DistributionMethod>(
                "distribution_method",
                filter.distribution_method,
                "distributionMethod",
            )?
            .build())
    }

    fn unique_keys(data: &TipPool) -> Vec<UniqueKey> {
        vec![UniqueKey::single(
            "name",
            data.name.as_str(),
            ErrorCode::TipPoolNameExists,
            format!("Tip pool '{}' already exists", data.name),
        )]
    }

    fn format(record: Stored<TipPool>, _related: &Related) -> Result<TipPoolResponse, FormatError> {
        let data = record.data;
        Ok(TipPoolResponse {
            id: record.id,
            merchant_id: data.merchant_id,
            name: data.name,
            description: data.description,
            distribution_method: data.distribution_method,
            percentage: data.percentage,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(percentage: f64) -> TipPool {
        TipPools::build(
            TipPoolCreate {
                name: "Floor staff".into(),
                description: None,
                distribution_method: DistributionMethod::HoursWorked,
                percentage,
            },
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_percentage_bounds() {
        assert!(TipPools::validate(&pool(0.0)).is_ok());
        assert!(TipPools::validate(&pool(100.0)).is_ok());
        assert_eq!(
            TipPools::validate(&pool(120.0)).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert!(TipPools::validate(&pool(-1.0)).is_err());
    }

    #[test]
    fn test_rename_touches_unique_key() {
        let mut data = pool(50.0);
        let touched = TipPools::apply(
            &mut data,
            TipPoolUpdate {
                name: Some("Kitchen".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(TipPools::unique_keys(&data)[0].touches(&touched));
    }
}
