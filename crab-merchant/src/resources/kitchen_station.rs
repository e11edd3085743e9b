//! Kitchen stations

use shared::error::{AppResult, ErrorCode};
use shared::models::{
    KitchenStation, KitchenStationCreate, KitchenStationFilter, KitchenStationResponse,
    KitchenStationUpdate,
};

use crate::crud::{Conditions, FormatError, Related, Resource, Stored, Touched, UniqueKey};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_non_negative, validate_optional_text,
    validate_required_text,
};

pub const KITCHEN_STATIONS: Schema = Schema {
    table: "kitchen_stations",
    status_column: "status",
    columns: &[
        Column::new("merchant_id", ColumnKind::BigInt),
        Column::new("name", ColumnKind::Text),
        Column::new("description", ColumnKind::Text),
        Column::new("sort_order", ColumnKind::Integer),
    ],
    owner: Owner::Merchant("merchant_id"),
    sortable: &[("name", "name"), ("sortOrder", "sort_order")],
};

pub struct KitchenStations;

impl Resource for KitchenStations {
    const LABEL: &'static str = "Kitchen station";
    const SCHEMA: &'static Schema = &KITCHEN_STATIONS;
    const NOT_FOUND: ErrorCode = ErrorCode::KitchenStationNotFound;

    type Data = KitchenStation;
    type Create = KitchenStationCreate;
    type Update = KitchenStationUpdate;
    type Filter = KitchenStationFilter;
    type Response = KitchenStationResponse;

    fn build(input: KitchenStationCreate, merchant_id: i64) -> AppResult<KitchenStation> {
        Ok(KitchenStation {
            merchant_id,
            name: input.name,
            description: input.description,
            sort_order: input.sort_order.unwrap_or(0),
        })
    }

    fn apply(data: &mut KitchenStation, patch: KitchenStationUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.name, patch.name, "name");
        touched.set_some(&mut data.description, patch.description, "description");
        touched.set(&mut data.sort_order, patch.sort_order, "sort_order");
        Ok(touched)
    }

    fn validate(data: &KitchenStation) -> AppResult<()> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_non_negative(data.sort_order.into(), "sortOrder")
    }

    fn conditions(filter: KitchenStationFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .contains("name", filter.name)
            .created(filter.created_from, filter.created_to)?
            .build())
    }

    fn unique_keys(data: &KitchenStation) -> Vec<UniqueKey> {
        vec![UniqueKey::single(
            "name",
            data.name.as_str(),
            ErrorCode::KitchenStationNameExists,
            format!("Kitchen station '{}' already exists", data.name),
        )]
    }

    fn format(record: Stored<KitchenStation>, _related: &Related) -> Result<KitchenStationResponse, FormatError> {
        let data = record.data;
        Ok(KitchenStationResponse {
            id: record.id,
            merchant_id: data.merchant_id,
            name: data.name,
            description: data.description,
            sort_order: data.sort_order,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str) -> KitchenStation {
        KitchenStations::build(
            KitchenStationCreate {
                name: name.into(),
                description: None,
                sort_order: None,
            },
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_build_defaults_sort_order() {
        let data = station("Grill");
        assert_eq!(data.merchant_id, 1);
        assert_eq!(data.sort_order, 0);
        assert!(KitchenStations::validate(&data).is_ok());
    }

    #[test]
    fn test_negative_sort_order_rejected() {
        let mut data = station("Grill");
        let touched = KitchenStations::apply(
            &mut data,
            KitchenStationUpdate {
                sort_order: Some(-1),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(touched.columns(), &["sort_order"]);
        let err = KitchenStations::validate(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = KitchenStations::validate(&station("  ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
