//! Delivery details of online orders
//!
//! At most one live delivery record per order. The lifecycle column is
//! `record_status`.

use shared::error::{AppResult, ErrorCode};
use shared::models::{
    DeliveryInfo, DeliveryInfoCreate, DeliveryInfoFilter, DeliveryInfoResponse, DeliveryInfoUpdate,
};

use super::online_order::ONLINE_ORDERS;
use crate::crud::{
    Conditions, FormatError, Reference, Related, Relation, Resource, Stored, Touched, UniqueKey,
};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, parse_optional_date,
    validate_non_negative_amount, validate_optional_text, validate_required_text,
};

pub const DELIVERY_INFOS: Schema = Schema {
    table: "delivery_infos",
    status_column: "record_status",
    columns: &[
        Column::new("online_order_id", ColumnKind::BigInt),
        Column::new("recipient_name", ColumnKind::Text),
        Column::new("address", ColumnKind::Text),
        Column::new("contact_phone", ColumnKind::Text),
        Column::new("courier_name", ColumnKind::Text),
        Column::new("tracking_code", ColumnKind::Text),
        Column::new("delivery_fee", ColumnKind::Double),
        Column::new("estimated_delivery_at", ColumnKind::BigInt),
    ],
    owner: Owner::Parent {
        column: "online_order_id",
        parent: &ONLINE_ORDERS,
    },
    sortable: &[
        ("recipientName", "recipient_name"),
        ("deliveryFee", "delivery_fee"),
        ("estimatedDeliveryAt", "estimated_delivery_at"),
    ],
};

pub struct DeliveryInfos;

impl Resource for DeliveryInfos {
    const LABEL: &'static str = "Delivery info";
    const SCHEMA: &'static Schema = &DELIVERY_INFOS;
    const NOT_FOUND: ErrorCode = ErrorCode::DeliveryInfoNotFound;

    type Data = DeliveryInfo;
    type Create = DeliveryInfoCreate;
    type Update = DeliveryInfoUpdate;
    type Filter = DeliveryInfoFilter;
    type Response = DeliveryInfoResponse;

    fn build(input: DeliveryInfoCreate, _merchant_id: i64) -> AppResult<DeliveryInfo> {
        Ok(DeliveryInfo {
            online_order_id: input.online_order_id,
            recipient_name: input.recipient_name,
            address: input.address,
            contact_phone: input.contact_phone,
            courier_name: input.courier_name,
            tracking_code: input.tracking_code,
            delivery_fee: input.delivery_fee.unwrap_or(0.0),
            estimated_delivery_at: parse_optional_date(
                input.estimated_delivery_at,
                "estimatedDeliveryAt",
            )?,
        })
    }

    fn apply(data: &mut DeliveryInfo, patch: DeliveryInfoUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.online_order_id, patch.online_order_id, "online_order_id");
        touched.set(&mut data.recipient_name, patch.recipient_name, "recipient_name");
        touched.set(&mut data.address, patch.address, "address");
        touched.set_some(&mut data.contact_phone, patch.contact_phone, "contact_phone");
        touched.set_some(&mut data.courier_name, patch.courier_name, "courier_name");
        touched.set_some(&mut data.tracking_code, patch.tracking_code, "tracking_code");
        touched.set(&mut data.delivery_fee, patch.delivery_fee, "delivery_fee");
        let eta = parse_optional_date(patch.estimated_delivery_at, "estimatedDeliveryAt")?;
        touched.set_some(&mut data.estimated_delivery_at, eta, "estimated_delivery_at");
        Ok(touched)
    }

    fn validate(data: &DeliveryInfo) -> AppResult<()> {
        validate_required_text(&data.recipient_name, "recipientName", MAX_NAME_LEN)?;
        validate_required_text(&data.address, "address", MAX_NOTE_LEN)?;
        validate_optional_text(&data.contact_phone, "contactPhone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.courier_name, "courierName", MAX_NAME_LEN)?;
        validate_optional_text(&data.tracking_code, "trackingCode", MAX_SHORT_TEXT_LEN)?;
        validate_non_negative_amount(data.delivery_fee, "deliveryFee")
    }

    fn conditions(filter: DeliveryInfoFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .id("online_order_id", filter.online_order_id, "onlineOrderId")?
            .contains("courier_name", filter.courier_name)
            .contains("tracking_code", filter.tracking_code)
            .created(filter.created_from, filter.created_to)?
            .build())
    }

    fn references(data: &DeliveryInfo) -> Vec<Reference> {
        vec![Reference {
            column: "online_order_id",
            schema: &ONLINE_ORDERS,
            id: data.online_order_id,
            label: "Online order",
            not_found: ErrorCode::OnlineOrderNotFound,
        }]
    }

    fn unique_keys(data: &DeliveryInfo) -> Vec<UniqueKey> {
        vec![UniqueKey::single(
            "online_order_id",
            data.online_order_id,
            ErrorCode::DeliveryInfoExists,
            format!(
                "Delivery info for online order {} already exists",
                data.online_order_id
            ),
        )]
    }

    fn relations(data: &DeliveryInfo) -> Vec<Relation> {
        vec![Relation::stated(
            "onlineOrder",
            &ONLINE_ORDERS,
            data.online_order_id,
            "order_status",
        )]
    }

    fn format(record: Stored<DeliveryInfo>, related: &Related) -> Result<DeliveryInfoResponse, FormatError> {
        let online_order = related.require(Self::LABEL, "onlineOrder")?;
        let data = record.data;
        Ok(DeliveryInfoResponse {
            id: record.id,
            online_order,
            recipient_name: data.recipient_name,
            address: data.address,
            contact_phone: data.contact_phone,
            courier_name: data.courier_name,
            tracking_code: data.tracking_code,
            delivery_fee: data.delivery_fee,
            estimated_delivery_at: data.estimated_delivery_at,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> DeliveryInfoCreate {
        DeliveryInfoCreate {
            online_order_id: 3,
            recipient_name: "Ana".into(),
            address: "Calle Mayor 1".into(),
            contact_phone: None,
            courier_name: None,
            tracking_code: None,
            delivery_fee: None,
            estimated_delivery_at: Some("2024-05-01T18:30:00Z".into()),
        }
    }

    #[test]
    fn test_build_parses_eta_and_defaults_fee() {
        let data = DeliveryInfos::build(create(), 1).unwrap();
        assert_eq!(data.delivery_fee, 0.0);
        assert_eq!(data.estimated_delivery_at, Some(1_714_588_200_000));
    }

    #[test]
    fn test_malformed_eta_rejected() {
        let mut input = create();
        input.estimated_delivery_at = Some("soon".into());
        assert_eq!(
            DeliveryInfos::build(input, 1).unwrap_err().code,
            ErrorCode::InvalidFormat
        );
    }

    #[test]
    fn test_one_delivery_per_order() {
        let data = DeliveryInfos::build(create(), 1).unwrap();
        let keys = DeliveryInfos::unique_keys(&data);
        assert_eq!(keys[0].columns, vec![("online_order_id", serde_json::Value::from(3))]);
        assert_eq!(keys[0].code, ErrorCode::DeliveryInfoExists);
    }

    #[test]
    fn test_lifecycle_column() {
        assert_eq!(DeliveryInfos::SCHEMA.status_column, "record_status");
    }
}
