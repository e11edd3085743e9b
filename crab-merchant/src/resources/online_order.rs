//! Online orders
//!
//! Orders placed through web, app, QR or marketplace channels. An order may
//! point at the QR code it was placed from; it then nests that code as
//! `qrCode { id, name }` with the code's label as name.

use shared::error::{AppResult, ErrorCode};
use shared::models::{
    OnlineOrder, OnlineOrderCreate, OnlineOrderFilter, OnlineOrderResponse, OnlineOrderUpdate,
    OrderChannel, OrderStatus,
};

use super::qr_code::QR_CODES;
use crate::crud::{
    Conditions, FormatError, Reference, Related, Relation, Resource, Stored, Touched, UniqueKey,
};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative_amount,
    validate_optional_text, validate_required_text,
};

pub const ONLINE_ORDERS: Schema = Schema {
    table: "online_orders",
    status_column: "status",
    columns: &[
        Column::new("merchant_id", ColumnKind::BigInt),
        Column::new("order_number", ColumnKind::Text),
        Column::new("channel", ColumnKind::Text),
        Column::new("order_status", ColumnKind::Text),
        Column::new("customer_name", ColumnKind::Text),
        Column::new("customer_phone", ColumnKind::Text),
        Column::new("total_amount", ColumnKind::Double),
        Column::new("notes", ColumnKind::Text),
        Column::new("qr_code_id", ColumnKind::BigInt),
    ],
    owner: Owner::Merchant("merchant_id"),
    sortable: &[
        ("orderNumber", "order_number"),
        ("orderStatus", "order_status"),
        ("totalAmount", "total_amount"),
    ],
};

pub struct OnlineOrders;

impl Resource for OnlineOrders {
    const LABEL: &'static str = "Online order";
    const SCHEMA: &'static Schema = &ONLINE_ORDERS;
    const NOT_FOUND: ErrorCode = ErrorCode::OnlineOrderNotFound;

    type Data = OnlineOrder;
    type Create = OnlineOrderCreate;
    type Update = OnlineOrderUpdate;
    type Filter = OnlineOrderFilter;
    type Response = OnlineOrderResponse;

    fn build(input: OnlineOrderCreate, merchant_id: i64) -> AppResult<OnlineOrder> {
        Ok(OnlineOrder {
            merchant_id,
            order_number: input.order_number,
            channel: input.channel,
            order_status: input.order_status.unwrap_or(OrderStatus::Pending),
            customer_name: input.customer_name,
            customer_phone: input.customer_phone,
            total_amount: input.total_amount,
            notes: input.notes,
            qr_code_id: input.qr_code_id,
        })
    }

    fn apply(data: &mut OnlineOrder, patch: OnlineOrderUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.order_number, patch.order_number, "order_number");
        touched.set(&mut data.channel, patch.channel, "channel");
        touched.set(&mut data.order_status, patch.order_status, "order_status");
        touched.set_some(&mut data.customer_name, patch.customer_name, "customer_name");
        touched.set_some(&mut data.customer_phone, patch.customer_phone, "customer_phone");
        touched.set(&mut data.total_amount, patch.total_amount, "total_amount");
        touched.set_some(&mut data.notes, patch.notes, "notes");
        touched.set_some(&mut data.qr_code_id, patch.qr_code_id, "qr_code_id");
        Ok(touched)
    }

    fn validate(data: &OnlineOrder) -> AppResult<()> {
        validate_required_text(&data.order_number, "orderNumber", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.customer_name, "customerName", MAX_NAME_LEN)?;
        validate_optional_text(&data.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        validate_non_negative_amount(data.total_amount, "totalAmount")
    }

    fn conditions(filter: OnlineOrderFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .contains("order_number", filter.order_number)
            .variant::<OrderChannel>("channel", filter.channel, "channel")?
            .variant::<OrderStatus>("order_status", filter.order_status, "orderStatus")?
            .contains("customer_name", filter.customer_name)
            .id("qr_code_id", filter.qr_code_id, "qrCodeId")?
            .created(filter.created_from, filter.created_to)?
            .build())
    }

    fn references(data: &OnlineOrder) -> Vec<Reference> {
        data.qr_code_id
            .map(|id| Reference {
                column: "qr_code_id",
                schema: &QR_CODES,
                id,
                label: "QR code",
                not_found: ErrorCode::QrCodeNotFound,
            })
            .into_iter()
            .collect()
    }

    fn unique_keys(data: &OnlineOrder) -> Vec<UniqueKey> {
        vec![UniqueKey::single(
            "order_number",
            data.order_number.as_str(),
            ErrorCode::OrderNumberExists,
            format!("Order number '{}' already exists", data.order_number),
        )]
    }

    fn relations(data: &OnlineOrder) -> Vec<Relation> {
        data.qr_code_id
            .map(|id| Relation::named("qrCode", &QR_CODES, id, "label"))
            .into_iter()
            .collect()
    }

    fn format(record: Stored<OnlineOrder>, related: &Related) -> Result<OnlineOrderResponse, FormatError> {
        let qr_code = match record.data.qr_code_id {
            Some(_) => Some(related.require(Self::LABEL, "qrCode")?),
            None => None,
        };
        let data = record.data;
        Ok(OnlineOrderResponse {
            id: record.id,
            merchant_id: data.merchant_id,
            order_number: data.order_number,
            channel: data.channel,
            order_status: data.order_status,
            customer_name: data.customer_name,
            customer_phone: data.customer_phone,
            total_amount: data.total_amount,
            notes: data.notes,
            qr_code,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::RecordStatus;

    fn order(qr_code_id: Option<i64>) -> OnlineOrder {
        OnlineOrders::build(
            OnlineOrderCreate {
                order_number: "WEB-1001".into(),
                channel: OrderChannel::Web,
                order_status: None,
                customer_name: Some("Ana".into()),
                customer_phone: None,
                total_amount: 24.5,
                notes: None,
                qr_code_id,
            },
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_to_pending() {
        assert_eq!(order(None).order_status, OrderStatus::Pending);
    }

    #[test]
    fn test_qr_code_is_optional() {
        assert!(OnlineOrders::references(&order(None)).is_empty());
        assert!(OnlineOrders::relations(&order(None)).is_empty());
        assert_eq!(OnlineOrders::references(&order(Some(8)))[0].id, 8);

        let stored = Stored {
            id: 1,
            status: RecordStatus::Active,
            created_at: 0,
            updated_at: 0,
            data: order(None),
        };
        let response = OnlineOrders::format(stored, &Related::default()).unwrap();
        assert!(response.qr_code.is_none());
    }

    #[test]
    fn test_negative_total_rejected() {
        let mut data = order(None);
        data.total_amount = -1.0;
        assert_eq!(
            OnlineOrders::validate(&data).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }
}
