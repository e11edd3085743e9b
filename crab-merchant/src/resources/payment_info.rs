//! Payment records of online orders
//!
//! The lifecycle column is `logical_status`. Transaction ids are unique per
//! merchant; since payments reach their merchant through the order, the
//! check runs through the same join as tenant scoping.

use shared::error::{AppResult, ErrorCode};
use shared::models::{
    PaymentInfo, PaymentInfoCreate, PaymentInfoFilter, PaymentInfoResponse, PaymentInfoUpdate,
    PaymentMethod,
};

use super::online_order::ONLINE_ORDERS;
use crate::crud::{
    Conditions, FormatError, Reference, Related, Relation, Resource, Stored, Touched, UniqueKey,
};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, parse_optional_date, parse_optional_json_object,
    validate_currency, validate_non_negative_amount, validate_optional_text,
    validate_required_text,
};

pub const PAYMENT_INFOS: Schema = Schema {
    table: "payment_infos",
    status_column: "logical_status",
    columns: &[
        Column::new("online_order_id", ColumnKind::BigInt),
        Column::new("transaction_id", ColumnKind::Text),
        Column::new("payment_method", ColumnKind::Text),
        Column::new("provider", ColumnKind::Text),
        Column::new("amount", ColumnKind::Double),
        Column::new("currency", ColumnKind::Text),
        Column::new("paid_at", ColumnKind::BigInt),
        Column::new("raw_response", ColumnKind::Json),
    ],
    owner: Owner::Parent {
        column: "online_order_id",
        parent: &ONLINE_ORDERS,
    },
    sortable: &[
        ("amount", "amount"),
        ("paidAt", "paid_at"),
        ("transactionId", "transaction_id"),
    ],
};

pub struct PaymentInfos;

impl Resource for PaymentInfos {
    const LABEL: &'static str = "Payment info";
    const SCHEMA: &'static Schema = &PAYMENT_INFOS;
    const NOT_FOUND: ErrorCode = ErrorCode::PaymentInfoNotFound;

    type Data = PaymentInfo;
    type Create = PaymentInfoCreate;
    type Update = PaymentInfoUpdate;
    type Filter = PaymentInfoFilter;
    type Response = PaymentInfoResponse;

    fn build(input: PaymentInfoCreate, _merchant_id: i64) -> AppResult<PaymentInfo> {
        Ok(PaymentInfo {
            online_order_id: input.online_order_id,
            transaction_id: input.transaction_id,
            payment_method: input.payment_method,
            provider: input.provider,
            amount: input.amount,
            currency: input.currency.to_ascii_uppercase(),
            paid_at: parse_optional_date(input.paid_at, "paidAt")?,
            raw_response: parse_optional_json_object(input.raw_response, "rawResponse")?,
        })
    }

    fn apply(data: &mut PaymentInfo, patch: PaymentInfoUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.online_order_id, patch.online_order_id, "online_order_id");
        touched.set(&mut data.transaction_id, patch.transaction_id, "transaction_id");
        touched.set(&mut data.payment_method, patch.payment_method, "payment_method");
        touched.set_some(&mut data.provider, patch.provider, "provider");
        touched.set(&mut data.amount, patch.amount, "amount");
        let currency = patch.currency.map(|c| c.to_ascii_uppercase());
        touched.set(&mut data.currency, currency, "currency");
        let paid_at = parse_optional_date(patch.paid_at, "paidAt")?;
        touched.set_some(&mut data.paid_at, paid_at, "paid_at");
        let raw_response = parse_optional_json_object(patch.raw_response, "rawResponse")?;
        touched.set_some(&mut data.raw_response, raw_response, "raw_response");
        Ok(touched)
    }

    fn validate(data: &PaymentInfo) -> AppResult<()> {
        validate_required_text(&data.transaction_id, "transactionId", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.provider, "provider", MAX_NAME_LEN)?;
        validate_non_negative_amount(data.amount, "amount")?;
        validate_currency(&data.currency, "currency")
    }

    fn conditions(filter: PaymentInfoFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .id("online_order_id", filter.online_order_id, "onlineOrderId")?
            .variant::<PaymentMethod>("payment_method", filter.payment_method, "paymentMethod")?
            .contains("transaction_id", filter.transaction_id)
            .between("paid_at", filter.paid_from, filter.paid_to, ("paidFrom", "paidTo"))?
            .build())
    }

    fn references(data: &PaymentInfo) -> Vec<Reference> {
        vec![Reference {
            column: "online_order_id",
            schema: &ONLINE_ORDERS,
            id: data.online_order_id,
            label: "Online order",
            not_found: ErrorCode::OnlineOrderNotFound,
        }]
    }

    fn unique_keys(data: &PaymentInfo) -> Vec<UniqueKey> {
        vec![UniqueKey::single(
            "transaction_id",
            data.transaction_id.as_str(),
            ErrorCode::TransactionIdExists,
            format!("Transaction '{}' already exists", data.transaction_id),
        )]
    }

    fn relations(data: &PaymentInfo) -> Vec<Relation> {
        vec![Relation::stated(
            "onlineOrder",
            &ONLINE_ORDERS,
            data.online_order_id,
            "order_status",
        )]
    }

    fn format(record: Stored<PaymentInfo>, related: &Related) -> Result<PaymentInfoResponse, FormatError> {
        let online_order = related.require(Self::LABEL, "onlineOrder")?;
        let data = record.data;
        Ok(PaymentInfoResponse {
            id: record.id,
            online_order,
            transaction_id: data.transaction_id,
            payment_method: data.payment_method,
            provider: data.provider,
            amount: data.amount,
            currency: data.currency,
            paid_at: data.paid_at,
            raw_response: data.raw_response,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> PaymentInfoCreate {
        PaymentInfoCreate {
            online_order_id: 3,
            transaction_id: "txn_123".into(),
            payment_method: PaymentMethod::Card,
            provider: Some("stripe".into()),
            amount: 24.5,
            currency: "eur".into(),
            paid_at: Some("2024-05-01".into()),
            raw_response: Some(r#"{"id": "ch_1"}"#.into()),
        }
    }

    #[test]
    fn test_build_normalizes_currency() {
        let data = PaymentInfos::build(create(), 1).unwrap();
        assert_eq!(data.currency, "EUR");
        assert_eq!(data.paid_at, Some(1_714_521_600_000));
        assert!(PaymentInfos::validate(&data).is_ok());
    }

    #[test]
    fn test_invalid_currency_and_amount() {
        let mut data = PaymentInfos::build(create(), 1).unwrap();
        data.currency = "EURO".into();
        assert!(PaymentInfos::validate(&data).is_err());

        let mut data = PaymentInfos::build(create(), 1).unwrap();
        data.amount = -0.5;
        assert_eq!(
            PaymentInfos::validate(&data).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_paid_range_filter() {
        let conditions = PaymentInfos::conditions(PaymentInfoFilter {
            paid_from: Some("2024-05-01".into()),
            paid_to: Some("2024-05-01".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            conditions,
            vec![
                Condition::AtLeast("paid_at", 1_714_521_600_000),
                Condition::AtMost("paid_at", 1_714_607_999_999),
            ]
        );
    }

    #[test]
    fn test_transaction_unique_through_order() {
        let (table, column) = PaymentInfos::SCHEMA.tenant_column();
        assert_eq!((table.table, column), ("online_orders", "merchant_id"));
    }
}
