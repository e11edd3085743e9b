//! QR ordering codes

use shared::error::{AppResult, ErrorCode};
use shared::models::{QrCode, QrCodeCreate, QrCodeFilter, QrCodeResponse, QrCodeUpdate};

use crate::crud::{Conditions, FormatError, Related, Resource, Stored, Touched, UniqueKey};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_non_negative, validate_optional_text,
    validate_required_text,
};

pub const QR_CODES: Schema = Schema {
    table: "qr_codes",
    status_column: "status",
    columns: &[
        Column::new("merchant_id", ColumnKind::BigInt),
        Column::new("code", ColumnKind::Text),
        Column::new("label", ColumnKind::Text),
        Column::new("target_url", ColumnKind::Text),
        Column::new("table_name", ColumnKind::Text),
        Column::new("scan_count", ColumnKind::BigInt),
    ],
    owner: Owner::Merchant("merchant_id"),
    sortable: &[
        ("code", "code"),
        ("label", "label"),
        ("scanCount", "scan_count"),
    ],
};

pub struct QrCodes;

impl Resource for QrCodes {
    const LABEL: &'static str = "QR code";
    const SCHEMA: &'static Schema = &QR_CODES;
    const NOT_FOUND: ErrorCode = ErrorCode::QrCodeNotFound;

    type Data = QrCode;
    type Create = QrCodeCreate;
    type Update = QrCodeUpdate;
    type Filter = QrCodeFilter;
    type Response = QrCodeResponse;

    fn build(input: QrCodeCreate, merchant_id: i64) -> AppResult<QrCode> {
        Ok(QrCode {
            merchant_id,
            code: input.code,
            label: input.label,
            target_url: input.target_url,
            table_name: input.table_name,
            scan_count: 0,
        })
    }

    fn apply(data: &mut QrCode, patch: QrCodeUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.code, patch.code, "code");
        touched.set(&mut data.label, patch.label, "label");
        touched.set(&mut data.target_url, patch.target_url, "target_url");
        touched.set_some(&mut data.table_name, patch.table_name, "table_name");
        touched.set(&mut data.scan_count, patch.scan_count, "scan_count");
        Ok(touched)
    }

    fn validate(data: &QrCode) -> AppResult<()> {
        validate_required_text(&data.code, "code", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&data.label, "label", MAX_NAME_LEN)?;
        validate_required_text(&data.target_url, "targetUrl", MAX_URL_LEN)?;
        validate_optional_text(&data.table_name, "tableName", MAX_NAME_LEN)?;
        validate_non_negative(data.scan_count, "scanCount")
    }

    fn conditions(filter: QrCodeFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .contains("code", filter.code)
            .contains("label", filter.label)
            .contains("table_name", filter.table_name)
            .build())
    }

    fn unique_keys(data: &QrCode) -> Vec<UniqueKey> {
        vec![UniqueKey::single(
            "code",
            data.code.as_str(),
            ErrorCode::QrCodeExists,
            format!("QR code '{}' already exists", data.code),
        )]
    }

    fn format(record: Stored<QrCode>, _related: &Related) -> Result<QrCodeResponse, FormatError> {
        let data = record.data;
        Ok(QrCodeResponse {
            id: record.id,
            merchant_id: data.merchant_id,
            code: data.code,
            label: data.label,
            target_url: data.target_url,
            table_name: data.table_name,
            scan_count: data.scan_count,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
