//! QR Ordering Code Models

use serde::{Deserialize, Serialize};

use super::common::RecordStatus;

/// QR code columns (printed code that opens the ordering page)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCode {
    pub merchant_id: i64,
    /// Short code encoded in the QR image, unique per merchant
    pub code: String,
    pub label: String,
    pub target_url: String,
    pub table_name: Option<String>,
    pub scan_count: i64,
}

/// Create QR code payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeCreate {
    pub code: String,
    pub label: String,
    pub target_url: String,
    pub table_name: Option<String>,
}

/// Update QR code payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeUpdate {
    pub code: Option<String>,
    pub label: Option<String>,
    pub target_url: Option<String>,
    pub table_name: Option<String>,
    pub scan_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeFilter {
    pub code: Option<String>,
    pub label: Option<String>,
    pub table_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    pub id: i64,
    pub merchant_id: i64,
    pub code: String,
    pub label: String,
    pub target_url: String,
    pub table_name: Option<String>,
    pub scan_count: i64,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
