//! Delivery Info Models

use serde::{Deserialize, Serialize};

use super::common::{RecordStatus, RelatedSummary};

/// Delivery info columns (at most one live record per online order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryInfo {
    pub online_order_id: i64,
    pub recipient_name: String,
    pub address: String,
    pub contact_phone: Option<String>,
    pub courier_name: Option<String>,
    pub tracking_code: Option<String>,
    pub delivery_fee: f64,
    pub estimated_delivery_at: Option<i64>,
}

/// Create delivery info payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfoCreate {
    pub online_order_id: i64,
    pub recipient_name: String,
    pub address: String,
    pub contact_phone: Option<String>,
    pub courier_name: Option<String>,
    pub tracking_code: Option<String>,
    pub delivery_fee: Option<f64>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub estimated_delivery_at: Option<String>,
}

/// Update delivery info payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfoUpdate {
    pub online_order_id: Option<i64>,
    pub recipient_name: Option<String>,
    pub address: Option<String>,
    pub contact_phone: Option<String>,
    pub courier_name: Option<String>,
    pub tracking_code: Option<String>,
    pub delivery_fee: Option<f64>,
    pub estimated_delivery_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfoFilter {
    pub online_order_id: Option<String>,
    pub courier_name: Option<String>,
    pub tracking_code: Option<String>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfoResponse {
    pub id: i64,
    pub online_order: RelatedSummary,
    pub recipient_name: String,
    pub address: String,
    pub contact_phone: Option<String>,
    pub courier_name: Option<String>,
    pub tracking_code: Option<String>,
    pub delivery_fee: f64,
    pub estimated_delivery_at: Option<i64>,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
