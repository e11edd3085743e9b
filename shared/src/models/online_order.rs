//! Online Order Models

use serde::{Deserialize, Serialize};

use super::common::{RecordStatus, RelatedSummary};

/// Where the order was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderChannel {
    Web,
    App,
    QrCode,
    Marketplace,
}

/// Fulfilment progress of an online order
///
/// Independent of the record lifecycle: a `CANCELLED` order is still an
/// `ACTIVE` record until it is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    Ready,
    Dispatched,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Dispatched => "DISPATCHED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Online order columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineOrder {
    pub merchant_id: i64,
    pub order_number: String,
    pub channel: OrderChannel,
    pub order_status: OrderStatus,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total_amount: f64,
    pub notes: Option<String>,
    /// QR code the order was placed through, if any
    pub qr_code_id: Option<i64>,
}

/// Create online order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineOrderCreate {
    pub order_number: String,
    pub channel: OrderChannel,
    pub order_status: Option<OrderStatus>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub qr_code_id: Option<i64>,
}

/// Update online order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineOrderUpdate {
    pub order_number: Option<String>,
    pub channel: Option<OrderChannel>,
    pub order_status: Option<OrderStatus>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total_amount: Option<f64>,
    pub notes: Option<String>,
    pub qr_code_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineOrderFilter {
    pub order_number: Option<String>,
    pub channel: Option<String>,
    pub order_status: Option<String>,
    pub customer_name: Option<String>,
    pub qr_code_id: Option<String>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineOrderResponse {
    pub id: i64,
    pub merchant_id: i64,
    pub order_number: String,
    pub channel: OrderChannel,
    pub order_status: OrderStatus,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub qr_code: Option<RelatedSummary>,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
