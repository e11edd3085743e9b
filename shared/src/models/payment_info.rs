//! Payment Info Models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{RecordStatus, RelatedSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Cash,
    Wallet,
    BankTransfer,
}

/// Payment info columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub online_order_id: i64,
    /// Provider transaction id, unique per merchant among live records
    pub transaction_id: String,
    pub payment_method: PaymentMethod,
    pub provider: Option<String>,
    pub amount: f64,
    /// ISO 4217 code, upper case
    pub currency: String,
    pub paid_at: Option<i64>,
    /// Provider callback body (JSON object)
    pub raw_response: Option<Value>,
}

/// Create payment info payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfoCreate {
    pub online_order_id: i64,
    pub transaction_id: String,
    pub payment_method: PaymentMethod,
    pub provider: Option<String>,
    pub amount: f64,
    pub currency: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`
    pub paid_at: Option<String>,
    /// JSON text, must parse to an object
    pub raw_response: Option<String>,
}

/// Update payment info payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfoUpdate {
    pub online_order_id: Option<i64>,
    pub transaction_id: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub provider: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub paid_at: Option<String>,
    pub raw_response: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfoFilter {
    pub online_order_id: Option<String>,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub paid_from: Option<String>,
    pub paid_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfoResponse {
    pub id: i64,
    pub online_order: RelatedSummary,
    pub transaction_id: String,
    pub payment_method: PaymentMethod,
    pub provider: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub paid_at: Option<i64>,
    pub raw_response: Option<Value>,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
