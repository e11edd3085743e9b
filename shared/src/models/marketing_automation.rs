//! Marketing Automation Models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::RecordStatus;

/// Event that starts an automation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
    OrderCompleted,
    CustomerBirthday,
    CustomerInactive,
    SignUp,
    Scheduled,
}

/// Marketing automation columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingAutomation {
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub trigger_type: TriggerType,
    pub trigger_config: Option<Value>,
    pub is_enabled: bool,
}

/// Create marketing automation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingAutomationCreate {
    pub name: String,
    pub description: Option<String>,
    pub trigger_type: TriggerType,
    /// JSON text, must parse to an object
    pub trigger_config: Option<String>,
    pub is_enabled: Option<bool>,
}

/// Update marketing automation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingAutomationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub trigger_type: Option<TriggerType>,
    pub trigger_config: Option<String>,
    pub is_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingAutomationFilter {
    pub name: Option<String>,
    pub trigger_type: Option<String>,
    pub is_enabled: Option<String>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingAutomationResponse {
    pub id: i64,
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub trigger_type: TriggerType,
    pub trigger_config: Option<Value>,
    pub is_enabled: bool,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
