//! Automation Action Models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{RecordStatus, RelatedSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    SendEmail,
    SendSms,
    SendPush,
    GrantCoupon,
    AddPoints,
}

/// Automation action columns (one step of an automation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationAction {
    pub automation_id: i64,
    pub action_type: ActionType,
    /// Minutes to wait after the trigger fires
    pub delay_minutes: i32,
    /// Execution order within the automation
    pub position: i32,
    pub payload: Option<Value>,
}

/// Create automation action payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationActionCreate {
    pub automation_id: i64,
    pub action_type: ActionType,
    pub delay_minutes: Option<i32>,
    pub position: Option<i32>,
    /// JSON text, must parse to an object
    pub payload: Option<String>,
}

/// Update automation action payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationActionUpdate {
    pub automation_id: Option<i64>,
    pub action_type: Option<ActionType>,
    pub delay_minutes: Option<i32>,
    pub position: Option<i32>,
    pub payload: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationActionFilter {
    pub automation_id: Option<String>,
    pub action_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationActionResponse {
    pub id: i64,
    pub automation: RelatedSummary,
    pub action_type: ActionType,
    pub delay_minutes: i32,
    pub position: i32,
    pub payload: Option<Value>,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
