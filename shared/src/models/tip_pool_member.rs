//! Tip Pool Member Models

use serde::{Deserialize, Serialize};

use super::common::{RecordStatus, RelatedSummary};

/// Tip pool member columns (employee enrolled in a pool)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipPoolMember {
    pub tip_pool_id: i64,
    pub employee_id: i64,
    pub share_weight: f64,
}

/// Create tip pool member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipPoolMemberCreate {
    pub tip_pool_id: i64,
    pub employee_id: i64,
    pub share_weight: Option<f64>,
}

/// Update tip pool member payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipPoolMemberUpdate {
    pub tip_pool_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub share_weight: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipPoolMemberFilter {
    pub tip_pool_id: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipPoolMemberResponse {
    pub id: i64,
    pub tip_pool: RelatedSummary,
    pub employee: RelatedSummary,
    pub share_weight: f64,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
