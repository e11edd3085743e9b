//! Kitchen Station Models

use serde::{Deserialize, Serialize};

use super::common::RecordStatus;

/// Kitchen station columns (prep area a display device is attached to)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenStation {
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

/// Create kitchen station payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenStationCreate {
    pub name: String,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

/// Update kitchen station payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenStationUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

/// Kitchen station list filters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenStationFilter {
    pub name: Option<String>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenStationResponse {
    pub id: i64,
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
