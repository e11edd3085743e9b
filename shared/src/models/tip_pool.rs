//! Tip Pool Models

use serde::{Deserialize, Serialize};

use super::common::RecordStatus;

/// How pooled tips are split between members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionMethod {
    Equal,
    HoursWorked,
    Weighted,
}

/// Tip pool columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipPool {
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub distribution_method: DistributionMethod,
    /// Share of collected tips routed into the pool, 0..=100
    pub percentage: f64,
}

/// Create tip pool payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipPoolCreate {
    pub name: String,
    pub description: Option<String>,
    pub distribution_method: DistributionMethod,
    pub percentage: f64,
}

/// Update tip pool payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipPoolUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub distribution_method: Option<DistributionMethod>,
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipPoolFilter {
    pub name: Option<String>,
    pub distribution_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipPoolResponse {
    pub id: i64,
    pub merchant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub distribution_method: DistributionMethod,
    pub percentage: f64,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
