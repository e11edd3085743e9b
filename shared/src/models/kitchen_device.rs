//! Kitchen Display Device Models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{RecordStatus, RelatedSummary};

/// Kind of hardware registered at a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    KitchenDisplay,
    ExpoDisplay,
    Printer,
    BumpBar,
}

/// Kitchen device columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenDevice {
    pub merchant_id: i64,
    pub station_id: i64,
    /// Hardware identifier, unique per merchant among live devices
    pub device_identifier: String,
    pub device_name: String,
    pub device_type: DeviceType,
    pub ip_address: Option<String>,
    /// Free-form display settings (JSON object)
    pub settings: Option<Value>,
}

/// Create kitchen device payload
///
/// `settings` arrives as JSON text and must parse to an object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenDeviceCreate {
    pub station_id: i64,
    pub device_identifier: String,
    pub device_name: String,
    pub device_type: DeviceType,
    pub ip_address: Option<String>,
    pub settings: Option<String>,
}

/// Update kitchen device payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenDeviceUpdate {
    pub station_id: Option<i64>,
    pub device_identifier: Option<String>,
    pub device_name: Option<String>,
    pub device_type: Option<DeviceType>,
    pub ip_address: Option<String>,
    pub settings: Option<String>,
}

/// Kitchen device list filters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenDeviceFilter {
    pub station_id: Option<String>,
    pub device_type: Option<String>,
    pub device_name: Option<String>,
    pub device_identifier: Option<String>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenDeviceResponse {
    pub id: i64,
    pub merchant_id: i64,
    pub station: RelatedSummary,
    pub device_identifier: String,
    pub device_name: String,
    pub device_type: DeviceType,
    pub ip_address: Option<String>,
    pub settings: Option<Value>,
    pub status: RecordStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
