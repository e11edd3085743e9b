//! Kitchen display devices
//!
//! Devices hang off a station of the same merchant. The hardware identifier
//! is unique among the merchant's live devices.

use shared::error::{AppResult, ErrorCode};
use shared::models::{
    DeviceType, KitchenDevice, KitchenDeviceCreate, KitchenDeviceFilter, KitchenDeviceResponse,
    KitchenDeviceUpdate,
};

use super::kitchen_station::KITCHEN_STATIONS;
use crate::crud::{
    Conditions, FormatError, Reference, Related, Relation, Resource, Stored, Touched, UniqueKey,
};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, parse_optional_json_object, validate_optional_text,
    validate_required_text,
};

pub const KITCHEN_DEVICES: Schema = Schema {
    table: "kitchen_devices",
    status_column: "status",
    columns: &[
        Column::new("merchant_id", ColumnKind::BigInt),
        Column::new("station_id", ColumnKind::BigInt),
        Column::new("device_identifier", ColumnKind::Text),
        Column::new("device_name", ColumnKind::Text),
        Column::new("device_type", ColumnKind::Text),
        Column::new("ip_address", ColumnKind::Text),
        Column::new("settings", ColumnKind::Json),
    ],
    owner: Owner::Merchant("merchant_id"),
    sortable: &[
        ("deviceName", "device_name"),
        ("deviceIdentifier", "device_identifier"),
        ("deviceType", "device_type"),
    ],
};

pub struct KitchenDevices;

impl Resource for KitchenDevices {
    const LABEL: &'static str = "Kitchen device";
    const SCHEMA: &'static Schema = &KITCHEN_DEVICES;
    const NOT_FOUND: ErrorCode = ErrorCode::KitchenDeviceNotFound;

    type Data = KitchenDevice;
    type Create = KitchenDeviceCreate;
    type Update = KitchenDeviceUpdate;
    type Filter = KitchenDeviceFilter;
    type Response = KitchenDeviceResponse;

    fn build(input: KitchenDeviceCreate, merchant_id: i64) -> AppResult<KitchenDevice> {
        Ok(KitchenDevice {
            merchant_id,
            station_id: input.station_id,
            device_identifier: input.device_identifier,
            device_name: input.device_name,
            device_type: input.device_type,
            ip_address: input.ip_address,
            settings: parse_optional_json_object(input.settings, "settings")?,
        })
    }

    fn apply(data: &mut KitchenDevice, patch: KitchenDeviceUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.station_id, patch.station_id, "station_id");
        touched.set(&mut data.device_identifier, patch.device_identifier, "device_identifier");
        touched.set(&mut data.device_name, patch.device_name, "device_name");
        touched.set(&mut data.device_type, patch.device_type, "device_type");
        touched.set_some(&mut data.ip_address, patch.ip_address, "ip_address");
        let settings = parse_optional_json_object(patch.settings, "settings")?;
        touched.set_some(&mut data.settings, settings, "settings");
        Ok(touched)
    }

    fn validate(data: &KitchenDevice) -> AppResult<()> {
        validate_required_text(&data.device_identifier, "deviceIdentifier", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&data.device_name, "deviceName", MAX_NAME_LEN)?;
        validate_optional_text(&data.ip_address, "ipAddress", MAX_SHORT_TEXT_LEN)
    }

    fn conditions(filter: KitchenDeviceFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .id("station_id", filter.station_id, "stationId")?
            .variant::<DeviceType>("device_type", filter.device_type, "deviceType")?
            .contains("device_name", filter.device_name)
            .contains("device_identifier", filter.device_identifier)
            .created(filter.created_from, filter.created_to)?
            .build())
    }

    fn references(data: &KitchenDevice) -> Vec<Reference> {
        vec![Reference {
            column: "station_id",
            schema: &KITCHEN_STATIONS,
            id: data.station_id,
            label: "Kitchen station",
            not_found: ErrorCode::KitchenStationNotFound,
        }]
    }

    fn unique_keys(data: &KitchenDevice) -> Vec<UniqueKey> {
        vec![UniqueKey::single(
            "device_identifier",
            data.device_identifier.as_str(),
            ErrorCode::DeviceIdentifierExists,
            format!("Device identifier '{}' already exists", data.device_identifier),
        )]
    }

    fn relations(data: &KitchenDevice) -> Vec<Relation> {
        vec![Relation::named("station", &KITCHEN_STATIONS, data.station_id, "name")]
    }

    fn format(record: Stored<KitchenDevice>, related: &Related) -> Result<KitchenDeviceResponse, FormatError> {
        let station = related.require(Self::LABEL, "station")?;
        let data = record.data;
        Ok(KitchenDeviceResponse {
            id: record.id,
            merchant_id: data.merchant_id,
            station,
            device_identifier: data.device_identifier,
            device_name: data.device_name,
            device_type: data.device_type,
            ip_address: data.ip_address,
            settings: data.settings,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
