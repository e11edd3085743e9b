//! Marketing automations

use shared::error::{AppResult, ErrorCode};
use shared::models::{
    MarketingAutomation, MarketingAutomationCreate, MarketingAutomationFilter,
    MarketingAutomationResponse, MarketingAutomationUpdate, TriggerType,
};

use crate::crud::{Conditions, FormatError, Related, Resource, Stored, Touched, UniqueKey};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, parse_optional_json_object, validate_optional_text,
    validate_required_text,
};

pub const MARKETING_AUTOMATIONS: Schema = Schema {
    table: "marketing_automations",
    status_column: "status",
    columns: &[
        Column::new("merchant_id", ColumnKind::BigInt),
        Column::new("name", ColumnKind::Text),
        Column::new("description", ColumnKind::Text),
        Column::new("trigger_type", ColumnKind::Text),
        Column::new("trigger_config", ColumnKind::Json),
        Column::new("is_enabled", ColumnKind::Bool),
    ],
    owner: Owner::Merchant("merchant_id"),
    sortable: &[("name", "name"), ("triggerType", "trigger_type")],
};

pub struct MarketingAutomations;

impl Resource for MarketingAutomations {
    const LABEL: &'static str = "Marketing automation";
    const SCHEMA: &'static Schema = &MARKETING_AUTOMATIONS;
    const NOT_FOUND: ErrorCode = ErrorCode::AutomationNotFound;

    type Data = MarketingAutomation;
    type Create = MarketingAutomationCreate;
    type Update = MarketingAutomationUpdate;
    type Filter = MarketingAutomationFilter;
    type Response = MarketingAutomationResponse;

    fn build(input: MarketingAutomationCreate, merchant_id: i64) -> AppResult<MarketingAutomation> {
        Ok(MarketingAutomation {
            merchant_id,
            name: input.name,
            description: input.description,
            trigger_type: input.trigger_type,
            trigger_config: parse_optional_json_object(input.trigger_config, "triggerConfig")?,
            is_enabled: input.is_enabled.unwrap_or(true),
        })
    }

    fn apply(data: &mut MarketingAutomation, patch: MarketingAutomationUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.name, patch.name, "name");
        touched.set_some(&mut data.description, patch.description, "description");
        touched.set(&mut data.trigger_type, patch.trigger_type, "trigger_type");
        let config = parse_optional_json_object(patch.trigger_config, "triggerConfig")?;
        touched.set_some(&mut data.trigger_config, config, "trigger_config");
        touched.set(&mut data.is_enabled, patch.is_enabled, "is_enabled");
        Ok(touched)
    }

    fn validate(data: &MarketingAutomation) -> AppResult<()> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)
    }

    fn conditions(filter: MarketingAutomationFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .contains("name", filter.name)
            .variant::<TriggerType>("trigger_type", filter.trigger_type, "triggerType")?
            .flag("is_enabled", filter.is_enabled, "isEnabled")?
            .created(filter.created_from, filter.created_to)?
            .build())
    }

    fn unique_keys(data: &MarketingAutomation) -> Vec<UniqueKey> {
        vec![UniqueKey::single(
            "name",
            data.name.as_str(),
            ErrorCode::AutomationNameExists,
            format!("Marketing automation '{}' already exists", data.name),
        )]
    }

    fn format(
        record: Stored<MarketingAutomation>,
        _related: &Related,
    ) -> Result<MarketingAutomationResponse, FormatError> {
        let data = record.data;
        Ok(MarketingAutomationResponse {
            id: record.id,
            merchant_id: data.merchant_id,
            name: data.name,
            description: data.description,
            trigger_type: data.trigger_type,
            trigger_config: data.trigger_config,
            is_enabled: data.is_enabled,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
