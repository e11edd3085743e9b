//! Automation actions
//!
//! Steps of a marketing automation. Actions carry no merchant column; they
//! belong to the merchant that owns their automation.

use shared::error::{AppResult, ErrorCode};
use shared::models::{
    ActionType, AutomationAction, AutomationActionCreate, AutomationActionFilter,
    AutomationActionResponse, AutomationActionUpdate,
};

use super::marketing_automation::MARKETING_AUTOMATIONS;
use crate::crud::{Conditions, FormatError, Reference, Related, Relation, Resource, Stored, Touched};
use crate::db::{Column, ColumnKind, Condition, Owner, Schema};
use crate::utils::validation::{parse_optional_json_object, validate_non_negative};

pub const AUTOMATION_ACTIONS: Schema = Schema {
    table: "automation_actions",
    status_column: "status",
    columns: &[
        Column::new("automation_id", ColumnKind::BigInt),
        Column::new("action_type", ColumnKind::Text),
        Column::new("delay_minutes", ColumnKind::Integer),
        Column::new("position", ColumnKind::Integer),
        Column::new("payload", ColumnKind::Json),
    ],
    owner: Owner::Parent {
        column: "automation_id",
        parent: &MARKETING_AUTOMATIONS,
    },
    sortable: &[
        ("position", "position"),
        ("delayMinutes", "delay_minutes"),
        ("actionType", "action_type"),
    ],
};

pub struct AutomationActions;

impl Resource for AutomationActions {
    const LABEL: &'static str = "Automation action";
    const SCHEMA: &'static Schema = &AUTOMATION_ACTIONS;
    const NOT_FOUND: ErrorCode = ErrorCode::AutomationActionNotFound;

    type Data = AutomationAction;
    type Create = AutomationActionCreate;
    type Update = AutomationActionUpdate;
    type Filter = AutomationActionFilter;
    type Response = AutomationActionResponse;

    fn build(input: AutomationActionCreate, _merchant_id: i64) -> AppResult<AutomationAction> {
        Ok(AutomationAction {
            automation_id: input.automation_id,
            action_type: input.action_type,
            delay_minutes: input.delay_minutes.unwrap_or(0),
            position: input.position.unwrap_or(0),
            payload: parse_optional_json_object(input.payload, "payload")?,
        })
    }

    fn apply(data: &mut AutomationAction, patch: AutomationActionUpdate) -> AppResult<Touched> {
        let mut touched = Touched::default();
        touched.set(&mut data.automation_id, patch.automation_id, "automation_id");
        touched.set(&mut data.action_type, patch.action_type, "action_type");
        touched.set(&mut data.delay_minutes, patch.delay_minutes, "delay_minutes");
        touched.set(&mut data.position, patch.position, "position");
        let payload = parse_optional_json_object(patch.payload, "payload")?;
        touched.set_some(&mut data.payload, payload, "payload");
        Ok(touched)
    }

    fn validate(data: &AutomationAction) -> AppResult<()> {
        validate_non_negative(data.delay_minutes.into(), "delayMinutes")?;
        validate_non_negative(data.position.into(), "position")
    }

    fn conditions(filter: AutomationActionFilter) -> AppResult<Vec<Condition>> {
        Ok(Conditions::new()
            .id("automation_id", filter.automation_id, "automationId")?
            .variant::<ActionType>("action_type", filter.action_type, "actionType")?
            .build())
    }

    fn references(data: &AutomationAction) -> Vec<Reference> {
        vec![Reference {
            column: "automation_id",
            schema: &MARKETING_AUTOMATIONS,
            id: data.automation_id,
            label: "Marketing automation",
            not_found: ErrorCode::AutomationNotFound,
        }]
    }

    fn relations(data: &AutomationAction) -> Vec<Relation> {
        vec![Relation::named(
            "automation",
            &MARKETING_AUTOMATIONS,
            data.automation_id,
            "name",
        )]
    }

    fn format(record: Stored<AutomationAction>, related: &Related) -> Result<AutomationActionResponse, FormatError> {
        let automation = related.require(Self::LABEL, "automation")?;
        let data = record.data;
        Ok(AutomationActionResponse {
            id: record.id,
            automation,
            action_type: data.action_type,
            delay_minutes: data.delay_minutes,
            position: data.position,
            payload: data.payload,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action() -> AutomationAction {
        AutomationActions::build(
            AutomationActionCreate {
                automation_id: 4,
                action_type: ActionType::SendEmail,
                delay_minutes: None,
                position: Some(1),
                payload: Some(r#"{"template": "welcome"}"#.into()),
            },
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_owned_through_automation() {
        let (table, column) = AutomationActions::SCHEMA.tenant_column();
        assert_eq!(table.table, "marketing_automations");
        assert_eq!(column, "merchant_id");
    }

    #[test]
    fn test_negative_delay_rejected() {
        let mut data = action();
        assert_eq!(data.delay_minutes, 0);
        AutomationActions::apply(
            &mut data,
            AutomationActionUpdate {
                delay_minutes: Some(-5),
                ..Default::default()
            },
        )
        .unwrap();
        let err = AutomationActions::validate(&data).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_unknown_action_type_filter() {
        let err = AutomationActions::conditions(AutomationActionFilter {
            action_type: Some("FAX".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
