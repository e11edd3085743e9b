//! List filter builder
//!
//! Turns the raw string values of a resource filter into gateway
//! [`Condition`]s. Text filters are case-insensitive substring matches; ids,
//! flags and enums match exactly; date bounds are inclusive.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{AppError, AppResult};
use shared::request::{filter_bool, filter_date, filter_enum, filter_id, filter_text};

use crate::db::Condition;
use crate::db::schema::CREATED_AT;

#[derive(Debug, Default)]
pub struct Conditions(Vec<Condition>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(mut self, column: &'static str, raw: Option<String>) -> Self {
        if let Some(text) = filter_text(raw) {
            self.0.push(Condition::Contains(column, text));
        }
        self
    }

    pub fn id(mut self, column: &'static str, raw: Option<String>, field: &str) -> AppResult<Self> {
        if let Some(id) = filter_id(raw, field)? {
            self.0.push(Condition::Eq(column, Value::from(id)));
        }
        Ok(self)
    }

    pub fn flag(mut self, column: &'static str, raw: Option<String>, field: &str) -> AppResult<Self> {
        if let Some(flag) = filter_bool(raw, field)? {
            self.0.push(Condition::Eq(column, Value::Bool(flag)));
        }
        Ok(self)
    }

    /// Exact match on an enum column; the value must name a variant of `E`
    pub fn variant<E>(mut self, column: &'static str, raw: Option<String>, field: &str) -> AppResult<Self>
    where
        E: DeserializeOwned + Serialize,
    {
        if let Some(variant) = filter_enum::<E>(raw, field)? {
            let value = serde_json::to_value(&variant)
                .map_err(|e| AppError::internal(format!("enum filter {field}: {e}")))?;
            self.0.push(Condition::Eq(column, value));
        }
        Ok(self)
    }

    /// Inclusive range on a millisecond timestamp column
    pub fn between(
        mut self,
        column: &'static str,
        from: Option<String>,
        to: Option<String>,
        (from_field, to_field): (&str, &str),
    ) -> AppResult<Self> {
        if let Some(from) = filter_date(from, from_field, false)? {
            self.0.push(Condition::AtLeast(column, from));
        }
        if let Some(to) = filter_date(to, to_field, true)? {
            self.0.push(Condition::AtMost(column, to));
        }
        Ok(self)
    }

    /// `createdFrom` / `createdTo`
    pub fn created(self, from: Option<String>, to: Option<String>) -> AppResult<Self> {
        self.between(CREATED_AT, from, to, ("createdFrom", "createdTo"))
    }

    pub fn build(self) -> Vec<Condition> {
        self.0
    }
}
