//! Request types for list endpoints
//!
//! List endpoints take a flat query string: `page`, `limit`, `sortBy`,
//! `sortOrder` plus resource-specific filter keys. The reserved keys are
//! parsed into [`ListParams`], everything else is left for the resource's
//! filter type.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::util::parse_date_millis;

/// Default page number (1-based)
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size
pub const DEFAULT_LIMIT: u32 = 10;
/// Maximum page size
pub const MAX_LIMIT: u32 = 100;

/// Raw query string of a list request
pub type QueryMap = BTreeMap<String, String>;

/// Validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Validate page >= 1 and limit in `[1, MAX_LIMIT]`
    pub fn new(page: i64, limit: i64) -> AppResult<Self> {
        let page = u32::try_from(page).ok().filter(|p| *p >= 1).ok_or_else(|| {
            AppError::invalid_pagination("page must be greater than or equal to 1")
                .with_detail("page", page)
        })?;
        let limit = u32::try_from(limit)
            .ok()
            .filter(|l| (1..=MAX_LIMIT).contains(l))
            .ok_or_else(|| {
                AppError::invalid_pagination(format!("limit must be between 1 and {MAX_LIMIT}"))
                    .with_detail("limit", limit)
            })?;
        Ok(Self { page, limit })
    }

    /// Row offset for database queries
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// Parsed list request
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: PageRequest,
    /// Requested sort field (API name, camelCase); resolved against a whitelist
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    /// Remaining query keys, handed to the resource filter
    pub filters: QueryMap,
}

impl ListParams {
    /// Split the reserved keys out of a raw query string.
    ///
    /// Unknown `sortOrder` values fall back to `DESC`.
    pub fn from_query(mut query: QueryMap) -> AppResult<Self> {
        let page = parse_int_param(query.remove("page"), "page", DEFAULT_PAGE)?;
        let limit = parse_int_param(query.remove("limit"), "limit", DEFAULT_LIMIT)?;
        let page = PageRequest::new(page, limit)?;

        let sort_by = query
            .remove("sortBy")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let sort_order = query
            .remove("sortOrder")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        Ok(Self {
            page,
            sort_by,
            sort_order,
            filters: query,
        })
    }

    /// Deserialize the remaining keys into a resource filter
    pub fn filter<F: DeserializeOwned>(&self) -> AppResult<F> {
        let object = self
            .filters
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        serde_json::from_value(Value::Object(object))
            .map_err(|e| AppError::invalid_request(format!("Invalid filter: {e}")))
    }
}

fn parse_int_param(raw: Option<String>, name: &str, default: u32) -> AppResult<i64> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(i64::from(default)),
        Some(s) => s.parse::<i64>().map_err(|_| {
            AppError::invalid_pagination(format!("{name} must be an integer"))
                .with_detail(name, s)
        }),
    }
}

/// Parse a path id; must be a positive integer
pub fn parse_record_id(raw: &str) -> AppResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_id(raw)),
    }
}

// ── Filter value helpers ────────────────────────────────────────────

/// Trimmed, non-empty text filter
pub fn filter_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Foreign key filter; must be a positive integer when present
pub fn filter_id(raw: Option<String>, field: &str) -> AppResult<Option<i64>> {
    match filter_text(raw) {
        None => Ok(None),
        Some(s) => match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Some(id)),
            _ => Err(AppError::invalid_format(format!(
                "{field} must be a positive integer"
            ))
            .with_detail("field", field)),
        },
    }
}

/// Boolean filter accepting `true`/`false`/`1`/`0`
pub fn filter_bool(raw: Option<String>, field: &str) -> AppResult<Option<bool>> {
    match filter_text(raw).as_deref() {
        None => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(_) => Err(
            AppError::invalid_format(format!("{field} must be true or false"))
                .with_detail("field", field),
        ),
    }
}

/// Date filter; `end_of_day` widens a bare date to its last millisecond
pub fn filter_date(raw: Option<String>, field: &str, end_of_day: bool) -> AppResult<Option<i64>> {
    match filter_text(raw) {
        None => Ok(None),
        Some(s) => parse_date_millis(&s, end_of_day).map(Some).ok_or_else(|| {
            AppError::invalid_format(format!("{field} must be a valid date"))
                .with_detail("field", field)
                .with_detail("value", s)
        }),
    }
}

/// Enum filter; the value must name one of the enum's variants
pub fn filter_enum<E: DeserializeOwned>(raw: Option<String>, field: &str) -> AppResult<Option<E>> {
    match filter_text(raw) {
        None => Ok(None),
        Some(s) => serde_json::from_value(Value::String(s.clone()))
            .map(Some)
            .map_err(|_| {
                AppError::invalid_format(format!("{field} has an invalid value"))
                    .with_detail("field", field)
                    .with_detail("value", s)
            }),
    }
}
