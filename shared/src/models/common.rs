//! Types shared by every resource model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical lifecycle of a stored record
///
/// Records are created `ACTIVE` and flip to `DELETED` exactly once; there is
/// no hard delete and no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Active,
    Deleted,
}

impl RecordStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Deleted => "DELETED",
        }
    }

    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "DELETED" => Ok(Self::Deleted),
            other => Err(format!("unknown record status: {other}")),
        }
    }
}

/// Minimal view of a related record nested inside a response
///
/// Only `{ id, name }` or `{ id, status }` ever cross the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedSummary {
    Named { id: i64, name: String },
    Stated { id: i64, status: String },
}

impl RelatedSummary {
    pub fn id(&self) -> i64 {
        match self {
            Self::Named { id, .. } | Self::Stated { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_status_serde() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::Deleted).unwrap(),
            "\"DELETED\""
        );
        let status: RecordStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, RecordStatus::Active);
        assert_eq!("DELETED".parse::<RecordStatus>(), Ok(RecordStatus::Deleted));
        assert!("deleted".parse::<RecordStatus>().is_err());
    }

    #[test]
    fn test_related_summary_shapes() {
        let named = RelatedSummary::Named {
            id: 3,
            name: "Grill".into(),
        };
        assert_eq!(
            serde_json::to_value(&named).unwrap(),
            serde_json::json!({ "id": 3, "name": "Grill" })
        );

        let stated = RelatedSummary::Stated {
            id: 9,
            status: "PENDING".into(),
        };
        assert_eq!(
            serde_json::to_value(&stated).unwrap(),
            serde_json::json!({ "id": 9, "status": "PENDING" })
        );
        assert_eq!(stated.id(), 9);
    }
}
