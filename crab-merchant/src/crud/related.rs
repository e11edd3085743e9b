//! Related-row summaries handed to the response formatter

use std::collections::HashMap;

use shared::models::RelatedSummary;
use thiserror::Error;

/// Formatting failures are programmer errors, never caller errors
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("relation `{relation}` of {resource} was not loaded before formatting")]
    MissingRelation {
        resource: &'static str,
        relation: &'static str,
    },
}

/// Summaries loaded for one record, keyed by relation name
#[derive(Debug, Default, Clone)]
pub struct Related(HashMap<&'static str, RelatedSummary>);

impl Related {
    pub fn insert(&mut self, key: &'static str, summary: RelatedSummary) {
        self.0.insert(key, summary);
    }

    /// Summary of an optional relation
    pub fn get(&self, key: &str) -> Option<RelatedSummary> {
        self.0.get(key).cloned()
    }

    /// Summary of a mandatory relation
    pub fn require(
        &self,
        resource: &'static str,
        key: &'static str,
    ) -> Result<RelatedSummary, FormatError> {
        self.get(key).ok_or(FormatError::MissingRelation {
            resource,
            relation: key,
        })
    }
}
