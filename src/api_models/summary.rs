use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::EsgResponse;
use crate::services::ratios::EsgRatios;

/// One dashboard entry: the year label plus its ratios.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub id: i32,
    pub year: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub ratios: EsgRatios,
}

impl From<&EsgResponse> for SummaryRow {
    fn from(row: &EsgResponse) -> Self {
        Self {
            id: row.id,
            year: row.financial_year.clone(),
            created_at: row.created_at,
            ratios: EsgRatios::compute(&row.record()),
        }
    }
}
