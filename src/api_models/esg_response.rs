use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{EsgRecord, EsgResponse};
use crate::services::ratios::EsgRatios;

/// A stored ESG row as returned to its owner.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EsgResponseView {
    pub id: i32,
    pub user_id: i32,
    #[serde(flatten)]
    pub record: EsgRecord,
    pub created_at: DateTime<Utc>,
}

impl From<EsgResponse> for EsgResponseView {
    fn from(row: EsgResponse) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            record: row.record(),
            created_at: row.created_at,
        }
    }
}

/// A draft row after normalization, with the ratios the form shows live.
#[derive(Debug, Serialize, PartialEq)]
pub struct PreviewRow {
    pub record: EsgRecord,
    pub ratios: EsgRatios,
}

impl From<EsgRecord> for PreviewRow {
    fn from(record: EsgRecord) -> Self {
        let ratios = EsgRatios::compute(&record);
        Self { record, ratios }
    }
}
