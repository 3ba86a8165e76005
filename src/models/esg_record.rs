use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One submitted row exactly as the client sent it.
///
/// Every field is an untyped JSON value; `None` covers both a missing key and
/// an explicit `null`. [`crate::services::normalizer::normalize_record`] is the
/// only way to turn this into an [`EsgRecord`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEsgRecord {
    pub year: Option<Value>,
    pub financial_year: Option<Value>,
    pub electricity: Option<Value>,
    pub renewable: Option<Value>,
    pub fuel: Option<Value>,
    pub emissions: Option<Value>,
    pub employees: Option<Value>,
    pub female_employees: Option<Value>,
    pub training_hours: Option<Value>,
    pub community_spend: Option<Value>,
    pub board_percent: Option<Value>,
    pub privacy_policy: Option<Value>,
    pub revenue: Option<Value>,
}

impl From<&Value> for RawEsgRecord {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(obj) => Self::from_object(obj),
            _ => Self::default(),
        }
    }
}

impl RawEsgRecord {
    fn from_object(obj: &Map<String, Value>) -> Self {
        let field = |key: &str| obj.get(key).filter(|v| !v.is_null()).cloned();
        Self {
            year: field("year"),
            financial_year: field("financialYear"),
            electricity: field("electricity"),
            renewable: field("renewable"),
            fuel: field("fuel"),
            emissions: field("emissions"),
            employees: field("employees"),
            female_employees: field("femaleEmployees"),
            training_hours: field("trainingHours"),
            community_spend: field("communitySpend"),
            board_percent: field("boardPercent"),
            privacy_policy: field("privacyPolicy"),
            revenue: field("revenue"),
        }
    }
}

/// A submission body: either one object or an ordered batch of them.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSubmission {
    Single(RawEsgRecord),
    Batch(Vec<RawEsgRecord>),
}

impl From<&Value> for RawSubmission {
    fn from(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::Batch(items.iter().map(RawEsgRecord::from).collect()),
            other => Self::Single(RawEsgRecord::from(other)),
        }
    }
}

impl RawSubmission {
    pub fn into_records(self) -> Vec<RawEsgRecord> {
        match self {
            Self::Single(record) => vec![record],
            Self::Batch(records) => records,
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}

/// Canonical ESG entry for one financial year.
///
/// All numeric fields are finite and non-negative. Owner and creation time are
/// not part of the record; they are attached when it is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgRecord {
    pub financial_year: String,
    pub electricity: f64,
    pub renewable: f64,
    pub fuel: f64,
    pub emissions: f64,
    pub employees: f64,
    pub female_employees: f64,
    pub training_hours: f64,
    pub community_spend: f64,
    pub board_percent: f64,
    pub privacy_policy: bool,
    pub revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_record_reads_camel_case_keys() {
        let raw = RawEsgRecord::from(&json!({
            "financialYear": "FY 2023-24",
            "femaleEmployees": 8,
            "communitySpend": "10",
            "privacyPolicy": "Yes",
        }));
        assert_eq!(raw.financial_year, Some(json!("FY 2023-24")));
        assert_eq!(raw.female_employees, Some(json!(8)));
        assert_eq!(raw.community_spend, Some(json!("10")));
        assert_eq!(raw.privacy_policy, Some(json!("Yes")));
        assert_eq!(raw.year, None);
    }

    #[test]
    fn test_raw_record_treats_null_as_missing() {
        let raw = RawEsgRecord::from(&json!({ "revenue": null }));
        assert_eq!(raw.revenue, None);
    }

    #[test]
    fn test_non_object_becomes_empty_record() {
        assert_eq!(RawEsgRecord::from(&json!(42)), RawEsgRecord::default());
        assert_eq!(RawEsgRecord::from(&json!("FY24")), RawEsgRecord::default());
    }

    #[test]
    fn test_submission_shape() {
        let single = RawSubmission::from(&json!({ "year": "FY24" }));
        assert!(!single.is_batch());
        assert_eq!(single.into_records().len(), 1);

        let batch = RawSubmission::from(&json!([{ "year": "FY23" }, { "year": "FY24" }]));
        assert!(batch.is_batch());
        let records = batch.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].year, Some(json!("FY24")));

        let empty = RawSubmission::from(&json!([]));
        assert!(empty.into_records().is_empty());
    }
}
