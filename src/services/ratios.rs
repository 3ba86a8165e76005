use serde::Serialize;

use crate::models::esg_record::EsgRecord;

/// The four dashboard ratios for one financial year.
///
/// Values are unrounded; formatting belongs to whoever displays them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EsgRatios {
    /// Emissions (T CO2e) per unit of revenue.
    pub carbon_intensity: f64,
    /// Renewable share of electricity consumption, in percent.
    pub renewable_ratio: f64,
    /// Female share of employees, in percent.
    pub diversity_ratio: f64,
    /// Community spend as a share of revenue, in percent.
    pub community_spend_ratio: f64,
}

impl EsgRatios {
    pub fn compute(record: &EsgRecord) -> Self {
        Self {
            carbon_intensity: guarded_ratio(record.emissions, record.revenue, 1.0),
            renewable_ratio: guarded_ratio(record.renewable, record.electricity, 100.0),
            diversity_ratio: guarded_ratio(record.female_employees, record.employees, 100.0),
            community_spend_ratio: guarded_ratio(record.community_spend, record.revenue, 100.0),
        }
    }
}

/// `numerator / denominator * scale`, or 0 when the denominator is zero or the
/// result is not finite.
fn guarded_ratio(numerator: f64, denominator: f64, scale: f64) -> f64 {
    if denominator == 0.0 || denominator.is_nan() {
        return 0.0;
    }
    let value = numerator / denominator * scale;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
