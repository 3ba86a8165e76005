use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::models::esg_record::EsgRecord;
use crate::schema::esg_responses;

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = esg_responses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EsgResponse {
    pub id: i32,
    pub user_id: i32,
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
    pub created_at: DateTime<Utc>,
}

impl EsgResponse {
    /// The stored row without its owner, id and timestamp.
    pub fn record(&self) -> EsgRecord {
        EsgRecord {
            financial_year: self.financial_year.clone(),
            electricity: self.electricity,
            renewable: self.renewable,
            fuel: self.fuel,
            emissions: self.emissions,
            employees: self.employees,
            female_employees: self.female_employees,
            training_hours: self.training_hours,
            community_spend: self.community_spend,
            board_percent: self.board_percent,
            privacy_policy: self.privacy_policy,
            revenue: self.revenue,
        }
    }
}

/// Insert form of a record. `created_at` is left to the database default.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = esg_responses)]
pub struct NewEsgResponse {
    pub user_id: i32,
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

impl NewEsgResponse {
    pub fn for_owner(owner_id: i32, record: EsgRecord) -> Self {
        Self {
            user_id: owner_id,
            financial_year: record.financial_year,
            electricity: record.electricity,
            renewable: record.renewable,
            fuel: record.fuel,
            emissions: record.emissions,
            employees: record.employees,
            female_employees: record.female_employees,
            training_hours: record.training_hours,
            community_spend: record.community_spend,
            board_percent: record.board_percent,
            privacy_policy: record.privacy_policy,
            revenue: record.revenue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_row_round_trips_record() {
        let record = EsgRecord {
            financial_year: "FY 2023-24".to_string(),
            electricity: 1000.0,
            renewable: 250.0,
            privacy_policy: true,
            revenue: 500.0,
            ..Default::default()
        };
        let new_row = NewEsgResponse::for_owner(7, record.clone());
        assert_eq!(new_row.user_id, 7);

        let stored = EsgResponse {
            id: 1,
            user_id: new_row.user_id,
            financial_year: new_row.financial_year,
            electricity: new_row.electricity,
            renewable: new_row.renewable,
            fuel: new_row.fuel,
            emissions: new_row.emissions,
            employees: new_row.employees,
            female_employees: new_row.female_employees,
            training_hours: new_row.training_hours,
            community_spend: new_row.community_spend,
            board_percent: new_row.board_percent,
            privacy_policy: new_row.privacy_policy,
            revenue: new_row.revenue,
            created_at: Utc::now(),
        };
        assert_eq!(stored.record(), record);
    }
}
