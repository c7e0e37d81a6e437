//! Weight record domain models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A single weigh-in. The cat's weight is derived: the owner steps on the
/// scale alone, then again holding the cat.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeightRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub user_weight: f64,
    pub combined_weight: f64,
    pub cat_weight: f64,
    pub cat_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create weight record request
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_weight_request))]
pub struct CreateWeightRecordRequest {
    pub date: NaiveDate,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "user weight must be between 0 and 1000"
    ))]
    pub user_weight: f64,
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "combined weight must be between 0 and 1000"
    ))]
    pub combined_weight: f64,
}

fn validate_weight_request(req: &CreateWeightRecordRequest) -> Result<(), ValidationError> {
    if req.combined_weight <= req.user_weight {
        let mut err = ValidationError::new("combined_weight");
        err.message = Some("combined weight must be greater than user weight".into());
        return Err(err);
    }
    if req.date > Utc::now().date_naive() {
        let mut err = ValidationError::new("date");
        err.message = Some("date cannot be in the future".into());
        return Err(err);
    }
    Ok(())
}

impl CreateWeightRecordRequest {
    /// 体重保留两位小数
    pub fn normalized(mut self) -> Self {
        self.user_weight = round2(self.user_weight);
        self.combined_weight = round2(self.combined_weight);
        self
    }

    /// 猫的体重由合计体重与主人体重之差得出
    pub fn cat_weight(&self) -> f64 {
        round2(self.combined_weight - self.user_weight)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Plot data for a cat's weight-over-time chart
#[derive(Debug, Serialize)]
pub struct PlotData {
    pub cat_id: Uuid,
    pub name: String,
    pub dates: Vec<String>,
    pub weights: Vec<f64>,
    pub target_weight: f64,
}
