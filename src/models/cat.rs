//! Cat domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::weight::WeightRecord;

/// Cat profile, owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cat {
    pub id: Uuid,
    pub name: String,
    pub target_weight: f64,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update cat request
#[derive(Debug, Deserialize, Validate)]
pub struct CatRequest {
    #[validate(length(min = 1, max = 100, message = "cat name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(
        exclusive_min = 0.0,
        max = 50.0,
        message = "target weight must be between 0 and 50"
    ))]
    pub target_weight: f64,
}

impl CatRequest {
    /// 去除首尾空白后再校验，空白名视为空名
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

/// Cat with its weight history, newest first
#[derive(Debug, Serialize)]
pub struct CatWithRecords {
    #[serde(flatten)]
    pub cat: Cat,
    pub weight_records: Vec<WeightRecord>,
}
