//! Weight record repository (数据库访问层)

use crate::{error::AppError, models::weight::WeightRecord};
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

pub struct WeightRepository {
    db: PgPool,
}

impl WeightRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 某只猫的体重记录，最新在前
    pub async fn list_for_cat(
        &self,
        cat_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WeightRecord>, AppError> {
        let records = sqlx::query_as::<_, WeightRecord>(
            r#"
            SELECT * FROM weight_records
            WHERE cat_id = $1
            ORDER BY date DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(cat_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    /// 某只猫的全部体重记录，按日期升序，用于绘图
    pub async fn list_for_cat_by_date(&self, cat_id: Uuid) -> Result<Vec<WeightRecord>, AppError> {
        let records = sqlx::query_as::<_, WeightRecord>(
            "SELECT * FROM weight_records WHERE cat_id = $1 ORDER BY date",
        )
        .bind(cat_id)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    /// 创建体重记录
    pub async fn create(
        &self,
        cat_id: Uuid,
        date: NaiveDate,
        user_weight: f64,
        combined_weight: f64,
        cat_weight: f64,
    ) -> Result<WeightRecord, AppError> {
        let record = sqlx::query_as::<_, WeightRecord>(
            r#"
            INSERT INTO weight_records (date, user_weight, combined_weight, cat_weight, cat_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(user_weight)
        .bind(combined_weight)
        .bind(cat_weight)
        .bind(cat_id)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    /// 删除体重记录；通过猫表校验归属
    pub async fn delete_for_user(&self, record_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM weight_records
            WHERE id = $1
              AND cat_id IN (SELECT id FROM cats WHERE user_id = $2)
            "#,
        )
        .bind(record_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
