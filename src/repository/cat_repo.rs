//! Cat repository (数据库访问层)
//! 所有查询都以所有者 user_id 为范围

use crate::{error::AppError, models::cat::Cat};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CatRepository {
    db: PgPool,
}

impl CatRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出某用户的猫
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Cat>, AppError> {
        let cats = sqlx::query_as::<_, Cat>(
            r#"
            SELECT * FROM cats
            WHERE user_id = $1
            ORDER BY created_at
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(cats)
    }

    /// 查找某用户的一只猫；其他用户的猫视为不存在
    pub async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Option<Cat>, AppError> {
        let cat = sqlx::query_as::<_, Cat>("SELECT * FROM cats WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(cat)
    }

    /// 创建猫
    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        target_weight: f64,
    ) -> Result<Cat, AppError> {
        let cat = sqlx::query_as::<_, Cat>(
            r#"
            INSERT INTO cats (name, target_weight, user_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(target_weight)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(cat)
    }

    /// 更新猫
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        name: &str,
        target_weight: f64,
    ) -> Result<Option<Cat>, AppError> {
        let cat = sqlx::query_as::<_, Cat>(
            r#"
            UPDATE cats
            SET name = $3, target_weight = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(target_weight)
        .fetch_optional(&self.db)
        .await?;

        Ok(cat)
    }

    /// 删除猫（级联删除体重记录）
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cats WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
