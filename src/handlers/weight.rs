//! 体重记录的 HTTP 处理器

use crate::{
    auth::middleware::ActiveUser,
    error::AppError,
    middleware::AppState,
    models::weight::*,
    repository::{CatRepository, WeightRepository},
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::Pagination;

/// 列出某只猫的体重记录
pub async fn list_weight_records(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(cat_id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let cat_repo = CatRepository::new(state.db.clone());
    let cat = cat_repo
        .find_for_user(cat_id, user.id)
        .await?
        .ok_or(AppError::NotFound)?;

    let (limit, offset) = page.clamped();
    let repo = WeightRepository::new(state.db.clone());
    let records = repo.list_for_cat(cat.id, limit, offset).await?;

    Ok(Json(records))
}

/// 新增称重记录
/// 猫的体重由合计体重与主人体重之差得出
pub async fn create_weight_record(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(cat_id): Path<Uuid>,
    Json(req): Json<CreateWeightRecordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let cat_repo = CatRepository::new(state.db.clone());
    let cat = cat_repo
        .find_for_user(cat_id, user.id)
        .await?
        .ok_or(AppError::NotFound)?;

    let req = req.normalized();
    req.validate()?;

    let repo = WeightRepository::new(state.db.clone());
    let record = repo
        .create(
            cat.id,
            req.date,
            req.user_weight,
            req.combined_weight,
            req.cat_weight(),
        )
        .await?;

    Ok(Json(json!({
        "message": "体重记录已保存",
        "record": record
    })))
}

/// 删除称重记录；归属通过猫表校验
pub async fn delete_weight_record(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(record_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = WeightRepository::new(state.db.clone());
    let deleted = repo.delete_for_user(record_id, user.id).await?;

    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Json(json!({
        "message": "体重记录已删除"
    })))
}
