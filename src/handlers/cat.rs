//! 猫管理的 HTTP 处理器

use crate::{
    auth::middleware::ActiveUser,
    error::AppError,
    middleware::AppState,
    models::cat::*,
    repository::{CatRepository, WeightRepository},
    services::plot_service,
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

/// 列出当前用户的猫
pub async fn list_cats(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = page.clamped();

    let repo = CatRepository::new(state.db.clone());
    let cats = repo.list_for_user(user.id, limit, offset).await?;

    Ok(Json(cats))
}

/// 创建猫
pub async fn create_cat(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Json(req): Json<CatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let req = req.normalized();
    req.validate()?;

    let repo = CatRepository::new(state.db.clone());
    let cat = repo.create(user.id, &req.name, req.target_weight).await?;

    tracing::info!(cat_id = %cat.id, username = %user.username, "Cat created");

    Ok(Json(json!({
        "message": "猫创建成功",
        "cat": cat
    })))
}

/// 获取猫详情（附体重记录，最新在前）
pub async fn get_cat(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CatRepository::new(state.db.clone());
    let cat = repo
        .find_for_user(id, user.id)
        .await?
        .ok_or(AppError::NotFound)?;

    let weight_repo = WeightRepository::new(state.db.clone());
    let weight_records = weight_repo.list_for_cat(cat.id, 100, 0).await?;

    Ok(Json(CatWithRecords {
        cat,
        weight_records,
    }))
}

/// 更新猫
pub async fn update_cat(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let req = req.normalized();
    req.validate()?;

    let repo = CatRepository::new(state.db.clone());
    let cat = repo
        .update(id, user.id, &req.name, req.target_weight)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({
        "message": "猫更新成功",
        "cat": cat
    })))
}

/// 删除猫（级联删除体重记录）
pub async fn delete_cat(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CatRepository::new(state.db.clone());
    let deleted = repo.delete(id, user.id).await?;

    if !deleted {
        return Err(AppError::NotFound);
    }

    tracing::info!(cat_id = %id, username = %user.username, "Cat deleted");

    Ok(Json(json!({
        "message": "猫已删除"
    })))
}

/// 获取猫的体重曲线数据
pub async fn get_plot_data(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CatRepository::new(state.db.clone());
    let cat = repo
        .find_for_user(id, user.id)
        .await?
        .ok_or(AppError::NotFound)?;

    let weight_repo = WeightRepository::new(state.db.clone());
    let records = weight_repo.list_for_cat_by_date(cat.id).await?;

    Ok(Json(plot_service::build_plot_data(&cat, &records)))
}
