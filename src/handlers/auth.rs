//! 认证与账户相关的 HTTP 处理器

use crate::{
    auth::middleware::ActiveUser,
    auth::password::PasswordHasher,
    error::AppError,
    middleware::AppState,
    models::{auth::*, user::*},
    repository::UserRepository,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 注册新用户
/// 由 security.registration_enabled 开关控制，默认关闭
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !state.config.security.registration_enabled {
        tracing::info!("Registration attempt while registration is disabled");
        return Err(AppError::Forbidden);
    }

    req.validate()?;
    PasswordHasher::validate_password_policy(&req.password, &state.config.security)?;

    let email = req.email.to_lowercase();
    let repo = UserRepository::new(state.db.clone());

    // 唯一性预检查；数据库唯一约束兜底
    if repo.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict("用户名已被占用".to_string()));
    }
    if repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("邮箱已被注册".to_string()));
    }

    let hasher = PasswordHasher::new();
    let password_hash = hasher.hash(&req.password)?;

    let user = repo.create(&req.username, &email, &password_hash).await?;

    tracing::info!(username = %user.username, "User registered");

    Ok(Json(json!({
        "message": "注册成功",
        "user": UserResponse::from(user)
    })))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.auth_service.login(req).await?;

    Ok(Json(response))
}

/// 获取当前用户信息
pub async fn get_current_user(
    ActiveUser(user): ActiveUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(UserResponse::from(user)))
}

/// 更新当前用户资料
pub async fn update_current_user(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let repo = UserRepository::new(state.db.clone());
    let email = req.email.map(|e| e.to_lowercase());

    // 改名/改邮箱前检查是否与其他账户冲突
    if let Some(username) = req.username.as_deref() {
        if username != user.username && repo.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict("用户名已被占用".to_string()));
        }
    }
    if let Some(email) = email.as_deref() {
        if email != user.email && repo.find_by_email(email).await?.is_some() {
            return Err(AppError::Conflict("邮箱已被注册".to_string()));
        }
    }

    let updated = repo
        .update_profile(user.id, req.username.as_deref(), email.as_deref())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(json!({
        "message": "资料更新成功",
        "user": UserResponse::from(updated)
    })))
}

/// 修改密码
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    ActiveUser(user): ActiveUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let hasher = PasswordHasher::new();

    if !hasher.verify(&req.current_password, &user.password_hash) {
        return Err(AppError::BadRequest("当前密码不正确".to_string()));
    }

    PasswordHasher::validate_password_policy(&req.new_password, &state.config.security)?;

    let new_password_hash = hasher.hash(&req.new_password)?;

    let repo = UserRepository::new(state.db.clone());
    repo.update_password(user.id, &new_password_hash).await?;

    tracing::info!(username = %user.username, "Password changed");

    Ok(Json(json!({
        "message": "密码修改成功"
    })))
}
